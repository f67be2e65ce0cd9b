use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::FormError;

/// Longest accepted task title, in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// Colors a task can be tagged with. The first entry is the default for new tasks.
pub const TASK_COLORS: [&str; 9] = [
    "#FF3B30", // red
    "#FF9500", // orange
    "#FFCC00", // yellow
    "#34C759", // green
    "#007AFF", // blue
    "#5856D6", // indigo
    "#AF52DE", // purple
    "#FF2D55", // pink
    "#A2845E", // brown
];

/// Returns `true` if `color` is one of [`TASK_COLORS`] (case-insensitive).
pub fn is_palette_color(color: &str) -> bool {
    TASK_COLORS.iter().any(|c| c.eq_ignore_ascii_case(color))
}

/// Position of `color` in [`TASK_COLORS`], if any.
pub fn palette_index(color: &str) -> Option<usize> {
    TASK_COLORS.iter().position(|c| c.eq_ignore_ascii_case(color))
}

/// Parses `#RRGGBB` into its components.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.strip_prefix('#')?;
    if h.len() != 6 || !h.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&h[0..2], 16).ok()?;
    let g = u8::from_str_radix(&h[2..4], 16).ok()?;
    let b = u8::from_str_radix(&h[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Trims a task title and checks its length. Shared by the forms and the CLI.
pub fn validate_title(title: &str) -> Result<String, FormError> {
    let title = title.trim();
    if title.is_empty() {
        Err(FormError::TitleRequired)
    } else if title.chars().count() > TITLE_MAX_LEN {
        Err(FormError::TitleTooLong { max: TITLE_MAX_LEN })
    } else {
        Ok(title.to_string())
    }
}

/// A single task as returned by the task service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier. Never changes once assigned.
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Hex color from the palette, e.g. `#007AFF`.
    pub color: String,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Payload of the create and edit forms.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskFormData {
    pub title: String,
    pub color: String,
}

impl Default for TaskFormData {
    fn default() -> Self {
        TaskFormData {
            title: String::new(),
            color: TASK_COLORS[0].to_string(),
        }
    }
}

impl TaskFormData {
    /// Checks the form and returns the cleaned-up payload (title trimmed).
    pub fn validate(&self) -> Result<TaskFormData, Vec<FormError>> {
        let title = validate_title(&self.title);
        let color_ok = is_palette_color(&self.color);
        match (title, color_ok) {
            (Ok(title), true) => Ok(TaskFormData { title, color: self.color.clone() }),
            (title, color_ok) => {
                let mut errors = Vec::new();
                if let Err(e) = title {
                    errors.push(e);
                }
                if !color_ok {
                    errors.push(FormError::InvalidColor);
                }
                Err(errors)
            }
        }
    }
}

impl From<&Task> for TaskFormData {
    fn from(task: &Task) -> Self {
        TaskFormData {
            title: task.title.clone(),
            color: task.color.clone(),
        }
    }
}

/// Partial update sent to the update endpoint. Absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        TaskPatch { completed: Some(completed), ..TaskPatch::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none() && self.color.is_none()
    }
}

impl From<TaskFormData> for TaskPatch {
    fn from(data: TaskFormData) -> Self {
        TaskPatch {
            title: Some(data.title),
            completed: None,
            color: Some(data.color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_uses_camel_case_on_the_wire() {
        let json = r##"{"id":7,"title":"Buy milk","completed":true,"color":"#34C759","createdAt":"2024-05-01T10:00:00Z"}"##;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert!(task.completed);
        assert_eq!(task.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");

        let back = serde_json::to_value(&task).unwrap();
        assert!(back.get("createdAt").is_some());
    }

    #[test]
    fn completed_defaults_to_false() {
        let json = r##"{"id":1,"title":"x","color":"#FF3B30","createdAt":"2024-05-01T10:00:00Z"}"##;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(!task.completed);
    }

    #[test]
    fn patch_omits_absent_fields() {
        let body = serde_json::to_string(&TaskPatch::completed(true)).unwrap();
        assert_eq!(body, r#"{"completed":true}"#);
    }

    #[test]
    fn default_form_uses_first_palette_color() {
        let form = TaskFormData::default();
        assert!(form.title.is_empty());
        assert_eq!(form.color, TASK_COLORS[0]);
        assert_eq!(palette_index("#ff3b30"), Some(0));
        assert!(!is_palette_color("#000000"));
    }

    #[test]
    fn validation_trims_and_reports_every_problem() {
        let ok = TaskFormData { title: "  Walk dog ".into(), color: TASK_COLORS[3].into() }
            .validate()
            .unwrap();
        assert_eq!(ok.title, "Walk dog");

        let errors = TaskFormData { title: "   ".into(), color: "#123456".into() }
            .validate()
            .unwrap_err();
        assert_eq!(errors, vec![FormError::TitleRequired, FormError::InvalidColor]);

        let long = TaskFormData { title: "x".repeat(TITLE_MAX_LEN + 1), color: TASK_COLORS[0].into() };
        assert_eq!(long.validate().unwrap_err(), vec![FormError::TitleTooLong { max: TITLE_MAX_LEN }]);
    }

    #[test]
    fn title_rules_are_shared() {
        assert_eq!(validate_title("  Call mom  "), Ok("Call mom".to_string()));
        assert_eq!(validate_title("\t "), Err(FormError::TitleRequired));
        assert_eq!(
            validate_title(&"é".repeat(TITLE_MAX_LEN + 1)),
            Err(FormError::TitleTooLong { max: TITLE_MAX_LEN })
        );
        assert!(validate_title(&"é".repeat(TITLE_MAX_LEN)).is_ok());
    }

    #[test]
    fn patch_knows_when_it_is_empty() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::completed(false).is_empty());
        assert!(!TaskPatch::from(TaskFormData::default()).is_empty());
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex("#34C759"), Some((0x34, 0xC7, 0x59)));
        assert_eq!(parse_hex("34C759"), None);
    }
}
