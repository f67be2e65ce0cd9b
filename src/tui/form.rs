use crate::error::FormError;
use crate::models::{palette_index, TaskFormData, TASK_COLORS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Color,
}

/// Editable state of the task form shared by the create and edit views.
#[derive(Debug)]
pub struct TaskForm {
    pub title: String,
    pub color_index: usize,
    pub focus: FormField,
    /// Label of the submit button ("Add Task" / "Save").
    pub button_label: &'static str,
    /// Set while the submit request is in flight.
    pub is_loading: bool,
    pub errors: Vec<FormError>,
}

impl TaskForm {
    pub fn new(defaults: TaskFormData, button_label: &'static str) -> Self {
        TaskForm {
            title: defaults.title,
            // colors outside the palette start on the default swatch
            color_index: palette_index(&defaults.color).unwrap_or(0),
            focus: FormField::Title,
            button_label,
            is_loading: false,
            errors: Vec::new(),
        }
    }

    pub fn color(&self) -> &'static str {
        TASK_COLORS[self.color_index]
    }

    pub fn data(&self) -> TaskFormData {
        TaskFormData {
            title: self.title.clone(),
            color: self.color().to_string(),
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Color,
            FormField::Color => FormField::Title,
        };
    }

    pub fn push_char(&mut self, c: char) {
        if self.focus == FormField::Title {
            self.title.push(c);
            self.errors.retain(|e| !matches!(e, FormError::TitleRequired | FormError::TitleTooLong { .. }));
        }
    }

    pub fn pop_char(&mut self) {
        if self.focus == FormField::Title {
            self.title.pop();
        }
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % TASK_COLORS.len();
    }

    pub fn previous_color(&mut self) {
        self.color_index = (self.color_index + TASK_COLORS.len() - 1) % TASK_COLORS.len();
    }

    /// Validates the form. On failure the errors are kept for display.
    pub fn submit(&mut self) -> Option<TaskFormData> {
        match self.data().validate() {
            Ok(data) => {
                self.errors.clear();
                Some(data)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn title_error(&self) -> Option<&FormError> {
        self.errors
            .iter()
            .find(|e| matches!(e, FormError::TitleRequired | FormError::TitleTooLong { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_wrap_around() {
        let mut form = TaskForm::new(TaskFormData::default(), "Add Task");
        form.previous_color();
        assert_eq!(form.color(), TASK_COLORS[TASK_COLORS.len() - 1]);
        form.next_color();
        assert_eq!(form.color(), TASK_COLORS[0]);
    }

    #[test]
    fn typing_only_edits_the_focused_title() {
        let mut form = TaskForm::new(TaskFormData::default(), "Add Task");
        form.push_char('h');
        form.push_char('i');
        form.next_field();
        form.push_char('!');
        form.pop_char();
        assert_eq!(form.title, "hi");
    }

    #[test]
    fn blank_title_blocks_submission() {
        let mut form = TaskForm::new(TaskFormData::default(), "Add Task");
        assert!(form.submit().is_none());
        assert_eq!(form.title_error(), Some(&FormError::TitleRequired));

        form.push_char('x');
        assert!(form.title_error().is_none());
        assert_eq!(form.submit().map(|d| d.title), Some("x".to_string()));
    }

    #[test]
    fn prefilled_form_keeps_palette_position() {
        let form = TaskForm::new(
            TaskFormData { title: "Read".into(), color: TASK_COLORS[4].into() },
            "Save",
        );
        assert_eq!(form.color_index, 4);
        assert_eq!(form.data().title, "Read");
    }
}
