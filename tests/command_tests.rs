mod common;

use common::{task, FakeApi};
use todoust::commands::*;
use todoust::error::FormError;
use todoust::models::{parse_hex, TaskFormData, TASK_COLORS, TITLE_MAX_LEN};

#[test]
fn test_add_creates_task() {
    let api = FakeApi::new(vec![]);
    let data = TaskFormData { title: "Write report".into(), color: TASK_COLORS[2].into() };

    let created = cmd_add(&api, data, true).unwrap();

    assert_eq!(created.title, "Write report");
    assert_eq!(created.color, TASK_COLORS[2]);
    assert!(!created.completed);
    assert_eq!(api.tasks.borrow().len(), 1);
}

#[test]
fn test_add_failure_is_returned() {
    let api = FakeApi::new(vec![]);
    api.failing.set(true);
    let res = cmd_add(&api, TaskFormData { title: "x".into(), color: TASK_COLORS[0].into() }, true);
    assert!(res.is_err());
    assert!(api.tasks.borrow().is_empty());
}

#[test]
fn test_toggle_flips_completion() {
    let api = FakeApi::new(vec![task(1, "a", false, 0)]);

    assert!(cmd_toggle(&api, 1, true).unwrap().completed);
    assert!(!cmd_toggle(&api, 1, true).unwrap().completed);
    assert_eq!(api.calls(), vec!["get 1", "update 1", "get 1", "update 1"]);
}

#[test]
fn test_edit_only_touches_given_fields() {
    let api = FakeApi::new(vec![task(1, "old", true, 0)]);

    let patch = edit_patch(Some("  new "), None).unwrap().unwrap();
    let t = cmd_edit(&api, 1, patch, true).unwrap();

    assert_eq!(t.title, "new");
    assert_eq!(t.color, "#007AFF");
    assert!(t.completed);
}

#[test]
fn test_edit_patch_uses_form_title_rules() {
    assert_eq!(edit_patch(None, None), Ok(None));
    assert_eq!(edit_patch(Some("   "), None), Err(FormError::TitleRequired));
    assert_eq!(
        edit_patch(Some(&"x".repeat(TITLE_MAX_LEN + 1)), None),
        Err(FormError::TitleTooLong { max: TITLE_MAX_LEN })
    );

    let patch = edit_patch(None, Some(TASK_COLORS[1].into())).unwrap().unwrap();
    assert_eq!(patch.title, None);
    assert_eq!(patch.color.as_deref(), Some(TASK_COLORS[1]));
}

#[test]
fn test_remove_with_force() {
    let api = FakeApi::new(vec![task(1, "a", false, 0), task(2, "b", false, 1)]);

    assert!(cmd_remove(&api, 1, true, true).unwrap());

    let ids: Vec<u64> = api.tasks.borrow().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_remove_unknown_task_fails() {
    let api = FakeApi::new(vec![]);
    assert!(cmd_remove(&api, 42, true, true).is_err());
}

#[test]
fn test_resolve_color() {
    assert_eq!(resolve_color("#34c759"), Some("#34C759".to_string()));
    assert_eq!(resolve_color("1"), Some(TASK_COLORS[0].to_string()));
    assert_eq!(resolve_color("9"), Some(TASK_COLORS[8].to_string()));
    assert_eq!(resolve_color("0"), None);
    assert_eq!(resolve_color("10"), None);
    assert_eq!(resolve_color("#000000"), None);
}

#[test]
fn test_parse_hex() {
    assert_eq!(parse_hex("#FF9500"), Some((255, 149, 0)));
    assert_eq!(parse_hex("FF9500"), None);
    assert_eq!(parse_hex("#FF95"), None);
    assert_eq!(parse_hex("#GG9500"), None);
}
