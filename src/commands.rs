use std::io::{self, Write};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use crate::api::TaskApi;
use crate::error::{ApiResult, FormError};
use crate::models::{is_palette_color, parse_hex, validate_title, Task, TaskFormData, TaskPatch, TASK_COLORS};
use crate::ordering::{completed_label, sorted};

/// Logs a failed call and prints the user-facing message for it.
fn report<T>(res: ApiResult<T>, message: &str, silent: bool) -> ApiResult<T> {
    if let Err(e) = &res {
        tracing::error!(error = %e, "{}", message);
        if !silent { eprintln!("{}", message); }
    }
    res
}

/// Resolves a color argument to a palette entry.
///
/// Accepts a hex color from the palette or a 1-based palette index.
pub fn resolve_color(arg: &str) -> Option<String> {
    if is_palette_color(arg) {
        return Some(arg.to_uppercase());
    }
    arg.parse::<usize>()
        .ok()
        .filter(|i| (1..=TASK_COLORS.len()).contains(i))
        .map(|i| TASK_COLORS[i - 1].to_string())
}

/// Lists all tasks in a formatted table, incomplete first.
pub fn cmd_list(api: &impl TaskApi) -> ApiResult<Vec<Task>> {
    let tasks = sorted(report(api.list_tasks(), "Failed to fetch tasks. Please try again later.", false)?);
    if tasks.is_empty() {
        println!("You don't have any tasks registered yet.");
        println!("Create tasks and organize your to-do items.");
        return Ok(tasks);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Color").add_attribute(Attribute::Bold),
            Cell::new("Created").add_attribute(Attribute::Bold),
        ]);

    for t in &tasks {
        let title = if t.completed {
            Cell::new(&t.title).add_attribute(Attribute::CrossedOut).fg(Color::Grey)
        } else {
            Cell::new(&t.title)
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(if t.completed { "[x]" } else { "[ ]" }),
            title,
            Cell::new("●").fg(swatch(&t.color)),
            Cell::new(t.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    println!("Tasks {}  |  Completed {}", tasks.len(), completed_label(&tasks));
    Ok(tasks)
}

/// Prints a single task.
pub fn cmd_show(api: &impl TaskApi, id: u64) -> ApiResult<Task> {
    let t = report(api.get_task(id), "Failed to load task.", false)?;
    println!("#{} {}", t.id, t.title);
    println!("  status:  {}", if t.completed { "done" } else { "pending" });
    println!("  color:   {}", t.color);
    println!("  created: {}", t.created_at.to_rfc3339());
    Ok(t)
}

/// Creates a new task with the given title and color.
pub fn cmd_add(api: &impl TaskApi, data: TaskFormData, silent: bool) -> ApiResult<Task> {
    let t = report(api.create_task(&data), "Failed to create task. Please try again later.", silent)?;
    tracing::info!(id = t.id, "task created");
    if !silent { println!("Task added (id = {})", t.id); }
    Ok(t)
}

/// Updates the title and/or color of a task.
pub fn cmd_edit(api: &impl TaskApi, id: u64, patch: TaskPatch, silent: bool) -> ApiResult<Task> {
    let t = report(api.update_task(id, &patch), "Failed to update task. Please try again later.", silent)?;
    if !silent { println!("Task {} updated.", id); }
    Ok(t)
}

/// Builds the partial update for `edit`, applying the same title rules as the forms.
///
/// Returns `Ok(None)` when neither field was given.
pub fn edit_patch(title: Option<&str>, color: Option<String>) -> Result<Option<TaskPatch>, FormError> {
    let title = title.map(validate_title).transpose()?;
    let patch = TaskPatch { title, completed: None, color };
    Ok(if patch.is_empty() { None } else { Some(patch) })
}

/// Flips the completion state of a task.
pub fn cmd_toggle(api: &impl TaskApi, id: u64, silent: bool) -> ApiResult<Task> {
    let current = report(api.get_task(id), "Failed to load task.", silent)?;
    let t = report(
        api.update_task(id, &TaskPatch::completed(!current.completed)),
        "Failed to update task. Please try again.",
        silent,
    )?;
    if !silent {
        let state = if t.completed { "complete" } else { "incomplete" };
        println!("Task {} marked as {}.", id, state);
    }
    Ok(t)
}

/// Deletes a task after confirmation.
///
/// Returns `Ok(false)` if the user declined.
pub fn cmd_remove(api: &impl TaskApi, id: u64, force: bool, silent: bool) -> ApiResult<bool> {
    if !force && !confirm("Are you sure you want to delete this task? This action cannot be undone. [y/N] ") {
        if !silent { println!("Aborted."); }
        return Ok(false);
    }
    report(api.delete_task(id), "Failed to delete task. Please try again.", silent)?;
    tracing::info!(id, "task deleted");
    if !silent { println!("Task {} removed.", id); }
    Ok(true)
}

fn confirm(prompt: &str) -> bool {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("y")
}

fn swatch(hex: &str) -> Color {
    match parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb { r, g, b },
        None => Color::Reset,
    }
}

