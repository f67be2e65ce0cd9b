use std::cmp::Ordering;
use crate::models::Task;

/// Display order of two tasks.
///
/// Incomplete tasks come before completed ones; within each group tasks are
/// ordered by creation time, oldest first.
pub fn task_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Sorts tasks in place into display order. The sort is stable.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(task_order);
}

/// Consumes and returns the tasks in display order.
pub fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
    sort_tasks(&mut tasks);
    tasks
}

/// Number of completed tasks.
pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

/// Label of the "Completed" counter: `0` when nothing is done, otherwise `X of N`.
pub fn completed_label(tasks: &[Task]) -> String {
    match completed_count(tasks) {
        0 => "0".to_string(),
        done => format!("{} of {}", done, tasks.len()),
    }
}
