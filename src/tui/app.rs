use std::collections::VecDeque;
use std::time::Duration;
use ratatui::widgets::TableState;
use crate::api::TaskApi;
use crate::models::{Task, TaskFormData, TaskPatch};
use crate::ordering::sort_tasks;
use super::form::TaskForm;
use super::route::{Route, Router};
use super::toast::Toaster;

pub const FETCH_FAILED: &str = "Failed to fetch tasks. Please try again later.";
pub const TOGGLE_FAILED: &str = "Failed to update task. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete task. Please try again.";
pub const CREATE_FAILED: &str = "Failed to create task. Please try again later.";
pub const LOAD_FAILED: &str = "Failed to load task.";
pub const UPDATE_FAILED: &str = "Failed to update task. Please try again later.";

/// A call to the task service queued by a user action.
///
/// Requests run after the next frame is drawn, so local changes made by the
/// action (e.g. an optimistic toggle) are on screen before the call starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    FetchTasks,
    ToggleComplete { id: u64, completed: bool },
    DeleteTask(u64),
    CreateTask(TaskFormData),
    LoadTask(u64),
    UpdateTask(u64, TaskFormData),
}

/// State of the task list page.
#[derive(Debug, Default)]
pub struct ListView {
    pub tasks: Vec<Task>,
    pub state: TableState,
    pub is_loading: bool,
    /// Task awaiting delete confirmation; the dialog is open while set.
    pub delete_task_id: Option<u64>,
    pub is_deleting: bool,
}

impl ListView {
    fn loading() -> Self {
        ListView { is_loading: true, ..ListView::default() }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.tasks.get(i))
    }

    /// Re-sorts and keeps the cursor on the task it was on.
    fn resort(&mut self) {
        let selected_id = self.selected_task().map(|t| t.id);
        sort_tasks(&mut self.tasks);
        match selected_id.and_then(|id| self.tasks.iter().position(|t| t.id == id)) {
            Some(i) => self.state.select(Some(i)),
            None => self.clamp_selection(),
        }
    }

    fn clamp_selection(&mut self) {
        if self.tasks.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }
}

/// The page currently on screen.
#[derive(Debug)]
pub enum View {
    List,
    Create(TaskForm),
    /// `form` is `None` until the task has been loaded.
    Edit { task_id: u64, form: Option<TaskForm> },
}

pub struct App<A: TaskApi> {
    pub api: A,
    pub router: Router,
    pub view: View,
    pub list: ListView,
    pub toaster: Toaster,
    pub pending: VecDeque<Request>,
}

impl<A: TaskApi> App<A> {
    /// Creates the application on `start` and queues whatever that page loads.
    pub fn new(api: A, start: Route, toast_duration: Duration) -> App<A> {
        let mut app = App {
            api,
            router: Router::new(start),
            view: View::List,
            list: ListView::default(),
            toaster: Toaster::new(toast_duration),
            pending: VecDeque::new(),
        };
        app.enter(start);
        app
    }

    /// Navigates to `route`, keeping the current page in history.
    pub fn navigate(&mut self, route: Route) {
        self.router.push(route);
        self.enter(route);
    }

    /// Navigates without leaving a history entry.
    fn redirect(&mut self, route: Route) {
        self.router.replace(route);
        self.enter(route);
    }

    /// Returns to the previous page.
    pub fn back(&mut self) {
        let route = self.router.back();
        self.enter(route);
    }

    fn enter(&mut self, route: Route) {
        tracing::debug!(%route, "entering route");
        match route {
            Route::List => {
                self.view = View::List;
                self.list = ListView::loading();
                self.pending.push_back(Request::FetchTasks);
            }
            Route::Create => {
                self.view = View::Create(TaskForm::new(TaskFormData::default(), "Add Task"));
            }
            Route::Edit(None) => {
                tracing::error!("Invalid task ID");
                self.redirect(Route::List);
            }
            Route::Edit(Some(id)) => {
                self.view = View::Edit { task_id: id, form: None };
                self.pending.push_back(Request::LoadTask(id));
            }
        }
    }

    // List view

    pub fn next(&mut self) {
        if self.list.tasks.is_empty() { return; }
        let i = match self.list.state.selected() {
            Some(i) if i + 1 < self.list.tasks.len() => i + 1,
            _ => 0,
        };
        self.list.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.list.tasks.is_empty() { return; }
        let i = match self.list.state.selected() {
            Some(0) | None => self.list.tasks.len() - 1,
            Some(i) => i - 1,
        };
        self.list.state.select(Some(i));
    }

    pub fn refresh(&mut self) {
        self.list.is_loading = true;
        self.pending.push_back(Request::FetchTasks);
    }

    /// Flips the selected task's completion locally and queues the update.
    pub fn toggle_selected(&mut self) {
        let Some(task) = self.list.selected_task() else { return; };
        let (id, completed) = (task.id, !task.completed);

        if let Some(t) = self.list.tasks.iter_mut().find(|t| t.id == id) {
            t.completed = completed;
        }
        self.list.resort();
        self.pending.push_back(Request::ToggleComplete { id, completed });
    }

    /// Opens the delete confirmation for the selected task.
    pub fn request_delete_selected(&mut self) {
        if let Some(task) = self.list.selected_task() {
            self.list.delete_task_id = Some(task.id);
        }
    }

    pub fn cancel_delete(&mut self) {
        if !self.list.is_deleting {
            self.list.delete_task_id = None;
        }
    }

    pub fn confirm_delete(&mut self) {
        if self.list.is_deleting { return; }
        if let Some(id) = self.list.delete_task_id {
            self.list.is_deleting = true;
            self.pending.push_back(Request::DeleteTask(id));
        }
    }

    pub fn edit_selected(&mut self) {
        if let Some(id) = self.list.selected_task().map(|t| t.id) {
            self.navigate(Route::Edit(Some(id)));
        }
    }

    // Create / edit views

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        match &mut self.view {
            View::Create(form) => Some(form),
            View::Edit { form, .. } => form.as_mut(),
            View::List => None,
        }
    }

    /// Validates the form and queues the create or update call.
    pub fn submit_form(&mut self) {
        let request = match &mut self.view {
            View::Create(form) if !form.is_loading => form.submit().map(|data| {
                form.is_loading = true;
                Request::CreateTask(data)
            }),
            View::Edit { task_id, form: Some(form) } if !form.is_loading => form.submit().map(|data| {
                form.is_loading = true;
                Request::UpdateTask(*task_id, data)
            }),
            _ => None,
        };
        if let Some(request) = request {
            self.pending.push_back(request);
        }
    }

    // Requests

    /// Runs the oldest queued request. Returns `false` if nothing was queued.
    pub fn process_next(&mut self) -> bool {
        match self.pending.pop_front() {
            Some(request) => {
                self.execute(request);
                true
            }
            None => false,
        }
    }

    /// Runs every queued request, including ones queued by the results.
    pub fn process_all(&mut self) {
        while self.process_next() {}
    }

    fn execute(&mut self, request: Request) {
        match request {
            Request::FetchTasks => match self.api.list_tasks() {
                Ok(tasks) => {
                    self.list.tasks = tasks;
                    self.list.is_loading = false;
                    self.list.resort();
                }
                Err(e) => {
                    tracing::error!(error = %e, "fetching tasks failed");
                    self.list.is_loading = false;
                    self.toaster.error(FETCH_FAILED);
                }
            },
            Request::ToggleComplete { id, completed } => {
                match self.api.update_task(id, &TaskPatch::completed(completed)) {
                    Ok(updated) => {
                        if let Some(t) = self.list.tasks.iter_mut().find(|t| t.id == id) {
                            *t = updated;
                        }
                        self.list.resort();
                    }
                    // The optimistic change stays in place until the next fetch.
                    Err(e) => {
                        tracing::error!(error = %e, id, "updating completion failed");
                        self.toaster.error(TOGGLE_FAILED);
                    }
                }
            }
            Request::DeleteTask(id) => {
                match self.api.delete_task(id) {
                    Ok(()) => {
                        self.list.tasks.retain(|t| t.id != id);
                        self.list.clamp_selection();
                        self.list.delete_task_id = None;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, id, "deleting task failed");
                        self.toaster.error(DELETE_FAILED);
                    }
                }
                self.list.is_deleting = false;
            }
            Request::CreateTask(data) => match self.api.create_task(&data) {
                Ok(task) => {
                    tracing::info!(id = task.id, "task created");
                    self.navigate(Route::List);
                }
                Err(e) => {
                    tracing::error!(error = %e, "creating task failed");
                    self.toaster.error(CREATE_FAILED);
                    if let View::Create(form) = &mut self.view {
                        form.is_loading = false;
                    }
                }
            },
            Request::LoadTask(id) => {
                let result = self.api.get_task(id);
                // the user may have left the page in the meantime
                let View::Edit { task_id, form } = &mut self.view else { return; };
                if *task_id != id { return; }
                match result {
                    Ok(task) => *form = Some(TaskForm::new(TaskFormData::from(&task), "Save")),
                    Err(e) => {
                        tracing::error!(error = %e, id, "loading task failed");
                        self.toaster.error(LOAD_FAILED);
                        self.redirect(Route::List);
                    }
                }
            }
            Request::UpdateTask(id, data) => match self.api.update_task(id, &TaskPatch::from(data)) {
                Ok(_) => {
                    tracing::info!(id, "task updated");
                    self.navigate(Route::List);
                }
                Err(e) => {
                    tracing::error!(error = %e, id, "updating task failed");
                    self.toaster.error(UPDATE_FAILED);
                    if let View::Edit { form: Some(form), .. } = &mut self.view {
                        form.is_loading = false;
                    }
                }
            },
        }
    }
}
