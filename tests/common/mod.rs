#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use chrono::{DateTime, Duration, TimeZone, Utc};
use todoust::api::TaskApi;
use todoust::error::{ApiError, ApiResult};
use todoust::models::{Task, TaskFormData, TaskPatch};

/// In-memory stand-in for the task service.
///
/// Records every call and can be switched into failure mode.
pub struct FakeApi {
    pub tasks: RefCell<Vec<Task>>,
    pub calls: RefCell<Vec<String>>,
    pub failing: Cell<bool>,
    next_id: Cell<u64>,
}

pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn task(id: u64, title: &str, completed: bool, minutes: i64) -> Task {
    Task {
        id,
        title: title.into(),
        completed,
        color: "#007AFF".into(),
        created_at: at(minutes),
    }
}

fn server_down() -> ApiError {
    ApiError::Status {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".into(),
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: reqwest::StatusCode::NOT_FOUND,
        body: "not found".into(),
    }
}

impl FakeApi {
    pub fn new(tasks: Vec<Task>) -> Self {
        let next = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        FakeApi {
            tasks: RefCell::new(tasks),
            calls: RefCell::new(Vec::new()),
            failing: Cell::new(false),
            next_id: Cell::new(next),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.borrow_mut().push(call);
        if self.failing.get() { Err(server_down()) } else { Ok(()) }
    }
}

impl TaskApi for FakeApi {
    fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        self.record("list".into())?;
        Ok(self.tasks.borrow().clone())
    }

    fn get_task(&self, id: u64) -> ApiResult<Task> {
        self.record(format!("get {}", id))?;
        self.tasks.borrow().iter().find(|t| t.id == id).cloned().ok_or_else(not_found)
    }

    fn create_task(&self, data: &TaskFormData) -> ApiResult<Task> {
        self.record(format!("create {}", data.title))?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let t = Task {
            id,
            title: data.title.clone(),
            completed: false,
            color: data.color.clone(),
            created_at: at(1000 + id as i64),
        };
        self.tasks.borrow_mut().push(t.clone());
        Ok(t)
    }

    fn update_task(&self, id: u64, patch: &TaskPatch) -> ApiResult<Task> {
        self.record(format!("update {}", id))?;
        let mut tasks = self.tasks.borrow_mut();
        let t = tasks.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
        if let Some(title) = &patch.title { t.title = title.clone(); }
        if let Some(completed) = patch.completed { t.completed = completed; }
        if let Some(color) = &patch.color { t.color = color.clone(); }
        Ok(t.clone())
    }

    fn delete_task(&self, id: u64) -> ApiResult<()> {
        self.record(format!("delete {}", id))?;
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before { Err(not_found()) } else { Ok(()) }
    }
}
