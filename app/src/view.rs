//! HTML rendering of a list's tasks.

use askama::Template;
use serde_json::Value;
use wunderlist_core::Mapping;

/// One row of the task table, read from an opaque task mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

impl TaskRow {
    /// Missing attributes render as empty cells rather than failing.
    pub fn from_mapping(task: &Mapping) -> Self {
        let title = task
            .get("title")
            .or_else(|| task.get("name"))
            .map(display_value)
            .unwrap_or_default();
        Self {
            id: task.get("id").map(display_value).unwrap_or_default(),
            title,
            completed: task.get("completed").and_then(Value::as_bool).unwrap_or(false),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub tasks: Vec<TaskRow>,
}

impl ListTemplate {
    pub fn new(tasks: &[Mapping]) -> Self {
        Self {
            tasks: tasks.iter().map(TaskRow::from_mapping).collect(),
        }
    }
}
