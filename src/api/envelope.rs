//! Envelope normalization for the Zelvo backend.
//!
//! Task lists arrive in one of four shapes depending on which backend path
//! produced them:
//!
//! 1. bare array: `[...]`
//! 2. page object: `{"content": [...]}`
//! 3. wrapped list: `{"status": "success", "data": [...]}`
//! 4. wrapped page: `{"status": "success", "data": {"content": [...]}}`
//!
//! Each shape is tried in order; anything else normalizes to an empty list
//! so rendering code never sees a decode failure on load.

use serde_json::Value;

use crate::api::dto::TaskDto;
use crate::api::error::ApiError;
use crate::model::Task;

/// Normalize a `GET /tasks` response body into a flat task list
pub fn decode_task_list(body: Value) -> Vec<Task> {
    if let Some(tasks) = try_task_array(&body) {
        return tasks;
    }
    if let Some(tasks) = body.get("content").and_then(try_task_array) {
        return tasks;
    }
    if let Some(inner) = body.get("data") {
        if let Some(tasks) = try_task_array(inner) {
            return tasks;
        }
        if let Some(tasks) = inner.get("content").and_then(try_task_array) {
            return tasks;
        }
    }
    Vec::new()
}

fn try_task_array(value: &Value) -> Option<Vec<Task>> {
    if !value.is_array() {
        return None;
    }
    let dtos: Vec<TaskDto> = serde_json::from_value(value.clone()).ok()?;
    Some(dtos.into_iter().map(TaskDto::into_task).collect())
}

/// Unwrap a `{"status": ..., "data": ...}` envelope, returning the payload
pub fn unwrap_data(body: Value) -> Result<Value, ApiError> {
    match body {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| ApiError::Shape("missing `data` field".to_string())),
        other => Err(ApiError::Shape(format!(
            "expected an object envelope, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
