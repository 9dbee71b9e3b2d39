//! Pure request builders and response parsers, one pair per operation.
//!
//! # Design
//! Each `build_*` validates its arguments and produces an `HttpRequest`;
//! each `parse_*` checks the response against that operation's own expected
//! status and decodes the JSON body. No function here performs I/O, so an
//! argument rejected by a builder can never reach the network.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Mapping, NumericArg, ValidNumeric};

pub const GET_LISTS_STATUS: u16 = 200;
pub const GET_LIST_STATUS: u16 = 200;
pub const GET_LIST_TASKS_STATUS: u16 = 200;
pub const CREATE_TASK_STATUS: u16 = 201;
pub const COMPLETE_TASK_STATUS: u16 = 200;

pub fn build_get_lists() -> HttpRequest {
    get("lists".to_string(), Vec::new())
}

pub fn build_get_list(list_id: impl Into<NumericArg>) -> Result<HttpRequest, ApiError> {
    let list_id = require_numeric(list_id.into(), "the list id must be numeric")?;
    Ok(get(format!("lists/{}", list_id.as_text()), Vec::new()))
}

pub fn build_get_list_tasks(list_id: impl Into<NumericArg>) -> Result<HttpRequest, ApiError> {
    let list_id = require_numeric(list_id.into(), "the list id must be numeric")?;
    Ok(get(
        "tasks".to_string(),
        vec![("list_id".to_string(), list_id.as_text().to_string())],
    ))
}

/// Builds `POST tasks` from the caller's parameters.
///
/// `name` and `listId` are written after the caller's entries, so they
/// replace any value the caller supplied under those keys.
pub fn build_create_task(
    name: &str,
    list_id: impl Into<NumericArg>,
    parameters: Mapping,
) -> Result<HttpRequest, ApiError> {
    let list_id = require_numeric(list_id.into(), "the list id must be numeric")?;

    let mut body = parameters;
    body.insert("name".to_string(), Value::String(name.to_string()));
    body.insert("listId".to_string(), list_id.to_json());

    Ok(HttpRequest {
        method: HttpMethod::Post,
        path: "tasks".to_string(),
        query: Vec::new(),
        body: Some(encode(&body)?),
    })
}

pub fn build_complete_task(
    task_id: impl Into<NumericArg>,
    revision: impl Into<NumericArg>,
) -> Result<HttpRequest, ApiError> {
    let task_id = require_numeric(task_id.into(), "the task id must be numeric")?;
    let revision = require_numeric(revision.into(), "the revision must be numeric")?
        .to_integer()
        .ok_or_else(|| ApiError::InvalidArgument("the revision is out of range".to_string()))?;

    let mut body = Mapping::new();
    body.insert("revision".to_string(), Value::Number(revision));
    body.insert("completed".to_string(), Value::Bool(true));

    Ok(HttpRequest {
        method: HttpMethod::Patch,
        path: format!("tasks/{}", task_id.as_text()),
        query: Vec::new(),
        body: Some(encode(&body)?),
    })
}

pub fn parse_get_lists(response: HttpResponse) -> Result<Vec<Mapping>, ApiError> {
    check_status(&response, GET_LISTS_STATUS)?;
    decode(&response.body)
}

pub fn parse_get_list(response: HttpResponse) -> Result<Mapping, ApiError> {
    check_status(&response, GET_LIST_STATUS)?;
    decode(&response.body)
}

pub fn parse_get_list_tasks(response: HttpResponse) -> Result<Vec<Mapping>, ApiError> {
    check_status(&response, GET_LIST_TASKS_STATUS)?;
    decode(&response.body)
}

pub fn parse_create_task(response: HttpResponse) -> Result<Mapping, ApiError> {
    check_status(&response, CREATE_TASK_STATUS)?;
    decode(&response.body)
}

pub fn parse_complete_task(response: HttpResponse) -> Result<Mapping, ApiError> {
    check_status(&response, COMPLETE_TASK_STATUS)?;
    decode(&response.body)
}

fn get(path: String, query: Vec<(String, String)>) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        query,
        body: None,
    }
}

fn require_numeric(arg: NumericArg, message: &str) -> Result<ValidNumeric, ApiError> {
    arg.validate()
        .ok_or_else(|| ApiError::InvalidArgument(message.to_string()))
}

/// Exact match only: any other code, 2xx included, is a failure.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::UnexpectedStatus {
        status: response.status,
        expected,
    })
}

fn encode(body: &Mapping) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
