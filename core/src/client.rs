//! Blocking client for the task API.
//!
//! # Design
//! `WunderlistClient` owns a `Transport` and nothing else: no cache, no
//! identity map, no configuration of its own. Every operation is
//! build → one `Transport::execute` → parse, so a rejected argument costs no
//! round trip and two identical calls yield two independently decoded values.

use crate::endpoints;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Mapping, NumericArg};

/// Synchronous client for the lists and tasks endpoints.
#[derive(Debug, Clone)]
pub struct WunderlistClient<T> {
    transport: T,
}

impl<T: Transport> WunderlistClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns all the lists visible to the authenticated user.
    pub fn get_lists(&self) -> Result<Vec<Mapping>, ApiError> {
        let response = self.round_trip(endpoints::build_get_lists())?;
        endpoints::parse_get_lists(response)
    }

    /// Returns a single list.
    pub fn get_list(&self, list_id: impl Into<NumericArg>) -> Result<Mapping, ApiError> {
        let request = endpoints::build_get_list(list_id)?;
        endpoints::parse_get_list(self.round_trip(request)?)
    }

    /// Returns the tasks of a list.
    pub fn get_list_tasks(&self, list_id: impl Into<NumericArg>) -> Result<Vec<Mapping>, ApiError> {
        let request = endpoints::build_get_list_tasks(list_id)?;
        endpoints::parse_get_list_tasks(self.round_trip(request)?)
    }

    /// Creates a task in a list.
    ///
    /// `parameters` may hold any other task attribute (`due_date`,
    /// `starred`, ...). Its `name` and `listId` entries, if any, are replaced
    /// by the explicit arguments.
    pub fn create_task(
        &self,
        name: &str,
        list_id: impl Into<NumericArg>,
        parameters: Mapping,
    ) -> Result<Mapping, ApiError> {
        let request = endpoints::build_create_task(name, list_id, parameters)?;
        endpoints::parse_create_task(self.round_trip(request)?)
    }

    /// Marks a task as completed. `revision` must be the task's current revision.
    pub fn complete_task(
        &self,
        task_id: impl Into<NumericArg>,
        revision: impl Into<NumericArg>,
    ) -> Result<Mapping, ApiError> {
        let request = endpoints::build_complete_task(task_id, revision)?;
        endpoints::parse_complete_task(self.round_trip(request)?)
    }

    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "calling task API");
        let response = self.transport.execute(&request)?;
        tracing::debug!(status = response.status, path = %request.path, "task API responded");
        Ok(response)
    }
}
