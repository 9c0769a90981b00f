// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Execution history events and the bounded, most-recent-first view of them
//! printed after an execution ends.

use crate::aws::StepFunctionsService;
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

/// Error and cause embedded in a failure event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetails {
    /// The error code.
    pub error: Option<String>,
    /// The cause of the error.
    pub cause: Option<String>,
}

impl FailureDetails {
    /// Creates the details from the optional error and cause.
    pub fn new(error: Option<String>, cause: Option<String>) -> Self {
        Self { error, cause }
    }

    /// Returns true if neither the error nor the cause is set.
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.cause.is_none()
    }
}

/// A timestamped record of one step or transition of an execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    /// When the event happened.
    pub timestamp:  DateTime<Utc>,
    /// The event type, e.g. `TaskStateEntered`.
    pub event_type: String,
    /// Set for failure events that carry an error or a cause.
    pub failure:    Option<FailureDetails>,
}

impl HistoryEvent {
    /// Returns true for event types that report a failure, such as
    /// `ExecutionFailed`, `TaskFailed` or `LambdaFunctionFailed`.
    pub fn is_failure_type(event_type: &str) -> bool {
        event_type.ends_with("Failed")
    }
}

impl Display for HistoryEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.event_type
        )?;
        if let Some(failure) = &self.failure {
            write!(
                f,
                "\n    Error: {}\n    Cause: {}",
                failure.error.as_deref().unwrap_or("Unknown"),
                failure.cause.as_deref().unwrap_or("Unknown")
            )?;
        }
        Ok(())
    }
}

/// Reads the tail of an execution's history.
pub struct HistoryReporter<'a, S: StepFunctionsService + ?Sized> {
    service:     &'a S,
    fetch_limit: i64,
}

impl<'a, S: StepFunctionsService + ?Sized> HistoryReporter<'a, S> {
    /// Creates a reporter that requests at most `fetch_limit` events per call.
    pub fn new(service: &'a S, fetch_limit: i64) -> Self {
        Self {
            service,
            fetch_limit,
        }
    }

    /// Returns the `max_events` most recent events, most recent first.
    ///
    /// # Arguments
    /// * `execution_arn` - The execution to inspect.
    /// * `max_events` - The maximum number of events to return.
    pub async fn summarize(
        &self,
        execution_arn: &str,
        max_events: usize,
    ) -> Result<Vec<HistoryEvent>> {
        let fetch = self.fetch_limit.max(max_events as i64);
        let mut events = self
            .service
            .get_execution_history(execution_arn, fetch, true)
            .await?;
        events.truncate(max_events);
        Ok(events)
    }
}
