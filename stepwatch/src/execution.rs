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

//! Execution status and the terminal result of a monitored execution.

use crate::error::{Result, StepwatchError};
use log::warn;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The status of a Step Functions execution.
///
/// `Running` is the only non-terminal value. Once an execution leaves it, no
/// further transition happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    /// The execution is still in progress.
    Running,
    /// The execution completed successfully.
    Succeeded,
    /// The execution failed.
    Failed,
    /// The execution exceeded its configured timeout.
    TimedOut,
    /// The execution was stopped by a user or an API call.
    Aborted,
}

impl ExecutionStatus {
    /// Returns true if no further transition can happen from this status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExecutionStatus::Running)
    }

    /// The status string used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Running => "RUNNING",
            ExecutionStatus::Succeeded => "SUCCEEDED",
            ExecutionStatus::Failed => "FAILED",
            ExecutionStatus::TimedOut => "TIMED_OUT",
            ExecutionStatus::Aborted => "ABORTED",
        }
    }

    /// Reads a status as reported by the service.
    ///
    /// Statuses this crate doesn't know about, such as `PENDING_REDRIVE`, are
    /// read as `Running` so that polling carries on until one of the known
    /// terminal statuses shows up.
    pub fn from_wire(s: &str) -> ExecutionStatus {
        s.parse().unwrap_or_else(|_| {
            warn!("Unrecognized execution status {}, still polling", s);
            ExecutionStatus::Running
        })
    }
}

impl FromStr for ExecutionStatus {
    type Err = StepwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RUNNING" => Ok(ExecutionStatus::Running),
            "SUCCEEDED" => Ok(ExecutionStatus::Succeeded),
            "FAILED" => Ok(ExecutionStatus::Failed),
            "TIMED_OUT" => Ok(ExecutionStatus::TimedOut),
            "ABORTED" => Ok(ExecutionStatus::Aborted),
            _ => Err(StepwatchError::Transport(format!(
                "unknown execution status: {}",
                s
            ))),
        }
    }
}

impl Display for ExecutionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One answer of the service to a status query.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionDescription {
    /// Current status.
    pub status: ExecutionStatus,
    /// Raw JSON output, once the execution produced one.
    pub output: Option<String>,
    /// Error code of a failed execution.
    pub error:  Option<String>,
    /// Human readable cause of a failed execution.
    pub cause:  Option<String>,
}

impl ExecutionDescription {
    /// A description with only a status.
    pub fn new(status: ExecutionStatus) -> Self {
        Self {
            status,
            output: None,
            error: None,
            cause: None,
        }
    }
}

/// The error code and cause of a failed execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionError {
    /// Error code, e.g. `States.TaskFailed`.
    pub error: String,
    /// Cause reported alongside the error.
    pub cause: Option<String>,
}

/// The outcome of a monitored execution. Built once, when a terminal status
/// is observed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    status: ExecutionStatus,
    output: Option<Value>,
    error:  Option<ExecutionError>,
}

impl ExecutionResult {
    /// Builds the result from a terminal status query answer.
    ///
    /// The output is kept whenever the service returned one; it is parsed as
    /// JSON and falls back to a plain string value. The error and cause are
    /// kept for `FAILED` executions only.
    pub(crate) fn from_terminal(description: ExecutionDescription) -> Self {
        debug_assert!(description.status.is_terminal());

        let output = description
            .output
            .map(|raw| serde_json::from_str(&raw).unwrap_or(Value::String(raw)));

        let error = match (description.status, description.error) {
            (ExecutionStatus::Failed, Some(error)) => Some(ExecutionError {
                error,
                cause: description.cause,
            }),
            _ => None,
        };

        Self {
            status: description.status,
            output,
            error,
        }
    }

    /// The terminal status.
    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// The execution output, if any.
    pub fn output(&self) -> Option<&Value> {
        self.output.as_ref()
    }

    /// The error of a failed execution, if reported.
    pub fn error(&self) -> Option<&ExecutionError> {
        self.error.as_ref()
    }

    /// Returns true if the monitored execution succeeded.
    pub fn succeeded(&self) -> bool {
        self.status == ExecutionStatus::Succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_strings() -> Result<()> {
        for s in ["RUNNING", "SUCCEEDED", "FAILED", "TIMED_OUT", "ABORTED"] {
            assert_eq!(s, s.parse::<ExecutionStatus>()?.to_string());
        }
        assert!("PENDING_REDRIVE".parse::<ExecutionStatus>().is_err());
        Ok(())
    }

    #[test]
    fn unknown_wire_status_keeps_polling() {
        assert_eq!(ExecutionStatus::Running, ExecutionStatus::from_wire("PENDING_REDRIVE"));
        assert!(!ExecutionStatus::from_wire("PENDING_REDRIVE").is_terminal());
        assert_eq!(ExecutionStatus::TimedOut, ExecutionStatus::from_wire("TIMED_OUT"));
    }

    #[test]
    fn only_running_is_not_terminal() {
        assert!(!ExecutionStatus::Running.is_terminal());
        assert!(ExecutionStatus::Succeeded.is_terminal());
        assert!(ExecutionStatus::Failed.is_terminal());
        assert!(ExecutionStatus::TimedOut.is_terminal());
        assert!(ExecutionStatus::Aborted.is_terminal());
    }

    #[test]
    fn failed_result_keeps_error_and_cause() {
        let result = ExecutionResult::from_terminal(ExecutionDescription {
            status: ExecutionStatus::Failed,
            output: None,
            error:  Some("States.TaskFailed".to_string()),
            cause:  Some("lambda timeout".to_string()),
        });
        assert_eq!(
            result.error(),
            Some(&ExecutionError {
                error: "States.TaskFailed".to_string(),
                cause: Some("lambda timeout".to_string()),
            })
        );
        assert!(!result.succeeded());
    }

    #[test]
    fn error_is_ignored_unless_failed() {
        let result = ExecutionResult::from_terminal(ExecutionDescription {
            status: ExecutionStatus::Aborted,
            output: None,
            error:  Some("States.Runtime".to_string()),
            cause:  None,
        });
        assert_eq!(result.error(), None);
    }

    #[test]
    fn output_is_parsed_as_json() {
        let mut description = ExecutionDescription::new(ExecutionStatus::Succeeded);
        description.output = Some(r#"{"passed": true}"#.to_string());
        let result = ExecutionResult::from_terminal(description);
        assert_eq!(result.output(), Some(&json!({"passed": true})));
        assert!(result.succeeded());

        let mut description = ExecutionDescription::new(ExecutionStatus::Succeeded);
        description.output = Some("not json".to_string());
        let result = ExecutionResult::from_terminal(description);
        assert_eq!(result.output(), Some(&json!("not json")));
    }
}
