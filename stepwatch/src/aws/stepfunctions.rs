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

//! This module contains the service seam over AWS Step Functions and its
//! rusoto-backed implementation.
//!
//! Everything above this module works against [`StepFunctionsService`], so the
//! client can be swapped for a scripted one in tests.

use crate::error::{Result, StepwatchError};
use crate::execution::{ExecutionDescription, ExecutionStatus};
use crate::history::{FailureDetails, HistoryEvent};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use rusoto_core::Region;
use rusoto_stepfunctions::{
    DescribeExecutionInput, GetExecutionHistoryInput, ListStateMachinesInput,
    StartExecutionInput, StepFunctions, StepFunctionsClient,
};

/// A state machine as returned by the listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMachineSummary {
    /// The state machine name.
    pub name: String,
    /// The state machine ARN.
    pub arn:  String,
}

/// One page of the state machine listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateMachinePage {
    /// The state machines on this page.
    pub state_machines: Vec<StateMachineSummary>,
    /// Token of the next page, `None` on the last page.
    pub next_token:     Option<String>,
}

/// The Step Functions operations the test runner consumes.
#[async_trait]
pub trait StepFunctionsService: Send + Sync {
    /// Lists one page of state machines.
    async fn list_state_machines(&self, next_token: Option<String>) -> Result<StateMachinePage>;

    /// Starts an execution and returns its ARN.
    ///
    /// # Arguments
    /// * `state_machine_arn` - The state machine to run.
    /// * `name` - The execution name.
    /// * `input` - The JSON input of the execution.
    async fn start_execution(
        &self,
        state_machine_arn: &str,
        name: &str,
        input: &str,
    ) -> Result<String>;

    /// Queries the current status of an execution.
    async fn describe_execution(&self, execution_arn: &str) -> Result<ExecutionDescription>;

    /// Fetches up to `max_results` history events of an execution.
    ///
    /// # Arguments
    /// * `execution_arn` - The execution to inspect.
    /// * `max_results` - The maximum number of events to return.
    /// * `reverse_order` - Returns the most recent events first if true.
    async fn get_execution_history(
        &self,
        execution_arn: &str,
        max_results: i64,
        reverse_order: bool,
    ) -> Result<Vec<HistoryEvent>>;
}

/// [`StepFunctionsService`] backed by the rusoto client.
pub struct RusotoStepFunctions {
    client: StepFunctionsClient,
}

impl RusotoStepFunctions {
    /// Creates a client for the given region. Credentials are resolved by
    /// rusoto's default provider chain.
    pub fn new(region: Region) -> Self {
        Self {
            client: StepFunctionsClient::new(region),
        }
    }

    /// Wraps an already configured client.
    pub fn with_client(client: StepFunctionsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StepFunctionsService for RusotoStepFunctions {
    async fn list_state_machines(&self, next_token: Option<String>) -> Result<StateMachinePage> {
        let response = self
            .client
            .list_state_machines(ListStateMachinesInput {
                next_token,
                ..Default::default()
            })
            .await?;

        Ok(StateMachinePage {
            state_machines: response
                .state_machines
                .into_iter()
                .map(|sm| StateMachineSummary {
                    name: sm.name,
                    arn:  sm.state_machine_arn,
                })
                .collect(),
            next_token:     response.next_token,
        })
    }

    async fn start_execution(
        &self,
        state_machine_arn: &str,
        name: &str,
        input: &str,
    ) -> Result<String> {
        let response = self
            .client
            .start_execution(StartExecutionInput {
                state_machine_arn: state_machine_arn.to_owned(),
                name: Some(name.to_owned()),
                input: Some(input.to_owned()),
                ..Default::default()
            })
            .await?;
        Ok(response.execution_arn)
    }

    async fn describe_execution(&self, execution_arn: &str) -> Result<ExecutionDescription> {
        let response = self
            .client
            .describe_execution(DescribeExecutionInput {
                execution_arn: execution_arn.to_owned(),
            })
            .await?;

        let status = ExecutionStatus::from_wire(&response.status);
        let mut description = ExecutionDescription::new(status);
        description.output = response.output;

        // The describe call doesn't carry the failure reason; it sits on the
        // final `ExecutionFailed` history event.
        if description.status == ExecutionStatus::Failed {
            debug!("Fetching failure details of {}", execution_arn);
            let latest = self
                .get_execution_history(execution_arn, 1, true)
                .await?
                .into_iter()
                .next()
                .and_then(|event| event.failure);
            if let Some(details) = latest {
                description.error = details.error;
                description.cause = details.cause;
            }
        }

        Ok(description)
    }

    async fn get_execution_history(
        &self,
        execution_arn: &str,
        max_results: i64,
        reverse_order: bool,
    ) -> Result<Vec<HistoryEvent>> {
        let response = self
            .client
            .get_execution_history(GetExecutionHistoryInput {
                execution_arn: execution_arn.to_owned(),
                max_results: Some(max_results),
                reverse_order: Some(reverse_order),
                ..Default::default()
            })
            .await?;

        response.events.into_iter().map(into_history_event).collect()
    }
}

/// Converts a rusoto history event, keeping the error and cause of failure
/// events only.
fn into_history_event(event: rusoto_stepfunctions::HistoryEvent) -> Result<HistoryEvent> {
    let timestamp = epoch_to_utc(event.timestamp)?;

    macro_rules! details {
        ($field:ident) => {
            event.$field.map(|d| FailureDetails::new(d.error, d.cause))
        };
    }

    let failure = match event.type_.as_str() {
        "ExecutionFailed" => details!(execution_failed_event_details),
        "TaskFailed" => details!(task_failed_event_details),
        "TaskStartFailed" => details!(task_start_failed_event_details),
        "TaskSubmitFailed" => details!(task_submit_failed_event_details),
        "LambdaFunctionFailed" => details!(lambda_function_failed_event_details),
        "LambdaFunctionStartFailed" => details!(lambda_function_start_failed_event_details),
        "LambdaFunctionScheduleFailed" => details!(lambda_function_schedule_failed_event_details),
        "ActivityFailed" => details!(activity_failed_event_details),
        "ActivityScheduleFailed" => details!(activity_schedule_failed_event_details),
        // Other failure types (e.g. `MapIterationFailed`) carry no error or cause.
        _ => None,
    }
    .filter(|d| !d.is_empty());

    Ok(HistoryEvent {
        timestamp,
        event_type: event.type_,
        failure,
    })
}

/// Step Functions reports timestamps as fractional epoch seconds.
fn epoch_to_utc(seconds: f64) -> Result<DateTime<Utc>> {
    let secs = seconds.trunc() as i64;
    let nanos = (seconds.fract() * 1e9).round().min(999_999_999.0) as u32;
    Utc.timestamp_opt(secs, nanos).single().ok_or_else(|| {
        StepwatchError::Transport(format!("invalid event timestamp: {}", seconds))
    })
}
