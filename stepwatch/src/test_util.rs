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

//! A scripted [`StepFunctionsService`] for unit tests.

use crate::aws::{StateMachinePage, StepFunctionsService};
use crate::error::{Result, StepwatchError};
use crate::execution::ExecutionDescription;
use crate::history::HistoryEvent;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

/// A started execution as seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    pub state_machine_arn: String,
    pub name:              String,
    pub input:             String,
}

/// Answers each call from a script and records what it was asked.
#[derive(Default)]
pub struct FakeStepFunctions {
    pages:            Mutex<VecDeque<StateMachinePage>>,
    statuses:         Mutex<VecDeque<Result<ExecutionDescription>>>,
    history:          Vec<HistoryEvent>,
    fail_start:       bool,
    list_calls:       Mutex<Vec<Option<String>>>,
    started:          Mutex<Vec<StartRequest>>,
    describe_calls:   Mutex<Vec<Instant>>,
    history_requests: Mutex<Vec<(i64, bool)>>,
}

impl FakeStepFunctions {
    pub fn with_pages(self, pages: Vec<StateMachinePage>) -> Self {
        *self.pages.lock().unwrap() = pages.into();
        self
    }

    /// Appends answers to the status script.
    pub fn with_statuses(self, statuses: Vec<ExecutionDescription>) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .extend(statuses.into_iter().map(Ok));
        self
    }

    /// Appends an error answer to the status script.
    pub fn with_status_error(self, msg: &str) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .push_back(Err(StepwatchError::Transport(msg.to_string())));
        self
    }

    /// Events in chronological order.
    pub fn with_history(mut self, history: Vec<HistoryEvent>) -> Self {
        self.history = history;
        self
    }

    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn started(&self) -> Vec<StartRequest> {
        self.started.lock().unwrap().clone()
    }

    pub fn describe_calls(&self) -> Vec<Instant> {
        self.describe_calls.lock().unwrap().clone()
    }

    pub fn history_requests(&self) -> Vec<(i64, bool)> {
        self.history_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StepFunctionsService for FakeStepFunctions {
    async fn list_state_machines(&self, next_token: Option<String>) -> Result<StateMachinePage> {
        self.list_calls.lock().unwrap().push(next_token);
        Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn start_execution(
        &self,
        state_machine_arn: &str,
        name: &str,
        input: &str,
    ) -> Result<String> {
        if self.fail_start {
            return Err(StepwatchError::Transport(
                "ExecutionLimitExceeded".to_string(),
            ));
        }
        self.started.lock().unwrap().push(StartRequest {
            state_machine_arn: state_machine_arn.to_string(),
            name:              name.to_string(),
            input:             input.to_string(),
        });
        Ok(format!("{}:{}", state_machine_arn.replace("stateMachine", "execution"), name))
    }

    async fn describe_execution(&self, _execution_arn: &str) -> Result<ExecutionDescription> {
        self.describe_calls.lock().unwrap().push(Instant::now());
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(StepwatchError::Transport("no scripted status".to_string())))
    }

    async fn get_execution_history(
        &self,
        _execution_arn: &str,
        max_results: i64,
        reverse_order: bool,
    ) -> Result<Vec<HistoryEvent>> {
        self.history_requests
            .lock()
            .unwrap()
            .push((max_results, reverse_order));
        let mut events = self.history.clone();
        if reverse_order {
            events.reverse();
        }
        events.truncate(max_results as usize);
        Ok(events)
    }
}

/// An event `offset` seconds after a fixed start time.
pub fn event_at(offset: i64, event_type: &str) -> HistoryEvent {
    HistoryEvent {
        timestamp:  Utc.timestamp_opt(1_700_000_000 + offset, 0).unwrap(),
        event_type: event_type.to_string(),
        failure:    None,
    }
}
