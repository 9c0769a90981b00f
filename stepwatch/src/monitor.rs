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

//! Polls an execution until it reaches a terminal status.

use crate::aws::StepFunctionsService;
use crate::error::Result;
use crate::execution::ExecutionResult;
use log::info;
use std::time::Duration;

/// Polls the status of one execution at a fixed interval.
///
/// There is no upper bound on how long an execution is watched: polling ends
/// when a terminal status is seen, when a status query fails, or when the
/// process is interrupted.
pub struct ExecutionMonitor<'a, S: StepFunctionsService + ?Sized> {
    service:  &'a S,
    interval: Duration,
}

impl<'a, S: StepFunctionsService + ?Sized> ExecutionMonitor<'a, S> {
    /// Creates a monitor that waits `interval` between two status queries.
    pub fn new(service: &'a S, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Blocks until the execution leaves `RUNNING` and returns its result.
    ///
    /// A failed status query ends polling with that error; it is not retried.
    pub async fn poll(&self, execution_arn: &str) -> Result<ExecutionResult> {
        loop {
            let description = self.service.describe_execution(execution_arn).await?;
            info!("Status: {}", description.status);

            if description.status.is_terminal() {
                info!("Execution completed with status: {}", description.status);
                return Ok(ExecutionResult::from_terminal(description));
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StepwatchError;
    use crate::execution::{ExecutionDescription, ExecutionStatus};
    use crate::test_util::FakeStepFunctions;
    use serde_json::json;

    const EXEC: &str = "arn:aws:states:us-east-1:123456789012:execution:docdb-autoscaling-test-main:t";
    const INTERVAL: Duration = Duration::from_secs(30);

    fn running() -> ExecutionDescription {
        ExecutionDescription::new(ExecutionStatus::Running)
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_every_terminal_status() -> Result<()> {
        for status in [
            ExecutionStatus::Succeeded,
            ExecutionStatus::Failed,
            ExecutionStatus::TimedOut,
            ExecutionStatus::Aborted,
        ] {
            // A second status is scripted; it must never be asked for.
            let service = FakeStepFunctions::default()
                .with_statuses(vec![ExecutionDescription::new(status), running()]);

            let result = ExecutionMonitor::new(&service, INTERVAL).poll(EXEC).await?;

            assert_eq!(status, result.status());
            assert_eq!(1, service.describe_calls().len());
        }

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn one_query_per_interval_while_running() -> Result<()> {
        let service = FakeStepFunctions::default().with_statuses(vec![
            running(),
            running(),
            running(),
            ExecutionDescription::new(ExecutionStatus::Succeeded),
        ]);

        let start = tokio::time::Instant::now();
        let result = ExecutionMonitor::new(&service, INTERVAL).poll(EXEC).await?;

        assert_eq!(ExecutionStatus::Succeeded, result.status());
        let calls = service.describe_calls();
        assert_eq!(4, calls.len());
        assert_eq!(start, calls[0]);
        for pair in calls.windows(2) {
            assert_eq!(INTERVAL, pair[1] - pair[0]);
        }

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn failed_execution_carries_error_and_cause() -> Result<()> {
        let service = FakeStepFunctions::default().with_statuses(vec![
            running(),
            ExecutionDescription {
                status: ExecutionStatus::Failed,
                output: None,
                error:  Some("States.TaskFailed".to_string()),
                cause:  Some("lambda timeout".to_string()),
            },
        ]);

        let result = ExecutionMonitor::new(&service, INTERVAL).poll(EXEC).await?;

        let error = result.error().expect("error is attached");
        assert_eq!("States.TaskFailed", error.error);
        assert_eq!(Some("lambda timeout"), error.cause.as_deref());
        assert_eq!(None, result.output());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn succeeded_execution_carries_output() -> Result<()> {
        let mut done = ExecutionDescription::new(ExecutionStatus::Succeeded);
        done.output = Some(r#"{"passed": true}"#.to_string());
        let service = FakeStepFunctions::default().with_statuses(vec![done]);

        let result = ExecutionMonitor::new(&service, INTERVAL).poll(EXEC).await?;

        assert_eq!(Some(&json!({"passed": true})), result.output());
        assert_eq!(None, result.error());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn query_error_is_not_retried() {
        let service = FakeStepFunctions::default()
            .with_statuses(vec![running()])
            .with_status_error("ThrottlingException")
            .with_statuses(vec![ExecutionDescription::new(ExecutionStatus::Succeeded)]);

        let err = ExecutionMonitor::new(&service, INTERVAL)
            .poll(EXEC)
            .await
            .unwrap_err();

        assert!(matches!(err, StepwatchError::Transport(ref msg) if msg == "ThrottlingException"));
        assert_eq!(2, service.describe_calls().len());
    }
}
