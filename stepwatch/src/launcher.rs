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

//! Starts a test execution of the auto-scaling state machine.

use crate::aws::StepFunctionsService;
use crate::config::Settings;
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use serde::{Deserialize, Serialize};

/// The input document of a test execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestInput {
    /// Unique test identifier, `<prefix>-<unix seconds>`.
    pub test_id:         String,
    /// ISO-8601 UTC start time.
    pub test_start_time: String,
    /// The target environment.
    pub environment:     String,
    /// Free-form description.
    pub description:     String,
}

impl TestInput {
    /// Generates the input for a test started at `now`.
    pub fn new(settings: &Settings, environment: &str, now: DateTime<Utc>) -> Self {
        Self {
            test_id:         format!("{}-{}", settings.test_id_prefix, now.timestamp()),
            test_start_time: now.to_rfc3339_opts(SecondsFormat::Micros, true),
            environment:     environment.to_owned(),
            description:     settings.test_description.clone(),
        }
    }
}

/// A freshly started execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedExecution {
    /// The execution ARN returned by the service.
    pub execution_arn:  String,
    /// The generated execution name.
    pub execution_name: String,
    /// The input the execution was started with.
    pub input:          TestInput,
}

/// Starts the state machine with a generated test input.
///
/// # Arguments
/// * `service` - The Step Functions service.
/// * `settings` - Naming and description settings.
/// * `state_machine_arn` - The state machine to start.
/// * `environment` - The target environment, copied into the input.
/// * `now` - The test start time.
pub async fn start_test_execution<S: StepFunctionsService + ?Sized>(
    service: &S,
    settings: &Settings,
    state_machine_arn: &str,
    environment: &str,
    now: DateTime<Utc>,
) -> Result<StartedExecution> {
    let input = TestInput::new(settings, environment, now);
    let execution_name = format!("{}-{}", settings.execution_prefix, now.timestamp());

    info!("Starting execution: {}", execution_name);
    info!("Input: {}", serde_json::to_string_pretty(&input)?);

    let execution_arn = service
        .start_execution(
            state_machine_arn,
            &execution_name,
            &serde_json::to_string(&input)?,
        )
        .await?;
    info!("Execution started: {}", execution_arn);

    Ok(StartedExecution {
        execution_arn,
        execution_name,
        input,
    })
}
