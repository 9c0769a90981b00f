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

//! `stepwatch run <ENVIRONMENT>`: starts the auto-scaling test and watches it
//! to the end.

use crate::rainbow::rainbow_println;
use anyhow::Result;
use chrono::Utc;
use clap::{App, Arg, ArgMatches};
use log::info;
use rusoto_core::Region;
use stepwatch::prelude::*;

pub fn command_args() -> App<'static> {
    App::new("run")
        .about("Runs the DocumentDB auto scaling test state machine")
        .arg(
            Arg::new("environment")
                .value_name("ENVIRONMENT")
                .help("The environment to test, e.g. main")
                .index(1),
        )
}

pub async fn command(settings: &Settings, matches: &ArgMatches, silent: bool) -> Result<()> {
    let environment = match matches.value_of("environment") {
        Some(environment) => environment,
        None => {
            return Err(StepwatchError::Usage(
                "Usage: stepwatch run <ENVIRONMENT>\nExample: stepwatch run main".to_string(),
            )
            .into())
        }
    };

    let region = Region::default();
    let service = RusotoStepFunctions::new(region.clone());
    let report = run(&service, settings, environment).await?;

    report_result(&report.result)?;
    info!("Recent events:");
    for event in &report.events {
        info!("  {}", event);
    }

    if !silent {
        let url = execution_url(&settings.console_url, region.name(), &report.execution_arn);
        for line in closing_lines(&report, &url) {
            rainbow_println(line);
        }
    }

    Ok(())
}

/// The lines printed once the run is over.
fn closing_lines(report: &RunReport, url: &str) -> Vec<String> {
    let verdict = if report.result.succeeded() {
        "\nTest completed and the execution succeeded.".to_string()
    } else {
        format!(
            "\nTest completed, but the execution ended with status {}.",
            report.status()
        )
    };
    vec![
        format!("{} Check the AWS Console for detailed results:", verdict),
        format!("Step Functions: {}", url),
    ]
}

/// What `run` hands back to the console layer.
pub struct RunReport {
    pub execution_arn: String,
    pub result:        ExecutionResult,
    pub events:        Vec<HistoryEvent>,
}

impl RunReport {
    pub fn status(&self) -> ExecutionStatus {
        self.result.status()
    }
}

/// Resolves, starts and monitors one test execution, then fetches its recent
/// history.
///
/// The workflow's own outcome doesn't turn into an error: a `FAILED`
/// execution is a successful run of this command.
pub async fn run<S: StepFunctionsService + ?Sized>(
    service: &S,
    settings: &Settings,
    environment: &str,
) -> Result<RunReport> {
    let arn = resolve_state_machine(service, &settings.state_machine_name(environment)).await?;
    info!("Found Step Function: {}", arn);

    let started = start_test_execution(service, settings, &arn, environment, Utc::now()).await?;

    info!("Monitoring execution...");
    let result = ExecutionMonitor::new(service, settings.poll_interval)
        .poll(&started.execution_arn)
        .await?;

    info!("Getting execution history...");
    let events = HistoryReporter::new(service, settings.history_fetch_limit)
        .summarize(&started.execution_arn, settings.history_display_limit)
        .await?;

    Ok(RunReport {
        execution_arn: started.execution_arn,
        result,
        events,
    })
}

fn report_result(result: &ExecutionResult) -> Result<()> {
    if let Some(output) = result.output() {
        info!("Output:\n{}", serde_json::to_string_pretty(output)?);
    }
    if let Some(error) = result.error() {
        info!("Error:\n{}", error.error);
        info!("Cause:\n{}", error.cause.as_deref().unwrap_or("Unknown"));
    }
    Ok(())
}
