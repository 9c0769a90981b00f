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

//! Configuration settings for the auto-scaling test runner.
//!
//! The defaults ship inside the binary. A custom file in the same format can
//! be passed on the command line and replaces them wholesale.

use crate::error::{Result, StepwatchError};
use humantime::parse_duration;
use ini::Ini;
use lazy_static::lazy_static;
use std::path::Path;
use std::time::Duration;

lazy_static! {
    /// Global settings.
    pub static ref STEPWATCH_CONF: Ini = Ini::load_from_str(include_str!("./config.toml"))
        .expect("embedded config.toml is well-formed");
}

/// Typed view of the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Prefix of the state machine name; the environment is appended.
    pub state_machine_prefix:  String,
    /// Base URL of the Step Functions console.
    pub console_url:           String,
    /// Time between two status queries.
    pub poll_interval:         Duration,
    /// How many history events to request from the service.
    pub history_fetch_limit:   i64,
    /// How many of the fetched events to show.
    pub history_display_limit: usize,
    /// Prefix of the generated `testId`.
    pub test_id_prefix:        String,
    /// Prefix of the generated execution name.
    pub execution_prefix:      String,
    /// Free-form description sent with the test input.
    pub test_description:      String,
}

impl Settings {
    /// Loads the settings from `path`, or the embedded defaults if `None`.
    pub fn load(path: Option<&str>) -> Result<Settings> {
        match path {
            Some(path) => {
                if !Path::new(path).exists() {
                    return Err(StepwatchError::Config(format!(
                        "config file {} doesn't exist",
                        path
                    )));
                }
                Settings::from_ini(&Ini::load_from_file(path)?)
            }
            None => Settings::from_ini(&STEPWATCH_CONF),
        }
    }

    /// Builds the settings from a parsed ini document.
    pub fn from_ini(conf: &Ini) -> Result<Settings> {
        let poll_interval = lookup(conf, "monitor", "poll_interval")?;
        let poll_interval = parse_duration(poll_interval).map_err(|e| {
            StepwatchError::Config(format!("monitor.poll_interval ({}): {}", poll_interval, e))
        })?;
        if poll_interval.is_zero() {
            return Err(StepwatchError::Config(
                "monitor.poll_interval must be greater than zero".to_string(),
            ));
        }

        let history_fetch_limit: i64 = parse_number(conf, "history", "fetch_limit")?;
        if history_fetch_limit <= 0 {
            return Err(StepwatchError::Config(format!(
                "history.fetch_limit must be positive, got {}",
                history_fetch_limit
            )));
        }

        Ok(Settings {
            state_machine_prefix: lookup(conf, "stepfunctions", "state_machine_prefix")?.to_owned(),
            console_url: lookup(conf, "stepfunctions", "console_url")?.to_owned(),
            poll_interval,
            history_fetch_limit,
            history_display_limit: parse_number(conf, "history", "display_limit")?,
            test_id_prefix: lookup(conf, "test", "id_prefix")?.to_owned(),
            execution_prefix: lookup(conf, "test", "execution_prefix")?.to_owned(),
            test_description: lookup(conf, "test", "description")?.to_owned(),
        })
    }

    /// Returns the state machine name for the given environment.
    pub fn state_machine_name(&self, environment: &str) -> String {
        format!("{}-{}", self.state_machine_prefix, environment)
    }
}

fn lookup<'a>(conf: &'a Ini, section: &str, key: &str) -> Result<&'a str> {
    conf.section(Some(section))
        .and_then(|props| props.get(key))
        .ok_or_else(|| StepwatchError::Config(format!("missing {}.{}", section, key)))
}

fn parse_number<T: std::str::FromStr>(conf: &Ini, section: &str, key: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let value = lookup(conf, section, key)?;
    value
        .parse::<T>()
        .map_err(|e| StepwatchError::Config(format!("{}.{} ({}): {}", section, key, value, e)))
}
