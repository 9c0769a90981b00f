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

//! Stepwatch error types

use std::error;
use std::fmt::{Display, Formatter};
use std::io;
use std::result;

/// Result type for operations that could result in a [StepwatchError]
pub type Result<T> = result::Result<T, StepwatchError>;

/// Stepwatch error
#[derive(Debug)]
pub enum StepwatchError {
    /// A required command-line argument is missing.
    Usage(String),
    /// No state machine carries the requested name. `available` holds every
    /// name the service listed, which may be empty.
    Resolution {
        /// The name that was looked up.
        name:      String,
        /// The names of all listed state machines.
        available: Vec<String>,
    },
    /// Error returned when a call to AWS Step Functions fails, or when the
    /// service answers with something we cannot interpret.
    Transport(String),
    /// Error returned when the configuration file is missing a key or holds
    /// an unparseable value.
    Config(String),
    /// Error associated to I/O operations and associated traits.
    IoError(io::Error),
    /// Error returned when serde_json failed to serialize or deserialize data.
    SerdeJson(serde_json::Error),
}

impl From<io::Error> for StepwatchError {
    fn from(e: io::Error) -> Self {
        StepwatchError::IoError(e)
    }
}

impl From<serde_json::Error> for StepwatchError {
    fn from(e: serde_json::Error) -> Self {
        StepwatchError::SerdeJson(e)
    }
}

impl From<ini::Error> for StepwatchError {
    fn from(e: ini::Error) -> Self {
        StepwatchError::Config(e.to_string())
    }
}

impl From<ini::ParseError> for StepwatchError {
    fn from(e: ini::ParseError) -> Self {
        StepwatchError::Config(e.to_string())
    }
}

impl<E: error::Error + 'static> From<rusoto_core::RusotoError<E>> for StepwatchError {
    fn from(e: rusoto_core::RusotoError<E>) -> Self {
        StepwatchError::Transport(e.to_string())
    }
}

impl Display for StepwatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            StepwatchError::Usage(ref desc) => write!(f, "{}", desc),
            StepwatchError::Resolution {
                ref name,
                ref available,
            } => {
                write!(f, "State machine '{}' not found", name)?;
                write!(f, "\nAvailable state machines:")?;
                for sm in available {
                    write!(f, "\n  - {}", sm)?;
                }
                Ok(())
            }
            StepwatchError::Transport(ref desc) => write!(f, "AWS error: {}", desc),
            StepwatchError::Config(ref desc) => write!(f, "Configuration error: {}", desc),
            StepwatchError::IoError(ref desc) => write!(f, "IO error: {}", desc),
            StepwatchError::SerdeJson(ref desc) => write!(f, "serde_json error: {:?}", desc),
        }
    }
}

impl error::Error for StepwatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_lists_alternatives() {
        let err = StepwatchError::Resolution {
            name:      "docdb-autoscaling-test-dev".to_string(),
            available: vec!["orders".to_string(), "docdb-autoscaling-test-main".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "State machine 'docdb-autoscaling-test-dev' not found\n\
             Available state machines:\n  - orders\n  - docdb-autoscaling-test-main"
        );
    }

    #[test]
    fn resolution_error_with_empty_listing() {
        let err = StepwatchError::Resolution {
            name:      "missing".to_string(),
            available: vec![],
        };
        assert_eq!(
            err.to_string(),
            "State machine 'missing' not found\nAvailable state machines:"
        );
    }
}
