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

//! A "prelude" for users of the stepwatch crate.
//!
//! ```
//! use stepwatch::prelude::*;
//! ```

pub use crate::aws::{RusotoStepFunctions, StateMachineSummary, StepFunctionsService};
pub use crate::config::Settings;
pub use crate::console::execution_url;
pub use crate::error::{Result, StepwatchError};
pub use crate::execution::{ExecutionError, ExecutionResult, ExecutionStatus};
pub use crate::history::{FailureDetails, HistoryEvent, HistoryReporter};
pub use crate::launcher::{start_test_execution, StartedExecution, TestInput};
pub use crate::monitor::ExecutionMonitor;
pub use crate::resolver::{list_state_machines, resolve_state_machine};
