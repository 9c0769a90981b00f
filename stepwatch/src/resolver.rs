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

//! Finds state machines by name.

use crate::aws::{StateMachineSummary, StepFunctionsService};
use crate::error::{Result, StepwatchError};
use log::debug;

/// Lists all state machines, following the pagination tokens until the last
/// page.
pub async fn list_state_machines<S: StepFunctionsService + ?Sized>(
    service: &S,
) -> Result<Vec<StateMachineSummary>> {
    let mut state_machines = vec![];
    let mut next_token = None;

    loop {
        let page = service.list_state_machines(next_token).await?;
        debug!("Listed {} state machines", page.state_machines.len());
        state_machines.extend(page.state_machines);
        if page.next_token.is_none() {
            break;
        }
        next_token = page.next_token;
    }

    Ok(state_machines)
}

/// Returns the ARN of the state machine called `name`.
///
/// If none matches, the error lists the names of all state machines found.
pub async fn resolve_state_machine<S: StepFunctionsService + ?Sized>(
    service: &S,
    name: &str,
) -> Result<String> {
    let state_machines = list_state_machines(service).await?;

    match state_machines.iter().find(|sm| sm.name == name) {
        Some(sm) => Ok(sm.arn.clone()),
        None => Err(StepwatchError::Resolution {
            name:      name.to_owned(),
            available: state_machines.into_iter().map(|sm| sm.name).collect(),
        }),
    }
}
