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

//! `stepwatch list [PATTERN]`: lists the state machines of the account.

use crate::rainbow::rainbow_println;
use anyhow::Result;
use clap::{App, Arg, ArgMatches};
use rusoto_core::Region;
use stepwatch::prelude::*;

pub fn command_args() -> App<'static> {
    App::new("list")
        .about("Lists the AWS Step Functions state machines")
        .arg(
            Arg::new("pattern")
                .value_name("PATTERN")
                .help("Only lists state machines whose name contains PATTERN")
                .index(1),
        )
}

pub async fn command(matches: &ArgMatches, silent: bool) -> Result<()> {
    let service = RusotoStepFunctions::new(Region::default());
    let names = matching_names(&service, matches.value_of("pattern")).await?;

    if silent {
        return Ok(());
    }
    if names.is_empty() {
        rainbow_println("No state machines found.");
    } else {
        rainbow_println(names.join("\n"));
    }

    Ok(())
}

/// Lists state machine names containing `pattern`, or all of them.
async fn matching_names<S: StepFunctionsService + ?Sized>(
    service: &S,
    pattern: Option<&str>,
) -> Result<Vec<String>> {
    Ok(list_state_machines(service)
        .await?
        .into_iter()
        .map(|sm| sm.name)
        .filter(|name| pattern.map_or(true, |p| name.contains(p)))
        .collect())
}
