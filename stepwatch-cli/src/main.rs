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

mod args;
mod list;
mod rainbow;
mod run;

use anyhow::Result;
use clap::{crate_version, App, ArgMatches};
use log::error;
use rainbow::rainbow_println;
use stepwatch::config::Settings;
use stepwatch::error::StepwatchError;

#[tokio::main]
pub async fn main() -> Result<()> {
    let mut app = App::new("stepwatch")
        .version(crate_version!())
        .about("Triggers and monitors the DocumentDB auto scaling test on AWS Step Functions")
        .author("UMD Database Group")
        .args(args::get_args())
        .subcommand(run::command_args())
        .subcommand(list::command_args());
    let usage = app.render_usage();
    let matches = app.get_matches();

    args::get_logging(&matches)?.init();

    let result = dispatch(&matches, usage).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

async fn dispatch(matches: &ArgMatches, usage: String) -> Result<()> {
    let settings = Settings::load(matches.value_of("config"))?;
    let silent = args::is_silent(matches);

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            if !silent {
                rainbow_println(include_str!("./banner"));
            }
            run::command(&settings, run_matches, silent).await?;
        }
        Some(("list", list_matches)) => {
            list::command(list_matches, silent).await?;
        }
        _ => {
            return Err(StepwatchError::Usage(usage).into());
        }
    }

    Ok(())
}
