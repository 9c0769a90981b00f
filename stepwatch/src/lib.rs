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

#![warn(missing_docs, clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]

//! Stepwatch triggers the DocumentDB auto-scaling test state machine on AWS
//! Step Functions, watches the execution until it ends and reports its most
//! recent history events.

pub mod aws;
pub mod config;
pub mod console;
pub mod error;
pub mod execution;
pub mod history;
pub mod launcher;
pub mod monitor;
pub mod prelude;
pub mod resolver;
#[cfg(test)]
#[allow(missing_docs)]
pub mod test_util;
