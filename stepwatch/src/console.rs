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

//! Links into the AWS console.

/// Returns the Step Functions console page of an execution.
///
/// # Arguments
/// * `base` - The console base URL, e.g. `https://console.aws.amazon.com/states/home`.
/// * `region` - The region name, e.g. `us-east-1`.
/// * `execution_arn` - The execution to link to.
pub fn execution_url(base: &str, region: &str, execution_arn: &str) -> String {
    format!(
        "{}?region={}#/executions/details/{}",
        base.trim_end_matches('/'),
        region,
        execution_arn
    )
}
