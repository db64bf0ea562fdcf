// Dweve PerfScore - Benchmark Score Aggregation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the PerfScore CLI.

use perfscore_core::ScoreError;
use thiserror::Error;

/// Errors surfaced by the `perfscore` command.
///
/// Every variant is fatal; `main` prints it as `Error: <message>` and exits
/// with status 1.
#[derive(Error, Debug)]
pub enum CliError {
    /// A scoring run failed.
    #[error(transparent)]
    Score(#[from] ScoreError),

    /// The log filter could not be built or installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_error_message_is_kept() {
        let err = CliError::from(ScoreError::NoData { attempted: 3 });
        assert_eq!(
            err.to_string(),
            "no benchmark data could be loaded (tried 3 module(s))"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_logging_message() {
        let err = CliError::Logging("already set".to_string());
        assert!(err.to_string().contains("already set"));
    }
}
