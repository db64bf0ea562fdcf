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

//! PerfScore CLI library.
//!
//! Argument parsing, logging setup and execution for the `perfscore`
//! command. The scoring itself lives in `perfscore-core`.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use perfscore_cli::cli::Args;
//!
//! let args = Args::parse_from(["perfscore", "--modules", "core", "imgproc"]);
//! perfscore_cli::init_logging(args.log_directive()).unwrap();
//! args.execute().unwrap();
//! ```

pub mod cli;
pub mod error;

pub use cli::Args;
pub use error::CliError;

use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` is used.
///
/// # Errors
///
/// Returns [`CliError::Logging`] if the directive is invalid or a global
/// subscriber is already installed.
pub fn init_logging(default_directive: &str) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| CliError::Logging(e.to_string()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
