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

//! Command-line arguments and command execution.

use crate::error::CliError;
use clap::Parser;
use perfscore_core::report::print_report;
use perfscore_core::{pipeline, AggregationMode, ScoreConfig};
use std::path::PathBuf;
use tracing::info;

/// Default log directive when `RUST_LOG` is unset.
pub const DEFAULT_LOG: &str = "perfscore=info";

/// PerfScore - benchmark score aggregation
///
/// Reads `<perf-dir>/<module>.html` benchmark tables, scores every target
/// device against the baseline (100 = parity) and writes a Markdown summary.
///
/// # Examples
///
/// ```bash
/// # Score the default modules
/// perfscore
///
/// # Geometric scoring of two modules with figures
/// perfscore --mode geometric --modules core imgproc --figure
/// ```
#[derive(Parser, Debug, Clone)]
#[command(name = "perfscore")]
#[command(author, version, about = "PerfScore - benchmark score aggregation", long_about = None)]
pub struct Args {
    /// Markdown output file [default: scores.md, or score.md in geometric mode]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Modules to score, in report order
    #[arg(short, long, num_args = 1.., value_name = "MODULE")]
    pub modules: Vec<String>,

    /// Render one bar chart per report row, written as <label>.svg (SVG, not PNG)
    #[arg(long)]
    pub figure: bool,

    /// Aggregation mode: arithmetic or geometric
    #[arg(long, default_value = "arithmetic", value_name = "MODE")]
    pub mode: AggregationMode,

    /// Directory holding the benchmark tables
    #[arg(long, default_value = perfscore_core::DEFAULT_PERF_DIR, value_name = "DIR")]
    pub perf_dir: PathBuf,

    /// Processor descriptor used for figures
    #[arg(long, default_value = perfscore_core::figure::DEFAULT_DESCRIPTOR, value_name = "PATH")]
    pub descriptor: PathBuf,

    /// Figure output directory [default: the perf directory]
    #[arg(long, value_name = "DIR")]
    pub figure_dir: Option<PathBuf>,

    /// Character splitting test names into groups in geometric mode
    #[arg(long, default_value_t = '_', value_name = "CHAR")]
    pub group_delimiter: char,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log directive selected by `-v` / `-q`.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "perfscore=debug"
        } else if self.quiet {
            "perfscore=warn"
        } else {
            DEFAULT_LOG
        }
    }

    /// Builds the run configuration.
    pub fn to_config(&self) -> ScoreConfig {
        let mut config = ScoreConfig::default()
            .with_perf_dir(&self.perf_dir)
            .with_mode(self.mode)
            .with_figure(self.figure)
            .with_descriptor(&self.descriptor)
            .with_group_delimiter(self.group_delimiter);
        if !self.modules.is_empty() {
            config = config.with_modules(self.modules.iter().cloned());
        }
        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        if let Some(dir) = &self.figure_dir {
            config = config.with_figure_dir(dir);
        }
        config
    }

    /// Runs the scoring pipeline and prints the report to stdout.
    ///
    /// # Errors
    ///
    /// Returns any fatal [`perfscore_core::ScoreError`] from the run.
    pub fn execute(&self) -> Result<(), CliError> {
        let config = self.to_config();
        let summary = pipeline::run(&config)?;

        print_report(&summary.report);
        info!(
            output = %summary.output.display(),
            modules = summary.module_count(),
            skipped = summary.skipped.len(),
            figures = summary.figures.len(),
            "scoring complete"
        );
        Ok(())
    }
}
