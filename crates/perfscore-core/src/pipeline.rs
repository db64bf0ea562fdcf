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

//! One scoring run, from benchmark tables to report files.

use crate::aggregate::ScoreMatrixBuilder;
use crate::config::ScoreConfig;
use crate::error::{Result, ScoreError};
use crate::figure::{render_figures, ProcessorDescriptor};
use crate::report::ReportTable;
use crate::table::TableLoader;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A module that could not be loaded.
#[derive(Debug)]
pub struct SkippedModule {
    /// Module name
    pub module: String,
    /// Why it was skipped
    pub error: ScoreError,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunSummary {
    /// The report as written.
    pub report: ReportTable,
    /// Markdown file path.
    pub output: PathBuf,
    /// Figure files, empty unless figures were requested.
    pub figures: Vec<PathBuf>,
    /// Modules that were requested but skipped.
    pub skipped: Vec<SkippedModule>,
}

impl RunSummary {
    /// Number of modules that made it into the report.
    pub fn module_count(&self) -> usize {
        self.report.rows.len().saturating_sub(1)
    }
}

/// Executes a scoring run.
///
/// The steps are, in order:
///
/// 1. In figure mode, load the processor descriptor
/// 2. Load every requested module, skipping recoverable failures
/// 3. Aggregate the loaded tables
/// 4. Write the Markdown report
/// 5. In figure mode, render one figure per report row
///
/// Nothing is written before the descriptor and all tables have been read.
///
/// # Errors
///
/// - [`ScoreError::DescriptorMissing`] / [`ScoreError::Descriptor`] in figure mode
/// - [`ScoreError::NoData`] if no module could be loaded
/// - [`ScoreError::HeaderFormat`] if a table's columns cannot be classified
/// - [`ScoreError::Io`] if an output file cannot be written
pub fn run(config: &ScoreConfig) -> Result<RunSummary> {
    let descriptor = if config.figure {
        Some(ProcessorDescriptor::load(&config.descriptor)?)
    } else {
        None
    };

    let loader = TableLoader::new(&config.perf_dir);
    let mut builder = ScoreMatrixBuilder::new(config.mode).with_group_rule(config.group_rule);
    let mut skipped = Vec::new();

    for module in &config.modules {
        match loader.load(module) {
            Ok(table) => {
                debug!(
                    module = module.as_str(),
                    rows = table.row_count(),
                    columns = table.column_count(),
                    "loaded benchmark table"
                );
                builder.add_table(&table)?;
            }
            Err(e) if e.is_recoverable() => {
                warn!(module = module.as_str(), error = %e, "skipping module");
                skipped.push(SkippedModule {
                    module: module.clone(),
                    error: e,
                });
            }
            Err(e) => return Err(e),
        }
    }

    if builder.module_count() == 0 {
        return Err(ScoreError::NoData {
            attempted: config.modules.len(),
        });
    }

    let matrix = builder.build();
    info!(
        modules = matrix.modules().len(),
        devices = matrix.devices().len(),
        mode = %matrix.mode(),
        "aggregated scores"
    );

    let report = ReportTable::from_matrix(&matrix);
    let output = config.output_path();
    report.save_markdown(&output)?;

    let figures = match &descriptor {
        Some(descriptor) => render_figures(&report, descriptor, config.figure_path())?,
        None => Vec::new(),
    };

    Ok(RunSummary {
        report,
        output,
        figures,
        skipped,
    })
}
