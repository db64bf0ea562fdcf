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

//! PerfScore Core
//!
//! Turns per-module benchmark tables into percentage scores relative to a
//! baseline machine.
//!
//! ## Features
//!
//! - **Table loading**: first HTML `<table>` of `<perf_dir>/<module>.html`
//! - **Column classification**: baseline and comparison halves, device labels
//! - **Aggregation**: arithmetic or grouped geometric means, summary row
//! - **Reports**: Markdown file, aligned console table
//! - **Figures**: one SVG bar chart per report row
//!
//! ## Usage
//!
//! ```no_run
//! use perfscore_core::{pipeline, AggregationMode, ScoreConfig};
//!
//! let config = ScoreConfig::default()
//!     .with_perf_dir("perf")
//!     .with_mode(AggregationMode::Geometric);
//! let summary = pipeline::run(&config)?;
//! println!("{}", summary.report.to_console());
//! # Ok::<(), perfscore_core::ScoreError>(())
//! ```

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod figure;
pub mod measurement;
pub mod pipeline;
pub mod report;
pub mod table;

pub use aggregate::{
    aggregate, AggregationMode, GroupRule, ModuleScores, ScoreMatrix, ScoreMatrixBuilder,
};
pub use classify::{classify, ColumnLayout, ComparisonColumn, DeviceType};
pub use config::{ScoreConfig, DEFAULT_MODULES, DEFAULT_PERF_DIR};
pub use error::{Result, ScoreError};
pub use figure::{render_figures, Architecture, ProcessorDescriptor};
pub use measurement::Measurement;
pub use pipeline::{run, RunSummary, SkippedModule};
pub use report::{ReportRow, ReportTable};
pub use table::{BenchmarkTable, TableLoader};
