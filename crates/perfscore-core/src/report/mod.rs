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

//! Score report assembly and rendering.
//!
//! A [`ReportTable`] is the display form of a [`ScoreMatrix`]: one row per
//! module plus the summary row, one column per device. Values stay unrounded
//! inside the table; the renderers format them to two decimals.
//!
//! # Modules
//!
//! - `markdown`: Markdown export and re-parsing
//! - `console`: aligned plain-text rendering

pub mod console;
pub mod markdown;

pub use console::print_report;
pub use markdown::parse_markdown;

use crate::aggregate::{AggregationMode, ScoreMatrix};
use crate::classify::DeviceType;

/// Header of the label column.
pub const LABEL_HEADER: &str = "Module";

/// Text rendered for a missing score.
pub const MISSING: &str = "N/A";

/// Decimal places used when displaying scores.
pub const PRECISION: usize = 2;

/// Formats a score for display.
///
/// # Examples
///
/// ```
/// use perfscore_core::report::format_score;
///
/// assert_eq!(format_score(Some(98.754)), "98.75");
/// assert_eq!(format_score(None), "N/A");
/// assert_eq!(format_score(Some(f64::NAN)), "N/A");
/// ```
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) if value.is_finite() => format!("{:.*}", PRECISION, value),
        _ => MISSING.to_string(),
    }
}

/// One labelled row of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Module name, or the summary label for the last row.
    pub label: String,
    /// One cell per device column.
    pub cells: Vec<Option<f64>>,
}

/// Display table of a scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    /// Device columns, in first-seen order.
    pub devices: Vec<DeviceType>,
    /// Module rows followed by the summary row.
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Builds the report of a matrix, appending the summary row.
    pub fn from_matrix(matrix: &ScoreMatrix) -> Self {
        let devices = matrix.devices().to_vec();
        let mut rows: Vec<ReportRow> = matrix
            .modules()
            .iter()
            .map(|m| ReportRow {
                label: m.module.clone(),
                cells: devices.iter().map(|d| m.scores.get(d).copied()).collect(),
            })
            .collect();

        rows.push(ReportRow {
            label: matrix.mode().summary_label().to_string(),
            cells: matrix.summary().into_iter().map(|(_, s)| s).collect(),
        });

        Self { devices, rows }
    }

    /// Column headers, label column first.
    pub fn headers(&self) -> Vec<String> {
        std::iter::once(LABEL_HEADER.to_string())
            .chain(self.devices.iter().map(|d| d.to_string()))
            .collect()
    }

    /// The trailing summary row.
    pub fn summary(&self) -> Option<&ReportRow> {
        self.rows.last()
    }

    /// Looks a row up by label.
    pub fn row(&self, label: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Value of one cell.
    pub fn value(&self, label: &str, device: &DeviceType) -> Option<f64> {
        let column = self.devices.iter().position(|d| d == device)?;
        self.row(label)?.cells.get(column).copied().flatten()
    }

    /// Copy with every value rounded exactly as the renderers display it.
    pub fn rounded(&self) -> Self {
        Self {
            devices: self.devices.clone(),
            rows: self
                .rows
                .iter()
                .map(|r| ReportRow {
                    label: r.label.clone(),
                    cells: r
                        .cells
                        .iter()
                        .map(|c| format_score(*c).parse::<f64>().ok())
                        .collect(),
                })
                .collect(),
        }
    }

    /// Returns true if the summary row carries the label of `mode`.
    pub fn has_summary_for(&self, mode: AggregationMode) -> bool {
        self.summary()
            .map(|r| r.label == mode.summary_label())
            .unwrap_or(false)
    }
}
