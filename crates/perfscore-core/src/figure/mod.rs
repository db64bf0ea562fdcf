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

//! Bar-chart figures comparing processors.
//!
//! One figure is produced per report row, summary row included. Every figure
//! starts with the baseline bar at 100 and continues with the descriptor's
//! processors, in descriptor order, that have a score in that row.
//!
//! # Modules
//!
//! - `descriptor`: processor descriptor file and architecture palette
//! - `chart`: SVG bar chart rendering

pub mod chart;
pub mod descriptor;

pub use chart::{Bar, BarChart};
pub use descriptor::{
    Architecture, BaselineProcessor, CoreCount, Processor, ProcessorDescriptor, BASELINE_COLOR,
    DEFAULT_DESCRIPTOR,
};

use crate::aggregate::PERCENT;
use crate::error::{Result, ScoreError};
use crate::report::{ReportRow, ReportTable};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension of rendered figures.
pub const FIGURE_EXTENSION: &str = "svg";

/// Builds the chart of one report row.
///
/// Processors missing from the report, or without a score in this row, are
/// left out.
pub fn chart_for_row(
    report: &ReportTable,
    row: &ReportRow,
    descriptor: &ProcessorDescriptor,
) -> BarChart {
    let mut chart = BarChart::new(row.label.as_str());
    chart.push(
        format!("{}\n{}", descriptor.baseline.name, descriptor.baseline.cores),
        PERCENT,
        BASELINE_COLOR,
    );

    for processor in &descriptor.processors {
        let score = report
            .devices
            .iter()
            .position(|d| d.as_str() == processor.name)
            .and_then(|col| row.cells.get(col).copied().flatten());
        match score {
            Some(value) => chart.push(
                format!("{}\n{}", processor.name, processor.cores),
                value,
                processor.arch.color(),
            ),
            None => debug!(
                row = %row.label,
                processor = %processor.name,
                "no score for processor, bar omitted"
            ),
        }
    }
    chart
}

/// File name of a row's figure; path separators in the label are replaced.
pub fn figure_file_name(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{}.{}", stem, FIGURE_EXTENSION)
}

/// Renders one figure per report row into `out_dir`.
///
/// # Arguments
///
/// * `report` - The score report, summary row included
/// * `descriptor` - Baseline and processor metadata
/// * `out_dir` - Target directory, created if missing
///
/// # Returns
///
/// The written file paths, in row order.
///
/// # Errors
///
/// Returns [`ScoreError::Io`] when the directory or a file cannot be written.
pub fn render_figures(
    report: &ReportTable,
    descriptor: &ProcessorDescriptor,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(|e| ScoreError::io(out_dir, e))?;

    let mut written = Vec::with_capacity(report.rows.len());
    for row in &report.rows {
        let chart = chart_for_row(report, row, descriptor);
        let path = out_dir.join(figure_file_name(&row.label));
        fs::write(&path, chart.to_svg()).map_err(|e| ScoreError::io(&path, e))?;
        debug!(path = %path.display(), bars = chart.bars.len(), "wrote figure");
        written.push(path);
    }

    info!(dir = %out_dir.display(), figures = written.len(), "rendered figures");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DeviceType;

    fn report() -> ReportTable {
        ReportTable {
            devices: vec![DeviceType::new("K230"), DeviceType::new("RK3588")],
            rows: vec![
                ReportRow {
                    label: "core".to_string(),
                    cells: vec![Some(12.5), None],
                },
                ReportRow {
                    label: "Mean".to_string(),
                    cells: vec![Some(12.5), Some(40.0)],
                },
            ],
        }
    }

    fn descriptor(json: &str) -> ProcessorDescriptor {
        ProcessorDescriptor::from_json(json).unwrap()
    }

    const FULL: &str = r#"{
        "baseline": {"Processor": "Xeon", "Cores": 16},
        "processors": [
            {"Processor": "RK3588", "Cores": 8, "Arch": "ARM"},
            {"Processor": "Ghost", "Cores": 4, "Arch": "x86_64"},
            {"Processor": "K230", "Cores": 2, "Arch": "RISC-V"}
        ]
    }"#;

    #[test]
    fn test_chart_follows_descriptor_order() {
        let report = report();
        let chart = chart_for_row(&report, &report.rows[1], &descriptor(FULL));
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Xeon\n16", "RK3588\n8", "K230\n2"]);
        assert_eq!(chart.bars[0].value, 100.0);
        assert_eq!(chart.bars[0].color, "gray");
        assert_eq!(chart.bars[1].color, "purple");
        assert_eq!(chart.bars[2].color, "yellow");
    }

    #[test]
    fn test_missing_score_omits_bar() {
        let report = report();
        let chart = chart_for_row(&report, &report.rows[0], &descriptor(FULL));
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[1].label, "K230\n2");
    }

    #[test]
    fn test_empty_processors_gives_baseline_only() {
        let dir = tempfile::tempdir().unwrap();
        let d = descriptor(r#"{"baseline": {"Processor": "Xeon", "Cores": 16}, "processors": []}"#);
        let paths = render_figures(&report(), &d, dir.path()).unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], dir.path().join("core.svg"));
        assert_eq!(paths[1], dir.path().join("Mean.svg"));
        for path in &paths {
            let svg = fs::read_to_string(path).unwrap();
            assert_eq!(svg.matches("class=\"bar\"").count(), 1);
            assert!(svg.contains("fill=\"gray\""));
            assert!(svg.contains(">100.00<"));
        }
    }

    #[test]
    fn test_figure_file_name() {
        assert_eq!(figure_file_name("Score"), "Score.svg");
        assert_eq!(figure_file_name("a/b"), "a_b.svg");
    }
}
