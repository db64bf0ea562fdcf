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

//! Console rendering of score reports.

use super::markdown::column_widths;
use super::ReportTable;

/// Gap between columns.
const GAP: &str = "  ";

impl ReportTable {
    /// Renders the report as an aligned plain-text table.
    ///
    /// A dashed rule separates the header from the module rows and the module
    /// rows from the summary row.
    pub fn to_console(&self) -> String {
        let grid = self.grid();
        let widths = column_widths(&grid);
        let rule_width = widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1);
        let rule = "-".repeat(rule_width);

        let mut out = String::new();
        let last = grid.len() - 1;
        for (i, line) in grid.iter().enumerate() {
            if i == last && i > 1 {
                out.push_str(&rule);
                out.push('\n');
            }

            let cells: Vec<String> = line
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    if col == 0 {
                        format!("{:<w$}", cell, w = widths[col])
                    } else {
                        format!("{:>w$}", cell, w = widths[col])
                    }
                })
                .collect();
            out.push_str(cells.join(GAP).trim_end());
            out.push('\n');

            if i == 0 {
                out.push_str(&rule);
                out.push('\n');
            }
        }
        out
    }
}

/// Prints the report to standard output.
pub fn print_report(report: &ReportTable) {
    print!("{}", report.to_console());
}
