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

//! Builders for benchmark tables and processor descriptors.

use serde_json::{json, Value};

/// Prefix the benchmark runner puts in front of every result column.
pub const COLUMN_PREFIX: &str = "perf";

/// Builder for HTML benchmark tables in the runner's export layout.
///
/// Produces `Name of Test | <baseline> | <target>... | <target> vs <baseline>...`,
/// which is the layout the column classifier expects. Only the ratio columns
/// matter for scoring; the absolute timing columns are filled with `1.00`.
///
/// # Examples
///
/// ```
/// use perfscore_test::fixtures::builders::TableBuilder;
///
/// let html = TableBuilder::new("scalar")
///     .device("RVV")
///     .row("add::(640x480)", &[Some(1.2)])
///     .row("sub::(640x480)", &[None])
///     .to_html();
///
/// assert!(html.contains("perf-RVV vs perf-scalar (x-factor)"));
/// assert!(html.contains("<td>-</td>"));
/// ```
#[derive(Debug, Clone)]
pub struct TableBuilder {
    baseline: String,
    devices: Vec<String>,
    rows: Vec<(String, Vec<Option<f64>>)>,
    page: bool,
}

impl TableBuilder {
    /// Creates a builder comparing against `baseline`.
    pub fn new(baseline: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
            devices: Vec::new(),
            rows: Vec::new(),
            page: false,
        }
    }

    /// Adds a target device column pair.
    pub fn device(mut self, name: impl Into<String>) -> Self {
        self.devices.push(name.into());
        self
    }

    /// Adds a test row with one ratio per device; `None` renders as `-`.
    pub fn row(mut self, name: impl Into<String>, ratios: &[Option<f64>]) -> Self {
        self.rows.push((name.into(), ratios.to_vec()));
        self
    }

    /// Adds a test row from plain ratios.
    pub fn ratios(self, name: impl Into<String>, ratios: &[f64]) -> Self {
        let ratios: Vec<Option<f64>> = ratios.iter().copied().map(Some).collect();
        self.row(name, &ratios)
    }

    /// Wraps the table in a full HTML page with head, styles and a script.
    pub fn full_page(mut self) -> Self {
        self.page = true;
        self
    }

    /// Header texts, in column order.
    pub fn headers(&self) -> Vec<String> {
        let baseline = format!("{}-{}", COLUMN_PREFIX, self.baseline);
        let mut headers = vec!["Name of Test".to_string(), baseline.clone()];
        headers.extend(
            self.devices
                .iter()
                .map(|d| format!("{}-{}", COLUMN_PREFIX, d)),
        );
        headers.extend(
            self.devices
                .iter()
                .map(|d| format!("{}-{} vs {} (x-factor)", COLUMN_PREFIX, d, baseline)),
        );
        headers
    }

    /// Renders the table.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        if self.page {
            html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Performance summary</title>\n");
            html.push_str("<style type=\"text/css\">table.tbl td { padding: 2px; }</style>\n");
            html.push_str("<script>if (1 < 2 && true) { highlight('perf'); }</script>\n");
            html.push_str("</head>\n<body>\n<h1>Summary report</h1>\n");
        }

        html.push_str("<table class=\"tbl\" id=\"perf\">\n<thead>\n<tr>");
        for header in self.headers() {
            html.push_str(&format!("<th>{}</th>", header));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for (name, ratios) in &self.rows {
            html.push_str(&format!("<tr><td nowrap>{}</td><td>1.00</td>", escape(name)));
            for _ in &self.devices {
                html.push_str("<td>1.00</td>");
            }
            for i in 0..self.devices.len() {
                match ratios.get(i).copied().flatten() {
                    Some(ratio) => html.push_str(&format!("<td>{}</td>", ratio)),
                    None => html.push_str("<td>-</td>"),
                }
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");

        if self.page {
            html.push_str("<p>Generated by the benchmark runner.</p>\n</body>\n</html>\n");
        }
        html
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Builder for processor descriptor JSON.
///
/// # Examples
///
/// ```
/// use perfscore_test::fixtures::builders::DescriptorBuilder;
///
/// let json = DescriptorBuilder::new("Xeon", 16)
///     .processor("K230", 2, "RISC-V")
///     .to_json();
/// assert!(json.contains("\"Arch\":\"RISC-V\""));
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    baseline: Value,
    processors: Vec<Value>,
}

impl DescriptorBuilder {
    /// Creates a descriptor with the given baseline machine.
    pub fn new(name: &str, cores: impl Into<Value>) -> Self {
        Self {
            baseline: json!({ "Processor": name, "Cores": cores.into() }),
            processors: Vec::new(),
        }
    }

    /// Adds a target processor.
    pub fn processor(mut self, name: &str, cores: impl Into<Value>, arch: &str) -> Self {
        self.processors
            .push(json!({ "Processor": name, "Cores": cores.into(), "Arch": arch }));
        self
    }

    /// Renders the descriptor as compact JSON.
    pub fn to_json(&self) -> String {
        json!({ "baseline": self.baseline, "processors": self.processors }).to_string()
    }
}
