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

//! Inputs the loader or classifier must reject.

/// Documents from which no table can be extracted.
///
/// Each tuple is `(name, html)`; loading any of them yields a parse failure.
pub fn unparseable_pages() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty", ""),
        ("plain_text", "benchmark run failed: no results"),
        ("no_table", "<html><body><p>nothing here</p></body></html>"),
        ("empty_table", "<table></table>"),
        ("tag_prefix_only", "<tablet>not a table</tablet>"),
    ]
}

/// Tables that parse but whose header row cannot be classified.
///
/// Each tuple is `(name, html)`; aggregating any of them yields a header
/// format failure.
pub fn bad_header_tables() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "odd_width",
            "<table><tr><th>Name</th><th>perf-base</th><th>perf-A</th></tr>\
             <tr><td>t</td><td>1</td><td>1</td></tr></table>",
        ),
        (
            "too_narrow",
            "<table><tr><th>Name</th><th>perf-base</th></tr>\
             <tr><td>t</td><td>1</td></tr></table>",
        ),
        (
            "missing_vs",
            "<table><tr><th>Name</th><th>perf-base</th><th>perf-A</th><th>perf-A ratio</th></tr>\
             <tr><td>t</td><td>1</td><td>1</td><td>1.0</td></tr></table>",
        ),
        (
            "missing_hyphen",
            "<table><tr><th>Name</th><th>base</th><th>A</th><th>A vs base</th></tr>\
             <tr><td>t</td><td>1</td><td>1</td><td>1.0</td></tr></table>",
        ),
    ]
}
