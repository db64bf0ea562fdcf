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

//! Canonical benchmark tables and descriptors.
//!
//! The `core` and `imgproc` tables carry the reference numbers used across
//! the test suites: `core` ratios `[1.0, 1.1]` score `105.00` and `imgproc`
//! ratios `[0.9, 0.95]` score `92.50`, for an arithmetic summary of `98.75`.

pub mod builders;
pub mod errors;
pub mod perf_dir;

use builders::{DescriptorBuilder, TableBuilder};

/// Type alias for a list of table fixtures (module, generator).
pub type TableFixtureList = Vec<(&'static str, fn() -> String)>;

/// Baseline column name used by the canned tables.
pub const BASELINE: &str = "scalar";

/// Device label used by the canned tables.
pub const DEVICE: &str = "RVV";

/// `core` table with one device and ratios `[1.0, 1.1]`.
pub fn core_table() -> String {
    TableBuilder::new(BASELINE)
        .device(DEVICE)
        .ratios("Size_MatType::add::(640x480, 8UC1)", &[1.0])
        .ratios("Size_MatType::add::(1280x720, 8UC1)", &[1.1])
        .to_html()
}

/// `imgproc` table with one device and ratios `[0.9, 0.95]`.
pub fn imgproc_table() -> String {
    TableBuilder::new(BASELINE)
        .device(DEVICE)
        .ratios("resize::(640x480, INTER_LINEAR)", &[0.9])
        .ratios("blur::(640x480, 3x3)", &[0.95])
        .to_html()
}

/// Two-device table where the second device has a placeholder cell.
pub fn two_device_table() -> String {
    TableBuilder::new(BASELINE)
        .device("RVV")
        .device("NEON")
        .row("Size_MatType::add::(640x480)", &[Some(1.2), Some(0.8)])
        .row("Size_MatType::sub::(640x480)", &[Some(1.0), None])
        .row("Norm::norm::(640x480)", &[Some(0.9), Some(1.0)])
        .to_html()
}

/// The `core` table embedded in a complete HTML page.
pub fn full_page_table() -> String {
    TableBuilder::new(BASELINE)
        .device(DEVICE)
        .ratios("Size_MatType::add::(640x480, 8UC1)", &[1.0])
        .ratios("Size_MatType::add::(1280x720, 8UC1)", &[1.1])
        .full_page()
        .to_html()
}

/// Every table fixture, keyed by the module name it is written as.
pub fn all() -> TableFixtureList {
    vec![("core", core_table), ("imgproc", imgproc_table)]
}

/// Descriptor naming the canned device as a RISC-V part.
pub fn descriptor() -> String {
    DescriptorBuilder::new("Xeon Gold 6248", 20)
        .processor("NEON", "4+4", "ARM")
        .processor(DEVICE, 8, "RISC-V")
        .to_json()
}

/// Descriptor with a baseline and no target processors.
pub fn baseline_only_descriptor() -> String {
    DescriptorBuilder::new("Xeon Gold 6248", 20).to_json()
}
