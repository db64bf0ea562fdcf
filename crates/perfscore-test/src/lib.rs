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

//! Shared test fixtures for PerfScore.
//!
//! This crate provides canned benchmark tables, builders for tables in the
//! benchmark runner's HTML layout, processor descriptors, and scratch perf
//! directories, so the library and binary test suites exercise the same
//! inputs.
//!
//! # Quick Start
//!
//! ```rust
//! use perfscore_test::fixtures::{self, builders::TableBuilder, perf_dir::PerfDir};
//!
//! // Canned tables with known scores
//! let core = fixtures::core_table();
//!
//! // Custom tables
//! let html = TableBuilder::new("scalar")
//!     .device("RVV")
//!     .ratios("add::(640x480)", &[1.25])
//!     .to_html();
//!
//! // A perf directory on disk
//! let dir = PerfDir::new().unwrap();
//! dir.write_module("core", &core).unwrap();
//! dir.write_module("video", &html).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::builders::{DescriptorBuilder, TableBuilder};
pub use fixtures::perf_dir::PerfDir;

/// Asserts two floats agree within `1e-9`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
