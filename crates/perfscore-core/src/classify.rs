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

//! Column classification.
//!
//! The benchmark runner lays a comparison table out as
//!
//! ```text
//! name | baseline | target_1 .. target_k | target_1 vs baseline .. target_k vs baseline
//! ```
//!
//! so a table with `k` targets has `n = 2k + 2` columns. Column 0 names the
//! test and belongs to neither half. The split point is `n / 2 + 1`: columns
//! `1 .. n/2 + 1` are baseline timings, columns `n/2 + 1 .. n` are the
//! "vs baseline" ratios. Hence `baseline + comparisons == n - 1` for every
//! accepted table.

use crate::error::{Result, ScoreError};
use std::fmt;
use std::ops::Range;

/// Index of the column that names each test.
pub const NAME_COLUMN: usize = 0;

/// Smallest accepted layout: name, baseline, one target, one ratio.
pub const MIN_COLUMNS: usize = 4;

/// A hardware or configuration label compared against the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceType(String);

impl DeviceType {
    /// Wraps a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceType {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// A "vs baseline" ratio column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonColumn {
    /// Column index within the table.
    pub index: usize,
    /// Header text as found in the table.
    pub header: String,
    /// Device the ratios belong to.
    pub device: DeviceType,
}

/// Result of classifying a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Baseline and raw target timing columns.
    pub baseline: Range<usize>,
    /// Ratio columns, in table order.
    pub comparisons: Vec<ComparisonColumn>,
}

impl ColumnLayout {
    /// Devices covered by the table, in column order.
    pub fn devices(&self) -> impl Iterator<Item = &DeviceType> {
        self.comparisons.iter().map(|c| &c.device)
    }
}

/// First comparison column for a table of `columns` columns.
pub fn split_point(columns: usize) -> usize {
    columns / 2 + 1
}

/// Splits a header row into baseline and comparison columns.
///
/// # Errors
///
/// Returns [`ScoreError::HeaderFormat`] when the column count is odd or below
/// [`MIN_COLUMNS`], or when a comparison header carries no device label.
///
/// # Examples
///
/// ```
/// use perfscore_core::classify::classify;
///
/// let headers: Vec<String> = ["Name", "base", "perf-OCV", "perf-OCV vs base"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let layout = classify("core", &headers).unwrap();
/// assert_eq!(layout.baseline, 1..3);
/// assert_eq!(layout.comparisons[0].index, 3);
/// assert_eq!(layout.comparisons[0].device.as_str(), "OCV");
/// ```
pub fn classify(module: &str, headers: &[String]) -> Result<ColumnLayout> {
    let count = headers.len();
    if count < MIN_COLUMNS || count % 2 != 0 {
        return Err(ScoreError::HeaderFormat {
            module: module.to_string(),
            header: headers.join(" | "),
            reason: format!(
                "expected an even number of columns (at least {}), found {}",
                MIN_COLUMNS, count
            ),
        });
    }

    let split = split_point(count);
    let comparisons = headers[split..]
        .iter()
        .enumerate()
        .map(|(offset, header)| {
            let device = device_label(header).ok_or_else(|| ScoreError::HeaderFormat {
                module: module.to_string(),
                header: header.clone(),
                reason: "expected '<prefix>-<device> vs <baseline>'".to_string(),
            })?;
            Ok(ComparisonColumn {
                index: split + offset,
                header: header.clone(),
                device,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ColumnLayout {
        baseline: NAME_COLUMN + 1..split,
        comparisons,
    })
}

/// Extracts the device label from a comparison header.
///
/// The label is the text after the first hyphen and before the standalone
/// word `vs` (any case), trimmed. A device name that itself contains the word
/// `vs` is cut at its first occurrence.
///
/// # Examples
///
/// ```
/// use perfscore_core::classify::device_label;
///
/// assert_eq!(device_label("perf-RVV vs perf-scalar (x-factor)").unwrap().as_str(), "RVV");
/// assert_eq!(device_label("core-x86-64 VS core-base").unwrap().as_str(), "x86-64");
/// assert!(device_label("RVV vs scalar").is_none());
/// ```
pub fn device_label(header: &str) -> Option<DeviceType> {
    let vs = find_vs(header)?;
    let left = &header[..vs];
    let hyphen = left.find('-')?;
    let label = left[hyphen + 1..].trim();
    if label.is_empty() {
        None
    } else {
        Some(DeviceType::new(label))
    }
}

/// Byte offset of the first standalone `vs` word.
fn find_vs(header: &str) -> Option<usize> {
    let bytes = header.as_bytes();
    (0..bytes.len().saturating_sub(1)).find(|&i| {
        bytes[i].eq_ignore_ascii_case(&b'v')
            && bytes[i + 1].eq_ignore_ascii_case(&b's')
            && (i == 0 || bytes[i - 1].is_ascii_whitespace())
            && bytes
                .get(i + 2)
                .map_or(true, |b| b.is_ascii_whitespace())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_target_layout() {
        let layout = classify(
            "core",
            &headers(&["Name of Test", "perf-base", "perf-OCV", "perf-OCV vs perf-base (x-factor)"]),
        )
        .unwrap();
        assert_eq!(layout.baseline, 1..3);
        assert_eq!(layout.comparisons.len(), 1);
        assert_eq!(layout.comparisons[0].index, 3);
    }

    #[test]
    fn test_two_target_layout() {
        let layout = classify(
            "imgproc",
            &headers(&[
                "Name of Test",
                "perf-base",
                "perf-RVV",
                "perf-NEON",
                "perf-RVV vs perf-base (x-factor)",
                "perf-NEON vs perf-base (x-factor)",
            ]),
        )
        .unwrap();
        assert_eq!(layout.baseline, 1..4);
        let devices: Vec<&str> = layout.devices().map(DeviceType::as_str).collect();
        assert_eq!(devices, ["RVV", "NEON"]);
        assert_eq!(layout.comparisons[1].index, 5);
    }

    #[test]
    fn test_odd_width_rejected() {
        let err = classify("core", &headers(&["Name", "a", "b"])).unwrap_err();
        assert!(matches!(err, ScoreError::HeaderFormat { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_bad_comparison_header_rejected() {
        let err = classify("core", &headers(&["Name", "base", "perf-OCV", "speedup"])).unwrap_err();
        match err {
            ScoreError::HeaderFormat { module, header, .. } => {
                assert_eq!(module, "core");
                assert_eq!(header, "speedup");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_device_label_variants() {
        assert_eq!(device_label("a-OCV vs a-base").unwrap().as_str(), "OCV");
        assert_eq!(device_label("a- spaced name  vs base").unwrap().as_str(), "spaced name");
        assert_eq!(device_label("a-OCV Vs base").unwrap().as_str(), "OCV");
        assert_eq!(device_label("a-OCV vs").unwrap().as_str(), "OCV");
    }

    #[test]
    fn test_device_label_needs_standalone_vs() {
        // "vsx" is not the separator; the real one comes later.
        assert_eq!(device_label("p-vsx2 vs p-base").unwrap().as_str(), "vsx2");
        assert!(device_label("p-OCVvs base").is_none());
        assert!(device_label("p- vs base").is_none());
    }

    #[test]
    fn test_device_named_with_vs_is_cut() {
        assert_eq!(device_label("p-A vs B vs p-base").unwrap().as_str(), "A");
    }
}
