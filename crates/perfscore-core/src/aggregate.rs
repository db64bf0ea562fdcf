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

//! Score aggregation.
//!
//! Ratios in a comparison column are turned into one percentage per
//! (module, device) pair, with 100 meaning parity with the baseline. Nothing
//! is rounded here; rounding belongs to the report.

use crate::classify::{classify, DeviceType};
use crate::error::Result;
use crate::measurement::Measurement;
use crate::table::BenchmarkTable;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Ratio -> percentage factor.
pub const PERCENT: f64 = 100.0;

/// How column values and module scores are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AggregationMode {
    /// Arithmetic mean of every numeric cell, no grouping.
    #[default]
    Arithmetic,
    /// Geometric mean of per-group geometric means of positive cells.
    Geometric,
}

impl AggregationMode {
    /// Label of the trailing summary row.
    pub fn summary_label(self) -> &'static str {
        match self {
            AggregationMode::Arithmetic => "Mean",
            AggregationMode::Geometric => "Score",
        }
    }

    /// Report file name used when none is configured.
    pub fn default_output(self) -> &'static str {
        match self {
            AggregationMode::Arithmetic => "scores.md",
            AggregationMode::Geometric => "score.md",
        }
    }

    /// Short lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationMode::Arithmetic => "arithmetic",
            AggregationMode::Geometric => "geometric",
        }
    }

    /// Combines per-module scores of one device into the summary value.
    pub fn combine(self, values: &[f64]) -> Option<f64> {
        match self {
            AggregationMode::Arithmetic => arithmetic_mean(values),
            AggregationMode::Geometric => geometric_mean(values),
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arithmetic" | "mean" => Ok(AggregationMode::Arithmetic),
            "geometric" | "gmean" => Ok(AggregationMode::Geometric),
            other => Err(format!("unknown aggregation mode '{}'", other)),
        }
    }
}

/// Derives the group key of a row from its test name.
///
/// The key is the text before the first colon, cut again at the first
/// `delimiter`, trimmed: `"Size_MatType::add::(640x480)"` groups as `"Size"`
/// with the default `_` delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRule {
    /// Character the leading segment is split on.
    pub delimiter: char,
}

impl GroupRule {
    /// Default delimiter.
    pub const DEFAULT_DELIMITER: char = '_';

    /// Creates a rule splitting on `delimiter`.
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Computes the key of one test name.
    ///
    /// # Examples
    ///
    /// ```
    /// use perfscore_core::GroupRule;
    ///
    /// let rule = GroupRule::default();
    /// assert_eq!(rule.key("Size_MatType::add::(640x480, 8UC1)"), "Size");
    /// assert_eq!(rule.key("resize::(1, 2)"), "resize");
    /// ```
    pub fn key<'a>(&self, name: &'a str) -> &'a str {
        let before_colon = name.split(':').next().unwrap_or(name);
        before_colon
            .split(self.delimiter)
            .next()
            .unwrap_or(before_colon)
            .trim()
    }
}

impl Default for GroupRule {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELIMITER)
    }
}

/// Arithmetic mean, `None` for no values.
pub fn arithmetic_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Geometric mean of the positive values, `None` when there are none.
///
/// Computed in log space so long columns cannot overflow the product.
///
/// # Examples
///
/// ```
/// use perfscore_core::aggregate::geometric_mean;
///
/// let gm = geometric_mean(&[80.0, 120.0]).unwrap();
/// assert!((gm - 97.979_589_711).abs() < 1e-6);
/// assert_eq!(geometric_mean(&[0.0, -1.0]), None);
/// ```
pub fn geometric_mean(values: &[f64]) -> Option<f64> {
    let logs: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| *v > 0.0)
        .map(f64::ln)
        .collect();
    if logs.is_empty() {
        None
    } else {
        Some((logs.iter().sum::<f64>() / logs.len() as f64).exp())
    }
}

/// Scores one comparison column.
///
/// `names` holds the test name of each row and is only consulted in
/// geometric mode. Returns `None` when the column has nothing to score.
pub fn column_score(
    cells: &[Measurement],
    names: &[&str],
    mode: AggregationMode,
    rule: GroupRule,
) -> Option<f64> {
    let ratio = match mode {
        AggregationMode::Arithmetic => {
            let values: Vec<f64> = cells.iter().filter_map(|m| m.value()).collect();
            arithmetic_mean(&values)
        }
        AggregationMode::Geometric => {
            // Groups are combined in first-seen order.
            let mut order: Vec<&str> = Vec::new();
            let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
            for (cell, name) in cells.iter().zip(names.iter()) {
                let value = match cell {
                    Measurement::Numeric(value) => *value,
                    Measurement::Missing => continue,
                };
                let key = rule.key(name);
                let entry = groups.entry(key).or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                });
                entry.push(value);
            }
            let group_scores: Vec<f64> = order
                .iter()
                .filter_map(|key| geometric_mean(&groups[key]))
                .collect();
            geometric_mean(&group_scores)
        }
    };
    ratio.map(|r| r * PERCENT)
}

/// Scores of one module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleScores {
    /// Module name.
    pub module: String,
    /// Score per device; devices without data are absent.
    pub scores: HashMap<DeviceType, f64>,
}

/// Scores for every (module, device) pair of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    mode: AggregationMode,
    devices: Vec<DeviceType>,
    modules: Vec<ModuleScores>,
}

impl ScoreMatrix {
    /// Aggregation mode the matrix was built with.
    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// Devices in first-seen order.
    pub fn devices(&self) -> &[DeviceType] {
        &self.devices
    }

    /// Module rows in processing order.
    pub fn modules(&self) -> &[ModuleScores] {
        &self.modules
    }

    /// Returns true when no module was added.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Score of one module for one device.
    pub fn score(&self, module: &str, device: &DeviceType) -> Option<f64> {
        self.modules
            .iter()
            .find(|m| m.module == module)
            .and_then(|m| m.scores.get(device).copied())
    }

    /// Cross-module aggregate of one device.
    ///
    /// Modules without a score for the device are left out rather than
    /// counted as zero; `None` when no module has a usable score.
    pub fn summary_score(&self, device: &DeviceType) -> Option<f64> {
        let values: Vec<f64> = self
            .modules
            .iter()
            .filter_map(|m| m.scores.get(device).copied())
            .collect();
        self.mode.combine(&values)
    }

    /// Summary value for every device, in device order.
    pub fn summary(&self) -> Vec<(DeviceType, Option<f64>)> {
        self.devices
            .iter()
            .map(|d| (d.clone(), self.summary_score(d)))
            .collect()
    }
}

/// Accumulates module tables into a [`ScoreMatrix`].
///
/// # Examples
///
/// ```
/// use perfscore_core::{AggregationMode, BenchmarkTable, DeviceType, ScoreMatrixBuilder};
///
/// let table = BenchmarkTable::new(
///     "core",
///     vec!["Name".into(), "base".into(), "p-OCV".into(), "p-OCV vs base".into()],
///     vec![
///         vec!["a".into(), "1".into(), "1".into(), "1.0".into()],
///         vec!["b".into(), "1".into(), "1".into(), "1.1".into()],
///     ],
/// );
/// let mut builder = ScoreMatrixBuilder::new(AggregationMode::Arithmetic);
/// builder.add_table(&table).unwrap();
/// let matrix = builder.build();
/// let score = matrix.score("core", &DeviceType::new("OCV")).unwrap();
/// assert!((score - 105.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ScoreMatrixBuilder {
    mode: AggregationMode,
    rule: GroupRule,
    devices: Vec<DeviceType>,
    modules: Vec<ModuleScores>,
}

impl ScoreMatrixBuilder {
    /// Creates an empty builder using the default group rule.
    pub fn new(mode: AggregationMode) -> Self {
        Self {
            mode,
            rule: GroupRule::default(),
            devices: Vec::new(),
            modules: Vec::new(),
        }
    }

    /// Sets the rule used to group rows in geometric mode.
    pub fn with_group_rule(mut self, rule: GroupRule) -> Self {
        self.rule = rule;
        self
    }

    /// Scores every comparison column of a table.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::ScoreError::HeaderFormat`] from classification.
    pub fn add_table(&mut self, table: &BenchmarkTable) -> Result<&mut Self> {
        let layout = classify(table.module(), table.headers())?;
        let names: Vec<&str> = table.row_names().collect();
        let mut scores = HashMap::new();
        let mut seen: Vec<&DeviceType> = Vec::new();

        for column in &layout.comparisons {
            if seen.contains(&&column.device) {
                warn!(
                    module = table.module(),
                    device = column.device.as_str(),
                    "duplicate device column, keeping the last one"
                );
                scores.remove(&column.device);
            } else {
                seen.push(&column.device);
            }

            let cells = table.measurements(column.index);
            let missing = cells.iter().filter(|m| m.is_missing()).count();
            if missing > 0 {
                debug!(
                    module = table.module(),
                    device = column.device.as_str(),
                    missing,
                    "dropped cells without measurement"
                );
            }

            if !self.devices.contains(&column.device) {
                self.devices.push(column.device.clone());
            }

            match column_score(&cells, &names, self.mode, self.rule) {
                Some(score) => {
                    scores.insert(column.device.clone(), score);
                }
                None => debug!(
                    module = table.module(),
                    device = column.device.as_str(),
                    "no usable values in column"
                ),
            }
        }

        self.modules.push(ModuleScores {
            module: table.module().to_string(),
            scores,
        });
        Ok(self)
    }

    /// Number of modules added so far.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Finishes the matrix.
    pub fn build(self) -> ScoreMatrix {
        ScoreMatrix {
            mode: self.mode,
            devices: self.devices,
            modules: self.modules,
        }
    }
}

/// Builds a matrix from a sequence of tables.
pub fn aggregate<'a>(
    tables: impl IntoIterator<Item = &'a BenchmarkTable>,
    mode: AggregationMode,
    rule: GroupRule,
) -> Result<ScoreMatrix> {
    let mut builder = ScoreMatrixBuilder::new(mode).with_group_rule(rule);
    for table in tables {
        builder.add_table(table)?;
    }
    Ok(builder.build())
}
