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

//! Run configuration.
//!
//! Collects everything one scoring run needs: where the benchmark tables live,
//! which modules to read, how to aggregate and where to write results.

use crate::aggregate::{AggregationMode, GroupRule};
use crate::figure::DEFAULT_DESCRIPTOR;
use std::path::PathBuf;

/// Default directory holding the `<module>.html` tables.
pub const DEFAULT_PERF_DIR: &str = "perf";

/// Modules scored when none are requested.
pub const DEFAULT_MODULES: &[&str] = &[
    "calib3d",
    "core",
    "dnn",
    "features2d",
    "imgcodecs",
    "imgproc",
    "objdetect",
    "photo",
    "stitching",
    "video",
    "videoio",
];

/// Configuration of a scoring run.
///
/// # Example
///
/// ```
/// use perfscore_core::{AggregationMode, ScoreConfig};
///
/// let config = ScoreConfig::default()
///     .with_modules(["core", "imgproc"])
///     .with_mode(AggregationMode::Geometric);
/// assert_eq!(config.output_path().to_str(), Some("score.md"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    /// Directory holding the benchmark tables.
    pub perf_dir: PathBuf,
    /// Modules to score, in report order.
    pub modules: Vec<String>,
    /// Aggregation mode.
    pub mode: AggregationMode,
    /// Markdown output path; the mode's default file when unset.
    pub output: Option<PathBuf>,
    /// Render figures.
    pub figure: bool,
    /// Processor descriptor, read in figure mode.
    pub descriptor: PathBuf,
    /// Figure directory; the perf directory when unset.
    pub figure_dir: Option<PathBuf>,
    /// Row grouping for geometric mode.
    pub group_rule: GroupRule,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            perf_dir: PathBuf::from(DEFAULT_PERF_DIR),
            modules: DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
            mode: AggregationMode::default(),
            output: None,
            figure: false,
            descriptor: PathBuf::from(DEFAULT_DESCRIPTOR),
            figure_dir: None,
            group_rule: GroupRule::default(),
        }
    }
}

impl ScoreConfig {
    /// Sets the perf directory.
    pub fn with_perf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.perf_dir = dir.into();
        self
    }

    /// Replaces the module list.
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the aggregation mode.
    pub fn with_mode(mut self, mode: AggregationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets an explicit output path.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Enables or disables figure rendering.
    pub fn with_figure(mut self, figure: bool) -> Self {
        self.figure = figure;
        self
    }

    /// Sets the descriptor path.
    pub fn with_descriptor(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor = path.into();
        self
    }

    /// Sets the figure directory.
    pub fn with_figure_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.figure_dir = Some(dir.into());
        self
    }

    /// Sets the group key delimiter.
    pub fn with_group_delimiter(mut self, delimiter: char) -> Self {
        self.group_rule = GroupRule::new(delimiter);
        self
    }

    /// Path the Markdown report is written to.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.mode.default_output()))
    }

    /// Directory figures are written to.
    pub fn figure_path(&self) -> PathBuf {
        self.figure_dir.clone().unwrap_or_else(|| self.perf_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScoreConfig::default();
        assert_eq!(config.perf_dir, PathBuf::from("perf"));
        assert_eq!(config.modules.len(), 11);
        assert_eq!(config.modules[0], "calib3d");
        assert_eq!(config.modules[10], "videoio");
        assert_eq!(config.mode, AggregationMode::Arithmetic);
        assert!(!config.figure);
        assert_eq!(config.descriptor, PathBuf::from("processor.json"));
        assert_eq!(config.group_rule, GroupRule::default());
    }

    #[test]
    fn test_output_follows_mode() {
        let config = ScoreConfig::default();
        assert_eq!(config.output_path(), PathBuf::from("scores.md"));
        let config = config.with_mode(AggregationMode::Geometric);
        assert_eq!(config.output_path(), PathBuf::from("score.md"));
        let config = config.with_output("out/result.md");
        assert_eq!(config.output_path(), PathBuf::from("out/result.md"));
    }

    #[test]
    fn test_figure_dir_defaults_to_perf_dir() {
        let config = ScoreConfig::default().with_perf_dir("bench");
        assert_eq!(config.figure_path(), PathBuf::from("bench"));
        let config = config.with_figure_dir("figs");
        assert_eq!(config.figure_path(), PathBuf::from("figs"));
    }

    #[test]
    fn test_builder_chain() {
        let config = ScoreConfig::default()
            .with_modules(vec!["core".to_string()])
            .with_figure(true)
            .with_descriptor("cpu.json")
            .with_group_delimiter('-');
        assert_eq!(config.modules, ["core"]);
        assert!(config.figure);
        assert_eq!(config.descriptor, PathBuf::from("cpu.json"));
        assert_eq!(config.group_rule, GroupRule::new('-'));
    }
}
