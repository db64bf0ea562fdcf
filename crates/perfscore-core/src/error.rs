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

//! Error types for score computation.
//!
//! A run distinguishes per-module failures, which are logged and skipped, from
//! structural failures that abort the whole run. [`ScoreError::is_recoverable`]
//! encodes that split so callers do not have to match on every variant.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for score operations.
pub type Result<T> = std::result::Result<T, ScoreError>;

/// Errors raised while loading tables, aggregating scores or writing output.
///
/// # Examples
///
/// ```
/// use perfscore_core::ScoreError;
///
/// let err = ScoreError::HeaderFormat {
///     module: "core".to_string(),
///     header: "baseline".to_string(),
///     reason: "missing 'vs' separator".to_string(),
/// };
/// assert!(!err.is_recoverable());
/// assert!(err.to_string().contains("core"));
/// ```
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The benchmark table for a module does not exist.
    #[error("benchmark table for module '{module}' not found at '{path}'")]
    NotFound {
        /// Module name
        module: String,
        /// Path that was probed
        path: PathBuf,
    },

    /// The file exists but no table could be extracted from it.
    #[error("failed to parse benchmark table for module '{module}': {reason}")]
    Parse {
        /// Module name
        module: String,
        /// What went wrong
        reason: String,
    },

    /// A file could not be read or written.
    #[error("I/O error for '{path}': {source}")]
    Io {
        /// The file path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A comparison column header does not carry a device label, or the
    /// column layout cannot be split into baseline and comparison halves.
    #[error("invalid header '{header}' in module '{module}': {reason}")]
    HeaderFormat {
        /// Module name
        module: String,
        /// Offending header text
        header: String,
        /// Why it was rejected
        reason: String,
    },

    /// None of the requested modules produced a table.
    #[error("no benchmark data could be loaded (tried {attempted} module(s))")]
    NoData {
        /// Number of modules that were requested
        attempted: usize,
    },

    /// Figure output was requested but the processor descriptor is absent.
    #[error("processor descriptor not found at '{path}'")]
    DescriptorMissing {
        /// Expected descriptor location
        path: PathBuf,
    },

    /// The processor descriptor exists but is not valid.
    #[error("invalid processor descriptor '{path}': {reason}")]
    Descriptor {
        /// Descriptor location
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// A rendered report could not be read back.
    #[error("malformed report table at line {line}: {reason}")]
    Report {
        /// 1-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },
}

impl ScoreError {
    /// Creates an I/O error tagged with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for failures that only affect a single module's table.
    ///
    /// The pipeline logs these and moves on to the next module; anything else
    /// aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScoreError::NotFound { .. } | ScoreError::Parse { .. } | ScoreError::Io { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        let not_found = ScoreError::NotFound {
            module: "dnn".to_string(),
            path: PathBuf::from("perf/dnn.html"),
        };
        let parse = ScoreError::Parse {
            module: "dnn".to_string(),
            reason: "no <table> element".to_string(),
        };
        let no_data = ScoreError::NoData { attempted: 3 };
        let missing = ScoreError::DescriptorMissing {
            path: PathBuf::from("processor.json"),
        };

        assert!(not_found.is_recoverable());
        assert!(parse.is_recoverable());
        assert!(!no_data.is_recoverable());
        assert!(!missing.is_recoverable());
    }

    #[test]
    fn test_messages_name_the_module() {
        let err = ScoreError::NotFound {
            module: "video".to_string(),
            path: PathBuf::from("perf/video.html"),
        };
        let msg = err.to_string();
        assert!(msg.contains("video"));
        assert!(msg.contains("perf/video.html"));
    }

    #[test]
    fn test_io_keeps_source() {
        let err = ScoreError::io(
            "scores.md",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("scores.md"));
    }
}
