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

//! Tagged benchmark cell values.

use std::fmt;

/// Placeholder the benchmark runner writes when a test has no measurement.
pub const PLACEHOLDER: &str = "-";

/// A single benchmark cell.
///
/// Cells are either a finite number or missing. Missing covers the runner's
/// `-` placeholder, empty cells and any text that is not a number; none of
/// these ever count as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// A finite measured value.
    Numeric(f64),
    /// No measurement available.
    Missing,
}

impl Measurement {
    /// Parses a raw cell string.
    ///
    /// # Examples
    ///
    /// ```
    /// use perfscore_core::Measurement;
    ///
    /// assert_eq!(Measurement::parse(" 1.05 "), Measurement::Numeric(1.05));
    /// assert_eq!(Measurement::parse("-"), Measurement::Missing);
    /// assert_eq!(Measurement::parse("n/a"), Measurement::Missing);
    /// ```
    pub fn parse(cell: &str) -> Self {
        let text = cell.trim();
        if text.is_empty() || text == PLACEHOLDER {
            return Measurement::Missing;
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Measurement::Numeric(value),
            _ => Measurement::Missing,
        }
    }

    /// Returns the numeric value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Measurement::Numeric(value) => Some(value),
            Measurement::Missing => None,
        }
    }

    /// Returns true when the cell carries no measurement.
    pub fn is_missing(self) -> bool {
        matches!(self, Measurement::Missing)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Numeric(value) => write!(f, "{}", value),
            Measurement::Missing => f.write_str(PLACEHOLDER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(Measurement::parse("0.9"), Measurement::Numeric(0.9));
        assert_eq!(Measurement::parse("12"), Measurement::Numeric(12.0));
        assert_eq!(Measurement::parse("\t1e-3\n"), Measurement::Numeric(0.001));
    }

    #[test]
    fn test_parse_placeholders() {
        assert!(Measurement::parse("-").is_missing());
        assert!(Measurement::parse("").is_missing());
        assert!(Measurement::parse("   ").is_missing());
        assert!(Measurement::parse("fail").is_missing());
        assert!(Measurement::parse("NaN").is_missing());
        assert!(Measurement::parse("inf").is_missing());
    }

    #[test]
    fn test_value_and_display() {
        assert_eq!(Measurement::Numeric(2.5).value(), Some(2.5));
        assert_eq!(Measurement::Missing.value(), None);
        assert_eq!(Measurement::Missing.to_string(), "-");
        assert_eq!(Measurement::Numeric(2.5).to_string(), "2.5");
    }
}
