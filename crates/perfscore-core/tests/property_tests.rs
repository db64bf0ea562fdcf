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

//! Property-based tests for column classification and the means.

use perfscore_core::aggregate::{arithmetic_mean, geometric_mean};
use perfscore_core::classify::{classify, device_label, split_point};
use perfscore_core::Measurement;
use proptest::prelude::*;

fn headers(targets: &[String]) -> Vec<String> {
    let mut headers = vec!["Name of Test".to_string(), "perf-base".to_string()];
    headers.extend(targets.iter().map(|t| format!("perf-{}", t)));
    headers.extend(targets.iter().map(|t| format!("perf-{} vs perf-base (x-factor)", t)));
    headers
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: The two halves cover every column except the name column.
    #[test]
    fn prop_halves_cover_all_but_name(targets in prop::collection::vec("[A-Za-z0-9]{1,8}", 1..8)) {
        let headers = headers(&targets);
        let layout = classify("core", &headers).unwrap();

        prop_assert_eq!(layout.baseline.len() + layout.comparisons.len(), headers.len() - 1);
        prop_assert_eq!(layout.comparisons.len(), targets.len());
        prop_assert_eq!(layout.baseline.start, 1);
        prop_assert_eq!(layout.baseline.end, split_point(headers.len()));
    }

    /// Property: Device labels come back exactly as written.
    #[test]
    fn prop_device_label_roundtrip(name in "[A-Za-z0-9][A-Za-z0-9_.-]{0,15}") {
        let header = format!("perf-{} vs perf-base", name);
        let label = device_label(&header).unwrap();
        prop_assert_eq!(label.as_str(), name.as_str());
    }

    /// Property: Odd column counts are always rejected.
    #[test]
    fn prop_odd_width_rejected(n in 0_usize..20) {
        let headers: Vec<String> = (0..2 * n + 1).map(|i| format!("h-{} vs b", i)).collect();
        prop_assert!(classify("core", &headers).is_err());
    }

    /// Property: The arithmetic mean lies between the extremes.
    #[test]
    fn prop_arithmetic_mean_bounded(values in prop::collection::vec(-1e6_f64..1e6, 1..50)) {
        let mean = arithmetic_mean(&values).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(mean >= min - 1e-6 && mean <= max + 1e-6);
    }

    /// Property: Geometric mean never exceeds the arithmetic mean.
    #[test]
    fn prop_geometric_not_above_arithmetic(values in prop::collection::vec(1e-3_f64..1e3, 1..50)) {
        let g = geometric_mean(&values).unwrap();
        let a = arithmetic_mean(&values).unwrap();
        prop_assert!(g <= a * (1.0 + 1e-9));
        prop_assert!(g > 0.0);
    }

    /// Property: Non-positive values never contribute to the geometric mean.
    #[test]
    fn prop_geometric_ignores_non_positive(
        positives in prop::collection::vec(1e-3_f64..1e3, 1..20),
        others in prop::collection::vec(-1e3_f64..=0.0, 0..20),
    ) {
        let mut mixed = positives.clone();
        mixed.extend(others);
        let a = geometric_mean(&positives).unwrap();
        let b = geometric_mean(&mixed).unwrap();
        prop_assert!((a - b).abs() <= a * 1e-12);
    }

    /// Property: Finite numbers parse as numeric, everything else as missing.
    #[test]
    fn prop_measurement_parse(value in -1e9_f64..1e9, junk in "[a-zA-Z ]{0,10}") {
        prop_assert_eq!(Measurement::parse(&value.to_string()), Measurement::Numeric(value));
        prop_assert_eq!(Measurement::parse(&junk), Measurement::Missing);
    }
}
