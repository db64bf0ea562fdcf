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

//! SVG bar charts.

use quick_xml::escape::escape;

/// Chart canvas width.
const WIDTH: f64 = 720.0;
/// Space above the plot for the title.
const TOP: f64 = 56.0;
/// Space below the last bar.
const BOTTOM: f64 = 24.0;
/// Space left of the plot for the bar labels.
const LEFT: f64 = 160.0;
/// Space right of the plot for the annotations.
const RIGHT: f64 = 72.0;
/// Height of one bar row.
const ROW_HEIGHT: f64 = 44.0;
/// Share of each row taken by its bar.
const BAR_FILL: f64 = 0.6;
/// Label line spacing.
const LINE_HEIGHT: f64 = 14.0;

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Label; `\n` starts a new line.
    pub label: String,
    /// Score
    pub value: f64,
    /// SVG fill colour
    pub color: &'static str,
}

/// A titled horizontal bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    /// Title drawn above the plot.
    pub title: String,
    /// Bars, top to bottom.
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Creates an empty chart.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bars: Vec::new(),
        }
    }

    /// Appends a bar.
    pub fn push(&mut self, label: impl Into<String>, value: f64, color: &'static str) {
        self.bars.push(Bar {
            label: label.into(),
            value,
            color,
        });
    }

    /// Largest bar value, or zero for an empty chart.
    pub fn max_value(&self) -> f64 {
        self.bars
            .iter()
            .map(|b| b.value)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// Renders the chart as a standalone SVG document.
    ///
    /// One row per bar, labels on the left. Bar length is proportional to
    /// the value and the value is written to two decimals past the bar end.
    pub fn to_svg(&self) -> String {
        let plot_w = WIDTH - LEFT - RIGHT;
        let plot_h = ROW_HEIGHT * self.bars.len().max(1) as f64;
        let height = TOP + plot_h + BOTTOM;
        let scale_max = self.max_value().max(1.0);
        let bar_h = ROW_HEIGHT * BAR_FILL;

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"Arial,sans-serif\">\n",
            w = WIDTH,
            h = height
        ));
        svg.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"#FFFFFF\"/>\n",
            WIDTH, height
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"32\" text-anchor=\"middle\" font-size=\"18\" font-weight=\"bold\">{}</text>\n",
            WIDTH / 2.0,
            escape(self.title.as_str())
        ));

        for (i, bar) in self.bars.iter().enumerate() {
            let value = if bar.value.is_finite() { bar.value.max(0.0) } else { 0.0 };
            let width = plot_w * value / scale_max;
            let y = TOP + ROW_HEIGHT * i as f64 + (ROW_HEIGHT - bar_h) / 2.0;
            let middle = y + bar_h / 2.0;

            svg.push_str(&format!(
                "<rect class=\"bar\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" stroke=\"#333333\" stroke-width=\"0.5\"/>\n",
                LEFT, y, width, bar_h, bar.color
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\">{:.2}</text>\n",
                LEFT + width + 6.0,
                middle + 4.0,
                bar.value
            ));

            let lines: Vec<&str> = bar.label.lines().collect();
            let first_y = middle + 4.0 - LINE_HEIGHT * (lines.len().saturating_sub(1)) as f64 / 2.0;
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"12\">",
                LEFT - 8.0,
                first_y
            ));
            for (line, text) in lines.iter().enumerate() {
                let dy = if line == 0 { 0.0 } else { LINE_HEIGHT };
                svg.push_str(&format!(
                    "<tspan x=\"{:.1}\" dy=\"{}\">{}</tspan>",
                    LEFT - 8.0,
                    dy,
                    escape(*text)
                ));
            }
            svg.push_str("</text>\n");
        }

        svg.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"#333333\"/>\n",
            LEFT,
            TOP,
            LEFT,
            TOP + plot_h
        ));
        svg.push_str("</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_count_and_annotation() {
        let mut chart = BarChart::new("core");
        chart.push("Xeon\n16", 100.0, "gray");
        chart.push("K230\n2", 12.345, "yellow");
        let svg = chart.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("class=\"bar\"").count(), 2);
        assert!(svg.contains(">100.00<"));
        assert!(svg.contains(">12.35<"));
        assert!(svg.contains(">K230</tspan>"));
        assert!(svg.contains(">2</tspan>"));
        assert!(svg.contains("fill=\"yellow\""));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut chart = BarChart::new("a<b & c");
        chart.push("R&D\n4", 100.0, "gray");
        let svg = chart.to_svg();
        assert!(svg.contains("a&lt;b &amp; c"));
        assert!(svg.contains(">R&amp;D</tspan>"));
    }

    fn rect_attr(svg: &str, index: usize, attr: &str) -> f64 {
        let rect = svg
            .lines()
            .filter(|l| l.starts_with("<rect class=\"bar\""))
            .nth(index)
            .unwrap();
        let key = format!(" {}=\"", attr);
        let start = rect.find(&key).unwrap() + key.len();
        let end = start + rect[start..].find('"').unwrap();
        rect[start..end].parse().unwrap()
    }

    #[test]
    fn test_bars_are_horizontal_and_scaled() {
        let mut chart = BarChart::new("core");
        chart.push("scalar", 100.0, "gray");
        chart.push("RVV", 50.0, "yellow");
        let svg = chart.to_svg();

        let long = rect_attr(&svg, 0, "width");
        let short = rect_attr(&svg, 1, "width");
        assert!((long - 2.0 * short).abs() < 0.2);
        assert_eq!(rect_attr(&svg, 0, "height"), rect_attr(&svg, 1, "height"));
        assert_eq!(rect_attr(&svg, 0, "x"), rect_attr(&svg, 1, "x"));
        assert!(rect_attr(&svg, 1, "y") > rect_attr(&svg, 0, "y"));
        assert!(svg.contains(&format!("x=\"{:.1}\" y=", LEFT + long + 6.0)));
    }

    #[test]
    fn test_empty_chart() {
        let chart = BarChart::new("empty");
        assert_eq!(chart.max_value(), 0.0);
        assert_eq!(chart.to_svg().matches("class=\"bar\"").count(), 0);
    }
}
