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

//! Markdown export for score reports.

use super::{format_score, ReportRow, ReportTable, MISSING};
use crate::classify::DeviceType;
use crate::error::{Result, ScoreError};
use std::fs;
use std::path::Path;
use tracing::info;

impl ReportTable {
    /// Renders the report as a Markdown pipe table.
    ///
    /// The label column is left aligned, score columns right aligned; every
    /// column is padded to its widest cell so the file also reads well as
    /// plain text.
    pub fn to_markdown(&self) -> String {
        let grid: Vec<Vec<String>> = self
            .grid()
            .into_iter()
            .map(|line| line.iter().map(|cell| cell.replace('|', "\\|")).collect())
            .collect();
        let widths = column_widths(&grid);

        let mut md = String::new();
        for (i, line) in grid.iter().enumerate() {
            md.push('|');
            for (col, cell) in line.iter().enumerate() {
                if col == 0 {
                    md.push_str(&format!(" {:<w$} |", cell, w = widths[col]));
                } else {
                    md.push_str(&format!(" {:>w$} |", cell, w = widths[col]));
                }
            }
            md.push('\n');

            if i == 0 {
                md.push('|');
                for (col, width) in widths.iter().enumerate() {
                    if col == 0 {
                        md.push_str(&format!(":{}|", "-".repeat(width + 1)));
                    } else {
                        md.push_str(&format!("{}:|", "-".repeat(width + 1)));
                    }
                }
                md.push('\n');
            }
        }
        md
    }

    /// Writes the Markdown rendering to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Io`] when the file cannot be written.
    pub fn save_markdown(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ScoreError::io(parent, e))?;
        }
        fs::write(path, self.to_markdown()).map_err(|e| ScoreError::io(path, e))?;
        info!(path = %path.display(), rows = self.rows.len(), "wrote score report");
        Ok(())
    }

    /// Header row followed by formatted rows.
    pub(crate) fn grid(&self) -> Vec<Vec<String>> {
        std::iter::once(self.headers())
            .chain(self.rows.iter().map(|row| {
                std::iter::once(row.label.clone())
                    .chain(row.cells.iter().map(|c| format_score(*c)))
                    .collect()
            }))
            .collect()
    }
}

pub(crate) fn column_widths(grid: &[Vec<String>]) -> Vec<usize> {
    let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col| {
            grid.iter()
                .filter_map(|line| line.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Reads a report back from its Markdown rendering.
///
/// Lines that are not table rows are ignored. Values come back at display
/// precision, so `parse_markdown(&t.to_markdown()) == Ok(t.rounded())`.
///
/// # Errors
///
/// Returns [`ScoreError::Report`] when the header or alignment row is
/// missing, a row has the wrong width, or a cell is neither a number nor
/// `N/A`.
///
/// # Examples
///
/// ```
/// use perfscore_core::report::parse_markdown;
///
/// let md = "| Module | OCV |\n|:--|--:|\n| core | 105.00 |\n| Mean | 105.00 |\n";
/// let report = parse_markdown(md).unwrap();
/// assert_eq!(report.rows.len(), 2);
/// assert_eq!(report.rows[0].cells[0], Some(105.0));
/// ```
pub fn parse_markdown(text: &str) -> Result<ReportTable> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| line.starts_with('|'));

    let (header_line, header) = lines.next().ok_or_else(|| ScoreError::Report {
        line: 0,
        reason: "no table found".to_string(),
    })?;
    let headers = split_row(header);
    if headers.is_empty() {
        return Err(ScoreError::Report {
            line: header_line,
            reason: "empty header row".to_string(),
        });
    }

    match lines.next() {
        Some((_, align)) if is_alignment_row(align) => {}
        Some((line, _)) => {
            return Err(ScoreError::Report {
                line,
                reason: "expected alignment row after header".to_string(),
            })
        }
        None => {
            return Err(ScoreError::Report {
                line: header_line,
                reason: "missing alignment row".to_string(),
            })
        }
    }

    let devices: Vec<DeviceType> = headers[1..].iter().map(|h| DeviceType::new(h.as_str())).collect();
    let mut rows = Vec::new();
    for (line, raw) in lines {
        let cells = split_row(raw);
        if cells.len() != headers.len() {
            return Err(ScoreError::Report {
                line,
                reason: format!("expected {} cells, found {}", headers.len(), cells.len()),
            });
        }
        let values = cells[1..]
            .iter()
            .map(|cell| parse_cell(cell).ok_or_else(|| ScoreError::Report {
                line,
                reason: format!("'{}' is not a score", cell),
            }))
            .collect::<Result<Vec<_>>>()?;
        rows.push(ReportRow {
            label: cells[0].clone(),
            cells: values,
        });
    }

    Ok(ReportTable { devices, rows })
}

/// Splits a pipe table row into trimmed cells; `\|` is a literal pipe.
fn split_row(line: &str) -> Vec<String> {
    let inner = line.trim();
    let inner = inner.strip_prefix('|').unwrap_or(inner);

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    if !cell.trim().is_empty() {
        cells.push(cell.trim().to_string());
    }
    cells
}

fn is_alignment_row(line: &str) -> bool {
    split_row(line).iter().all(|cell| {
        !cell.is_empty() && cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':')
    })
}

/// `Some(None)` for a missing score, `None` for an unreadable cell.
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    if cell.is_empty() || cell == MISSING {
        return Some(None);
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> ReportTable {
        ReportTable {
            devices: vec![DeviceType::new("RVV"), DeviceType::new("NEON")],
            rows: vec![
                ReportRow {
                    label: "core".to_string(),
                    cells: vec![Some(104.881_176), None],
                },
                ReportRow {
                    label: "imgproc".to_string(),
                    cells: vec![Some(92.5), Some(120.004)],
                },
                ReportRow {
                    label: "Mean".to_string(),
                    cells: vec![Some(98.690_588), Some(120.004)],
                },
            ],
        }
    }

    #[test]
    fn test_markdown_layout() {
        let md = sample().to_markdown();
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "| Module  |    RVV |   NEON |");
        assert_eq!(lines[1], "|:--------|-------:|-------:|");
        assert_eq!(lines[2], "| core    | 104.88 |    N/A |");
        assert_eq!(lines[4], "| Mean    |  98.69 | 120.00 |");
    }

    #[test]
    fn test_pipe_in_label_round_trips() {
        let report = ReportTable {
            devices: vec![DeviceType::new("A|B")],
            rows: vec![
                ReportRow {
                    label: "core|x".to_string(),
                    cells: vec![Some(101.0)],
                },
                ReportRow {
                    label: "Mean".to_string(),
                    cells: vec![Some(101.0)],
                },
            ],
        };
        let md = report.to_markdown();
        assert!(md.contains("A\\|B"));
        assert!(md.contains("| core\\|x |"));
        assert_eq!(parse_markdown(&md).unwrap(), report.rounded());
    }

    #[test]
    fn test_round_trip_recovers_rounded_values() {
        let report = sample();
        let parsed = parse_markdown(&report.to_markdown()).unwrap();
        assert_eq!(parsed, report.rounded());
    }

    #[test]
    fn test_parse_rejects_bad_cell() {
        let md = "| Module | X |\n|---|---|\n| core | fast |\n";
        let err = parse_markdown(md).unwrap_err();
        assert!(matches!(err, ScoreError::Report { line: 3, .. }));
    }

    #[test]
    fn test_parse_requires_alignment_row() {
        let md = "| Module | X |\n| core | 1.00 |\n";
        assert!(parse_markdown(md).is_err());
        assert!(parse_markdown("no table here").is_err());
    }

    #[test]
    fn test_save_markdown_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("scores.md");
        sample().save_markdown(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("| Module"));
    }
}
