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

//! Benchmark table loading.
//!
//! The benchmark runner exports one HTML page per module. Only the first
//! `<table>` of the page matters; it is cut out of the document before parsing
//! so page chrome (styles, scripts, navigation) never reaches the markup
//! reader. The reader itself runs with HTML-friendly settings: end tags need
//! not balance, attributes may be valueless and common entities are decoded.

use crate::error::{Result, ScoreError};
use crate::measurement::Measurement;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of exported benchmark tables.
pub const TABLE_EXTENSION: &str = "html";

/// Upper bound on `colspan` so a corrupt attribute cannot blow up a row.
const MAX_COLSPAN: usize = 64;

/// One module's benchmark results.
///
/// Every row holds exactly `headers().len()` cells; short rows are padded with
/// empty cells (which read as [`Measurement::Missing`]) and long rows are cut.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTable {
    module: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl BenchmarkTable {
    /// Creates a table from already extracted headers and rows.
    pub fn new(module: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            module: module.into(),
            headers,
            rows,
        }
    }

    /// Parses the first table of an HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Parse`] when the document has no table, the table
    /// has no header row, or the markup inside the table cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use perfscore_core::BenchmarkTable;
    ///
    /// let html = "<table><tr><th>Name</th><th>Time</th></tr>\
    ///             <tr><td>resize</td><td>1.5</td></tr></table>";
    /// let table = BenchmarkTable::from_html("imgproc", html).unwrap();
    /// assert_eq!(table.headers(), ["Name", "Time"]);
    /// assert_eq!(table.cell(0, 1), Some("1.5"));
    /// ```
    pub fn from_html(module: &str, html: &str) -> Result<Self> {
        let parse_error = |reason: String| ScoreError::Parse {
            module: module.to_string(),
            reason,
        };

        let fragment =
            first_table(html).ok_or_else(|| parse_error("no <table> element found".to_string()))?;
        let fragment = escape_stray_lt(fragment);
        let rows = read_rows(&fragment).map_err(parse_error)?;
        let (headers, data) = split_header(rows).map_err(parse_error)?;

        debug!(
            module,
            columns = headers.len(),
            rows = data.len(),
            "parsed benchmark table"
        );
        Ok(Self::new(module, headers, data))
    }

    /// Module this table belongs to.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Column headers, in document order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, in document order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the raw text of a cell.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Texts of the first column, which names each test.
    pub fn row_names(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(|row| row.first().map(String::as_str).unwrap_or(""))
    }

    /// Parses every cell of a column.
    pub fn measurements(&self, column: usize) -> Vec<Measurement> {
        self.rows
            .iter()
            .map(|row| {
                row.get(column)
                    .map(|cell| Measurement::parse(cell))
                    .unwrap_or(Measurement::Missing)
            })
            .collect()
    }
}

/// Locates module tables inside a perf directory.
#[derive(Debug, Clone)]
pub struct TableLoader {
    perf_dir: PathBuf,
}

impl TableLoader {
    /// Creates a loader rooted at `perf_dir`.
    pub fn new(perf_dir: impl Into<PathBuf>) -> Self {
        Self {
            perf_dir: perf_dir.into(),
        }
    }

    /// Directory tables are read from.
    pub fn perf_dir(&self) -> &Path {
        &self.perf_dir
    }

    /// Path of a module's table: `<perf_dir>/<module>.html`.
    pub fn path_for(&self, module: &str) -> PathBuf {
        self.perf_dir.join(format!("{}.{}", module, TABLE_EXTENSION))
    }

    /// Reads and parses a module's table.
    ///
    /// # Errors
    ///
    /// - [`ScoreError::NotFound`] if the file does not exist
    /// - [`ScoreError::Io`] if it exists but cannot be read
    /// - [`ScoreError::Parse`] if no table can be extracted
    pub fn load(&self, module: &str) -> Result<BenchmarkTable> {
        let path = self.path_for(module);
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ScoreError::NotFound {
                module: module.to_string(),
                path: path.clone(),
            },
            _ => ScoreError::io(&path, e),
        })?;
        let html = String::from_utf8_lossy(&bytes);
        BenchmarkTable::from_html(module, &html)
    }
}

/// Returns the slice spanning the first `<table ...>` through its `</table>`.
///
/// An unterminated table runs to the end of the document.
fn first_table(html: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets valid for slicing the original.
    let lower = html.to_ascii_lowercase();
    let mut search = 0;
    let start = loop {
        let at = search + lower[search..].find("<table")?;
        let next = lower.as_bytes().get(at + "<table".len()).copied();
        match next {
            Some(b) if b == b'>' || b == b'/' || b.is_ascii_whitespace() => break at,
            None => return None,
            _ => search = at + 1,
        }
    };
    let end = match lower[start..].find("</table") {
        Some(offset) => {
            let close = start + offset;
            lower[close..]
                .find('>')
                .map(|gt| close + gt + 1)
                .unwrap_or(html.len())
        }
        None => html.len(),
    };
    Some(&html[start..end])
}

/// Escapes every `<` that cannot open a tag, so text such as `x < y` stays
/// cell text instead of being read as markup.
fn escape_stray_lt(fragment: &str) -> Cow<'_, str> {
    let opens_tag = |next: Option<u8>| {
        matches!(next, Some(b) if b.is_ascii_alphabetic() || b == b'/' || b == b'!' || b == b'?')
    };
    let bytes = fragment.as_bytes();
    let stray = |i: usize| bytes[i] == b'<' && !opens_tag(bytes.get(i + 1).copied());
    if !(0..bytes.len()).any(stray) {
        return Cow::Borrowed(fragment);
    }

    let mut out = String::with_capacity(fragment.len() + 8);
    let mut last = 0;
    for i in (0..bytes.len()).filter(|&i| stray(i)) {
        out.push_str(&fragment[last..i]);
        out.push_str("&lt;");
        last = i + 1;
    }
    out.push_str(&fragment[last..]);
    Cow::Owned(out)
}

/// A cell as it appears in the markup, before `colspan` expansion.
#[derive(Debug)]
struct RawCell {
    text: String,
    header: bool,
    span: usize,
}

/// Accumulates rows while walking markup events.
#[derive(Debug, Default)]
struct RowCollector {
    rows: Vec<Vec<RawCell>>,
    row: Option<Vec<RawCell>>,
    cell: Option<RawCell>,
}

impl RowCollector {
    fn open_row(&mut self) {
        self.close_row();
        self.row = Some(Vec::new());
    }

    fn close_row(&mut self) {
        self.close_cell();
        if let Some(row) = self.row.take() {
            if !row.is_empty() {
                self.rows.push(row);
            }
        }
    }

    fn open_cell(&mut self, header: bool, span: usize) {
        self.close_cell();
        // Cells outside an explicit <tr> still form a row.
        if self.row.is_none() {
            self.row = Some(Vec::new());
        }
        self.cell = Some(RawCell {
            text: String::new(),
            header,
            span,
        });
    }

    fn close_cell(&mut self) {
        if let Some(mut cell) = self.cell.take() {
            cell.text = cell.text.split_whitespace().collect::<Vec<_>>().join(" ");
            if let Some(row) = self.row.as_mut() {
                row.push(cell);
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.text.push_str(text);
        }
    }

    fn finish(mut self) -> Vec<Vec<RawCell>> {
        self.close_row();
        self.rows
    }
}

/// Walks the table fragment and collects its rows.
fn read_rows(fragment: &str) -> std::result::Result<Vec<Vec<RawCell>>, String> {
    let mut reader = Reader::from_str(fragment);
    reader.trim_text(false);
    reader.check_end_names(false);

    let mut collector = RowCollector::default();
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = tag_name(&e);
                match name.as_str() {
                    "table" => depth += 1,
                    "tr" => collector.open_row(),
                    "td" | "th" => collector.open_cell(name == "th", colspan(&e)),
                    "br" => collector.push_text(" "),
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let name = tag_name(&e);
                match name.as_str() {
                    "tr" => collector.close_row(),
                    "td" | "th" => {
                        collector.open_cell(name == "th", colspan(&e));
                        collector.close_cell();
                    }
                    "br" => collector.push_text(" "),
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                match name.as_str() {
                    "td" | "th" => collector.close_cell(),
                    "tr" | "thead" | "tbody" | "tfoot" => collector.close_row(),
                    "table" => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                let text = match e.unescape_with(html_entity) {
                    Ok(text) => text,
                    Err(_) => Cow::Owned(String::from_utf8_lossy(&e).into_owned()),
                };
                collector.push_text(&text);
            }
            Ok(Event::CData(e)) => {
                collector.push_text(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "markup error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
    }

    Ok(collector.finish())
}

/// Picks the header row and the data rows, expanding `colspan`.
fn split_header(
    rows: Vec<Vec<RawCell>>,
) -> std::result::Result<(Vec<String>, Vec<Vec<String>>), String> {
    if rows.is_empty() {
        return Err("table has no rows".to_string());
    }

    let first_data = rows.iter().position(|row| row.iter().any(|c| !c.header));
    let (header_index, data_start) = match first_data {
        Some(0) => (0, 1),
        Some(i) => {
            let header = rows[..i]
                .iter()
                .rposition(|row| row.iter().all(|c| c.header))
                .unwrap_or(0);
            (header, i)
        }
        None => (rows.len() - 1, rows.len()),
    };

    let expand = |row: &[RawCell]| -> Vec<String> {
        row.iter()
            .flat_map(|cell| std::iter::repeat(cell.text.clone()).take(cell.span))
            .collect()
    };

    let headers = expand(&rows[header_index]);
    if headers.is_empty() {
        return Err("header row has no columns".to_string());
    }

    let data = rows[data_start..]
        .iter()
        .filter(|row| row.iter().any(|c| !c.header))
        .map(|row| expand(row))
        .collect();

    Ok((headers, data))
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn colspan(e: &BytesStart<'_>) -> usize {
    e.html_attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(b"colspan"))
        .and_then(|attr| String::from_utf8_lossy(&attr.value).trim().parse::<usize>().ok())
        .map(|span| span.clamp(1, MAX_COLSPAN))
        .unwrap_or(1)
}

/// Resolves the named HTML entities the runner's pages use.
fn html_entity(name: &str) -> Option<&'static str> {
    match name {
        "nbsp" => Some(" "),
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        "times" => Some("\u{d7}"),
        "plusmn" => Some("\u{b1}"),
        "micro" => Some("\u{b5}"),
        _ => None,
    }
}
