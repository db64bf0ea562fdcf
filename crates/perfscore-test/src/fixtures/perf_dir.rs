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

//! Scratch perf directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory laid out like the benchmark runner's output.
///
/// Removed when dropped.
///
/// # Examples
///
/// ```
/// use perfscore_test::fixtures::{self, perf_dir::PerfDir};
///
/// let dir = PerfDir::new().unwrap();
/// let path = dir.write_module("core", &fixtures::core_table()).unwrap();
/// assert!(path.ends_with("core.html"));
/// ```
#[derive(Debug)]
pub struct PerfDir {
    dir: TempDir,
}

impl PerfDir {
    /// Creates an empty perf directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Creates a perf directory holding every canned table.
    pub fn with_fixtures() -> io::Result<Self> {
        let dir = Self::new()?;
        for (module, table) in super::all() {
            dir.write_module(module, &table())?;
        }
        Ok(dir)
    }

    /// Root of the directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `<module>.html`.
    pub fn write_module(&self, module: &str, html: &str) -> io::Result<PathBuf> {
        self.write_file(&format!("{}.html", module), html.as_bytes())
    }

    /// Writes `processor.json` at the root.
    pub fn write_descriptor(&self, json: &str) -> io::Result<PathBuf> {
        self.write_file("processor.json", json.as_bytes())
    }

    /// Writes an arbitrary file relative to the root.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Path of a file relative to the root, whether or not it exists.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_fixtures_writes_all_modules() {
        let dir = PerfDir::with_fixtures().unwrap();
        assert!(dir.join("core.html").exists());
        assert!(dir.join("imgproc.html").exists());
        assert!(!dir.join("processor.json").exists());
    }

    #[test]
    fn test_write_nested_file() {
        let dir = PerfDir::new().unwrap();
        let path = dir.write_file("out/notes.txt", b"x").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"x");
    }
}
