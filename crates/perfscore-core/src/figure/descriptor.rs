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

//! Processor descriptor loading.
//!
//! The descriptor names the baseline machine and every known target processor
//! together with its core count and architecture. It is only consulted when
//! figures are rendered.

use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Default descriptor file name.
pub const DEFAULT_DESCRIPTOR: &str = "processor.json";

/// Colour of the baseline bar.
pub const BASELINE_COLOR: &str = "gray";

/// Instruction set family of a processor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Architecture {
    /// ARM / AArch64
    Arm,
    /// RISC-V
    RiscV,
    /// x86_64 / AMD64
    X86_64,
    /// Anything else, with the name as written.
    Unknown(String),
}

impl Architecture {
    /// Bar colour for this architecture.
    pub fn color(&self) -> &'static str {
        match self {
            Architecture::Arm => "purple",
            Architecture::RiscV => "yellow",
            Architecture::X86_64 => "cyan",
            Architecture::Unknown(_) => "red",
        }
    }
}

impl From<&str> for Architecture {
    fn from(name: &str) -> Self {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "arm" | "arm64" | "aarch64" | "armv8" | "armv9" => Architecture::Arm,
            "riscv" | "riscv64" | "rv64" => Architecture::RiscV,
            "x8664" | "x64" | "amd64" => Architecture::X86_64,
            _ => Architecture::Unknown(name.to_string()),
        }
    }
}

impl From<String> for Architecture {
    fn from(name: String) -> Self {
        Architecture::from(name.as_str())
    }
}

impl From<Architecture> for String {
    fn from(arch: Architecture) -> Self {
        arch.to_string()
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::Arm => f.write_str("ARM"),
            Architecture::RiscV => f.write_str("RISC-V"),
            Architecture::X86_64 => f.write_str("x86_64"),
            Architecture::Unknown(name) => f.write_str(name),
        }
    }
}

/// Core count as written in the descriptor, either a number or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoreCount {
    /// Numeric count
    Count(u32),
    /// Free-form label such as `"4+4"`
    Label(String),
}

impl fmt::Display for CoreCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreCount::Count(n) => write!(f, "{}", n),
            CoreCount::Label(s) => f.write_str(s),
        }
    }
}

/// The reference machine every score is relative to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineProcessor {
    /// Display name
    #[serde(rename = "Processor")]
    pub name: String,
    /// Core count
    #[serde(rename = "Cores")]
    pub cores: CoreCount,
}

/// A target processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Processor {
    /// Name; matched against device labels
    #[serde(rename = "Processor")]
    pub name: String,
    /// Core count
    #[serde(rename = "Cores")]
    pub cores: CoreCount,
    /// Architecture family
    #[serde(rename = "Arch")]
    pub arch: Architecture,
}

/// Contents of the processor descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorDescriptor {
    /// Baseline machine
    pub baseline: BaselineProcessor,
    /// Known targets, in display order
    #[serde(default)]
    pub processors: Vec<Processor>,
}

impl ProcessorDescriptor {
    /// Parses descriptor JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use perfscore_core::figure::{Architecture, ProcessorDescriptor};
    ///
    /// let json = r#"{
    ///     "baseline": {"Processor": "i7-12700", "Cores": 12},
    ///     "processors": [{"Processor": "K1", "Cores": "8", "Arch": "RISC-V"}]
    /// }"#;
    /// let descriptor = ProcessorDescriptor::from_json(json).unwrap();
    /// assert_eq!(descriptor.processors[0].arch, Architecture::RiscV);
    /// ```
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads the descriptor from disk.
    ///
    /// # Errors
    ///
    /// - [`ScoreError::DescriptorMissing`] if the file does not exist
    /// - [`ScoreError::Io`] if it cannot be read
    /// - [`ScoreError::Descriptor`] if it is not a valid descriptor
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ScoreError::DescriptorMissing {
                path: path.to_path_buf(),
            },
            _ => ScoreError::io(path, e),
        })?;
        let descriptor = Self::from_json(&json).map_err(|e| ScoreError::Descriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(
            path = %path.display(),
            processors = descriptor.processors.len(),
            "loaded processor descriptor"
        );
        Ok(descriptor)
    }

    /// Looks a processor up by name.
    pub fn processor(&self, name: &str) -> Option<&Processor> {
        self.processors.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "baseline": {"Processor": "Xeon", "Cores": 16},
        "processors": [
            {"Processor": "K230", "Cores": 2, "Arch": "RISC-V"},
            {"Processor": "RK3588", "Cores": "4+4", "Arch": "ARM"},
            {"Processor": "EPYC", "Cores": 64, "Arch": "x86_64"},
            {"Processor": "Mystery", "Cores": 1, "Arch": "MIPS"}
        ]
    }"#;

    #[test]
    fn test_parse_descriptor() {
        let d = ProcessorDescriptor::from_json(JSON).unwrap();
        assert_eq!(d.baseline.name, "Xeon");
        assert_eq!(d.baseline.cores, CoreCount::Count(16));
        assert_eq!(d.processors.len(), 4);
        assert_eq!(d.processor("RK3588").unwrap().cores.to_string(), "4+4");
        assert_eq!(
            d.processor("Mystery").unwrap().arch,
            Architecture::Unknown("MIPS".to_string())
        );
    }

    #[test]
    fn test_palette_is_total() {
        assert_eq!(Architecture::from("ARM").color(), "purple");
        assert_eq!(Architecture::from("aarch64").color(), "purple");
        assert_eq!(Architecture::from("RISC-V").color(), "yellow");
        assert_eq!(Architecture::from("riscv64").color(), "yellow");
        assert_eq!(Architecture::from("x86_64").color(), "cyan");
        assert_eq!(Architecture::from("AMD64").color(), "cyan");
        assert_eq!(Architecture::from("sparc").color(), "red");
    }

    #[test]
    fn test_empty_processor_list() {
        let d = ProcessorDescriptor::from_json(r#"{"baseline": {"Processor": "B", "Cores": 4}}"#)
            .unwrap();
        assert!(d.processors.is_empty());
    }

    #[test]
    fn test_load_missing_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcessorDescriptor::load(dir.path().join("processor.json")).unwrap_err();
        assert!(matches!(err, ScoreError::DescriptorMissing { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_load_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processor.json");
        fs::write(&path, "{\"processors\": []}").unwrap();
        let err = ProcessorDescriptor::load(&path).unwrap_err();
        assert!(matches!(err, ScoreError::Descriptor { .. }));
    }
}
