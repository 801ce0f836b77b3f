// ⚙️ Configuration
// Defaults → optional JSON file → environment overrides
//
// The engine defaults reproduce the standard Zengin checks exactly;
// overriding them is for originators that don't bank with 0036.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const ENV_BIND_ADDR: &str = "ZENGIN_BIND_ADDR";
pub const ENV_MAX_INPUT_BYTES: &str = "ZENGIN_MAX_INPUT_BYTES";
pub const ENV_ORIGINATOR_BANK_CODE: &str = "ZENGIN_ORIGINATOR_BANK_CODE";
pub const ENV_MIN_LINES: &str = "ZENGIN_MIN_LINES";

// ============================================================================
// ENGINE CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Literal required in header field 6
    pub originator_bank_code: String,

    /// Header + data + trailer + end
    pub min_lines: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            originator_bank_code: "0036".to_string(),
            min_lines: 4,
        }
    }
}

// ============================================================================
// APPLICATION CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listen address for the HTTP server
    pub bind_addr: String,

    /// Inputs larger than this are refused before validation
    pub max_input_bytes: usize,

    pub validator: ValidatorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: "0.0.0.0:3000".to_string(),
            max_input_bytes: 10 * 1024 * 1024,
            validator: ValidatorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the layered configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Read a JSON config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = addr;
        }

        if let Some(raw) = lookup(ENV_MAX_INPUT_BYTES) {
            self.max_input_bytes = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a byte count, got {:?}", ENV_MAX_INPUT_BYTES, raw))?;
        }

        if let Some(code) = lookup(ENV_ORIGINATOR_BANK_CODE) {
            self.validator.originator_bank_code = code;
        }

        if let Some(raw) = lookup(ENV_MIN_LINES) {
            self.validator.min_lines = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a line count, got {:?}", ENV_MIN_LINES, raw))?;
        }

        Ok(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================
