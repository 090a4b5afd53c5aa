//! Oracle configuration.
//!
//! Defaults reproduce the behaviour of the published grading setup: seed
//! 12345, 300 recorded cases per function, entries cut at 300 characters and
//! compared exactly below 295.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OracleError, OracleResult};

/// Seed fed to every seeded case generator.
pub const DEFAULT_SEED: u64 = 12345;

/// Default name of the golden record file.
pub const DEFAULT_RECORD_PATH: &str = "record";

/// Size limits for the golden record and for failure displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecordLimits {
    /// Number of cases compared against the record per function. The
    /// recording pass writes one entry more than this.
    pub testcase_cutoff: usize,
    /// Maximum characters kept per recorded entry.
    pub entry_width: usize,
    /// Recorded entries shorter than this must match exactly; longer ones only
    /// as a prefix.
    pub exact_threshold: usize,
    /// Argument collections at least this long are abbreviated in reports.
    pub arg_display_cutoff: usize,
}

impl RecordLimits {
    /// The standard limits.
    pub const fn standard() -> Self {
        Self {
            testcase_cutoff: 300,
            entry_width: 300,
            exact_threshold: 295,
            arg_display_cutoff: 100,
        }
    }

    /// Reject limit combinations that would make the prefix rule meaningless.
    pub fn validate(&self) -> OracleResult<()> {
        if self.entry_width == 0 {
            return Err(OracleError::Config("entry_width must be positive".to_string()));
        }
        if self.exact_threshold > self.entry_width {
            return Err(OracleError::Config(format!(
                "exact_threshold {} exceeds entry_width {}",
                self.exact_threshold, self.entry_width
            )));
        }
        Ok(())
    }
}

impl Default for RecordLimits {
    fn default() -> Self {
        Self::standard()
    }
}

/// Top-level configuration, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Seed for the case generators.
    pub seed: u64,
    /// Location of the golden record file.
    pub record_path: PathBuf,
    /// Whether an existing golden record is consulted while checking.
    pub use_record: bool,
    /// Record and display limits.
    pub limits: RecordLimits,
}

impl OracleConfig {
    /// Load a configuration file; missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> OracleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| OracleError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> OracleResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| OracleError::Config(format!("failed to parse config JSON: {}", e)))?;
        config.limits.validate()?;
        Ok(config)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            record_path: PathBuf::from(DEFAULT_RECORD_PATH),
            use_record: true,
            limits: RecordLimits::standard(),
        }
    }
}
