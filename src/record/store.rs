//! Reading the golden record.

use flate2::read::GzDecoder;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::entry::{entry_matches, SECTION_MARKER};
use crate::config::RecordLimits;
use crate::error::{OracleError, OracleResult};

/// Expected per-case results for every recorded function.
#[derive(Debug, Clone, Default)]
pub struct GoldenRecord {
    sections: BTreeMap<String, Vec<String>>,
    limits: RecordLimits,
}

impl GoldenRecord {
    /// Create an empty record.
    pub fn new(limits: RecordLimits) -> Self {
        Self {
            sections: BTreeMap::new(),
            limits,
        }
    }

    /// Load a gzip-compressed record file.
    pub fn load<P: AsRef<Path>>(path: P, limits: RecordLimits) -> OracleResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| OracleError::io(path, e))?;
        let reader = BufReader::new(GzDecoder::new(file));
        let record = Self::from_reader(reader, limits).map_err(|e| match e {
            OracleError::Io { source, .. } => OracleError::io(path, source),
            other => other,
        })?;
        tracing::debug!(
            path = %path.display(),
            functions = record.len(),
            "loaded golden record"
        );
        Ok(record)
    }

    /// Parse uncompressed record text.
    ///
    /// Every line is trimmed. A `****name` line starts the section for `name`
    /// (restarting it if seen before); any other line is an entry of the
    /// current section.
    pub fn from_reader<R: BufRead>(reader: R, limits: RecordLimits) -> OracleResult<Self> {
        let mut record = Self::new(limits);
        let mut current: Option<String> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| OracleError::io("<record>", e))?;
            let line = line.trim();
            if let Some(name) = line.strip_prefix(SECTION_MARKER) {
                record.sections.insert(name.to_string(), Vec::new());
                current = Some(name.to_string());
                continue;
            }
            let name = current.as_ref().ok_or_else(|| OracleError::MalformedRecord {
                line: idx + 1,
                reason: "entry before any section header".to_string(),
            })?;
            if let Some(entries) = record.sections.get_mut(name) {
                entries.push(line.to_string());
            }
        }

        Ok(record)
    }

    /// Recorded entries for a function, if it was recorded.
    pub fn entries(&self, function: &str) -> Option<&[String]> {
        self.sections.get(function).map(Vec::as_slice)
    }

    /// Whether the function has a section.
    pub fn contains(&self, function: &str) -> bool {
        self.sections.contains_key(function)
    }

    /// Names of all recorded functions, sorted.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Number of recorded functions.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if no function was recorded.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Limits this record is compared under.
    pub fn limits(&self) -> &RecordLimits {
        &self.limits
    }

    /// Compare a live result text with a recorded entry.
    pub fn entry_matches(&self, recorded: &str, live_text: &str) -> bool {
        entry_matches(recorded, live_text, &self.limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections() {
        let text = "****alpha\n1\n2\n****beta\n[1, 2]\n";
        let record = GoldenRecord::from_reader(text.as_bytes(), RecordLimits::standard()).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.entries("alpha").unwrap(), &["1", "2"]);
        assert_eq!(record.entries("beta").unwrap(), &["[1, 2]"]);
        assert!(record.entries("gamma").is_none());
        assert_eq!(record.function_names().collect::<Vec<_>>(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_empty_section() {
        let text = "****alpha\n****beta\nx\n";
        let record = GoldenRecord::from_reader(text.as_bytes(), RecordLimits::standard()).unwrap();
        assert!(record.contains("alpha"));
        assert!(record.entries("alpha").unwrap().is_empty());
    }

    #[test]
    fn test_lines_are_trimmed() {
        let text = "****alpha  \n  hello world \r\n";
        let record = GoldenRecord::from_reader(text.as_bytes(), RecordLimits::standard()).unwrap();
        assert_eq!(record.entries("alpha").unwrap(), &["hello world"]);
    }

    #[test]
    fn test_entry_before_header_rejected() {
        let err = GoldenRecord::from_reader("orphan\n".as_bytes(), RecordLimits::standard())
            .unwrap_err();
        assert!(matches!(err, OracleError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_repeated_header_restarts_section() {
        let text = "****alpha\nold\n****alpha\nnew\n";
        let record = GoldenRecord::from_reader(text.as_bytes(), RecordLimits::standard()).unwrap();
        assert_eq!(record.entries("alpha").unwrap(), &["new"]);
    }
}
