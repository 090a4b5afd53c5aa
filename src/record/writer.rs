//! Writing the golden record.
//!
//! A generation pass writes into a temporary file next to the destination and
//! renames it into place only when the whole pass succeeded. Dropping a
//! [`PendingRecord`] without committing removes the temporary file, so an
//! interrupted pass never leaves a complete-looking record behind.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::entry::{record_entry, SECTION_MARKER};
use crate::config::RecordLimits;
use crate::error::{OracleError, OracleResult};

/// Line writer for record sections over any `Write`.
pub struct RecordWriter<W: Write> {
    out: W,
    limits: RecordLimits,
    sections: usize,
    entries: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap a writer.
    pub fn from_writer(out: W, limits: RecordLimits) -> Self {
        Self {
            out,
            limits,
            sections: 0,
            entries: 0,
        }
    }

    /// Start the section for a function.
    pub fn begin_section(&mut self, function: &str) -> io::Result<()> {
        writeln!(self.out, "{}{}", SECTION_MARKER, function)?;
        self.sections += 1;
        Ok(())
    }

    /// Append the entry for one case's canonical result text.
    pub fn write_entry(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", record_entry(text, self.limits.entry_width))?;
        self.entries += 1;
        Ok(())
    }

    /// Sections started so far.
    pub fn sections(&self) -> usize {
        self.sections
    }

    /// Entries written so far, over all sections.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Limits in effect.
    pub fn limits(&self) -> &RecordLimits {
        &self.limits
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// A record file being generated; becomes visible only on [`commit`](Self::commit).
pub struct PendingRecord {
    writer: RecordWriter<GzEncoder<NamedTempFile>>,
    dest: PathBuf,
}

impl PendingRecord {
    /// Start generating a record that will replace `dest`.
    pub fn create<P: AsRef<Path>>(dest: P, limits: RecordLimits) -> OracleResult<Self> {
        let dest = dest.as_ref().to_path_buf();
        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp = NamedTempFile::new_in(&dir).map_err(|e| OracleError::io(&dir, e))?;
        let encoder = GzEncoder::new(tmp, Compression::default());
        Ok(Self {
            writer: RecordWriter::from_writer(encoder, limits),
            dest,
        })
    }

    /// The section writer.
    pub fn writer(&mut self) -> &mut RecordWriter<GzEncoder<NamedTempFile>> {
        &mut self.writer
    }

    /// Destination path the record will be committed to.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Finish compression and atomically move the file into place.
    pub fn commit(self) -> OracleResult<PathBuf> {
        let Self { writer, dest } = self;
        let (sections, entries) = (writer.sections(), writer.entries());
        let encoder = writer.into_inner().map_err(|e| OracleError::io(&dest, e))?;
        let tmp = encoder.finish().map_err(|e| OracleError::io(&dest, e))?;
        tmp.persist(&dest)
            .map_err(|e| OracleError::io(&dest, e.error))?;
        tracing::info!(
            path = %dest.display(),
            sections,
            entries,
            "golden record written"
        );
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::GoldenRecord;

    #[test]
    fn test_writer_format() {
        let mut writer = RecordWriter::from_writer(Vec::new(), RecordLimits::standard());
        writer.begin_section("square").unwrap();
        writer.write_entry("1").unwrap();
        writer.write_entry(" 4 \n").unwrap();
        assert_eq!(writer.sections(), 1);
        assert_eq!(writer.entries(), 2);
        let bytes = writer.into_inner().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "****square\n1\n4\n");
    }

    #[test]
    fn test_commit_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record");
        let mut pending = PendingRecord::create(&path, RecordLimits::standard()).unwrap();
        pending.writer().begin_section("f").unwrap();
        pending.writer().write_entry("[(1, 'a')]").unwrap();
        assert!(!path.exists());
        pending.commit().unwrap();

        let record = GoldenRecord::load(&path, RecordLimits::standard()).unwrap();
        assert_eq!(record.entries("f").unwrap(), &["[(1, 'a')]"]);
    }

    #[test]
    fn test_dropped_pending_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record");
        {
            let mut pending = PendingRecord::create(&path, RecordLimits::standard()).unwrap();
            pending.writer().begin_section("f").unwrap();
        }
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
