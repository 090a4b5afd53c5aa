//! Golden record store.
//!
//! A gzip-compressed UTF-8 text file holding, for each function, the canonical
//! result text of its first cases:
//!
//! ```text
//! ****function_name
//! <entry for case 0>
//! <entry for case 1>
//! ...
//! ```
//!
//! Entries are cut to a fixed width. During checking an entry shorter than the
//! exact-match threshold must equal the live text; a longer one need only be a
//! prefix of it.
//!
//! The file is produced in one pass and replaced as a whole.

mod entry;
mod store;
mod writer;

pub use entry::{entry_matches, is_truncated, normalize, record_entry, SECTION_MARKER};
pub use store::GoldenRecord;
pub use writer::{PendingRecord, RecordWriter};
