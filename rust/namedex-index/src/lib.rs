//! # Letter-bucketed name index
//!
//! Indexes a large, newline-delimited file of names that is pre-sorted by its
//! leading letter, and serves paginated lookups per letter without ever
//! materializing the file in memory.
//!
//! ## Architecture
//!
//! - **Index build** ([`builder`]): a single streaming pass over the source
//!   detects letter-group boundaries and records, per letter, the ordinal of
//!   the first record, the record count and the byte position of the first
//!   record. Only the currently open group is tracked while scanning, so the
//!   auxiliary memory is constant regardless of the source size.
//!
//! - **Range read** ([`reader`]): extracts the records within an ordinal
//!   window. The scan starts from a byte checkpoint captured at build time (or
//!   from the start of the source) and stops as soon as the window is filled.
//!
//! - **Directory service** ([`service`]): owns the source and the published
//!   immutable [`LetterIndex`]; validates page requests and answers
//!   introspection queries.
//!
//! Both passes share the same notion of a record ([`record::classify_line`]):
//! a line that is non-blank after trimming and whose first character is an
//! ASCII letter. Offsets computed by one pass are therefore meaningful to the
//! other.

pub mod bucket;
pub mod builder;
pub mod config;
pub mod index;
pub mod letter;
pub mod page;
pub mod reader;
pub mod record;
pub mod service;
pub mod source;

pub use bucket::{LetterBucket, LetterStat};
pub use builder::{IndexBuilder, build_index};
pub use config::IndexConfig;
pub use index::{BuildStats, LetterIndex};
pub use letter::Letter;
pub use page::{PageRequest, PageResult};
pub use reader::{RangeReader, RangeScan, SeekHint};
pub use service::NameDirectory;
pub use source::{FileSource, RecordSource, SharedSource};
