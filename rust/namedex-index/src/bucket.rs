use serde::Serialize;

use crate::letter::Letter;

/// Position and size of one letter group within the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterBucket {
    pub letter: Letter,
    /// Ordinal of the first record of the group, counted over accepted records.
    pub start_offset: u64,
    /// Number of records in the group.
    pub count: u64,
    /// Byte position of the line holding the first record of the group.
    pub byte_offset: u64,
}

impl LetterBucket {
    /// Ordinal one past the last record of the group.
    #[inline]
    pub fn end_offset(&self) -> u64 {
        self.start_offset + self.count
    }

    pub fn stat(&self) -> LetterStat {
        LetterStat {
            letter: self.letter,
            count: self.count,
        }
    }
}

/// Per-letter record count, as presented to navigators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterStat {
    pub letter: Letter,
    pub count: u64,
}
