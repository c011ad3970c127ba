use std::ops::Range;

use namedex_common::{Result, verify_arg};
use serde::Serialize;

use crate::{bucket::LetterBucket, letter::Letter};

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub letter: Letter,
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Validates raw request parameters: `letter` must be one character in
    /// `A`..=`Z`, `offset` non-negative and `limit` within `1..=max_limit`.
    pub fn validate(letter: &str, offset: i64, limit: i64, max_limit: u64) -> Result<PageRequest> {
        let letter = Letter::parse(letter)?;
        verify_arg!(offset, offset >= 0, "must be non-negative");
        verify_arg!(
            limit,
            limit >= 1 && (limit as u64) <= max_limit,
            "must be between 1 and {max_limit}"
        );
        Ok(PageRequest {
            letter,
            offset: offset as u64,
            limit: limit as u64,
        })
    }

    /// Absolute ordinal window of this page within `bucket`, or `None` when
    /// the offset is past the end of the bucket.
    pub fn window(&self, bucket: &LetterBucket) -> Option<Range<u64>> {
        if self.offset >= bucket.count {
            return None;
        }
        let start = bucket.start_offset + self.offset;
        let end = std::cmp::min(start.saturating_add(self.limit), bucket.end_offset());
        Some(start..end)
    }

    /// Whether records remain in a bucket of `total` records after this page.
    pub fn has_more(&self, total: u64) -> bool {
        self.offset.saturating_add(self.limit) < total
    }
}

/// One page of a letter bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub records: Vec<String>,
    /// Size of the whole bucket, not of this page.
    pub total: u64,
    pub has_more: bool,
}

impl PageResult {
    pub fn empty(total: u64) -> PageResult {
        PageResult {
            records: Vec::new(),
            total,
            has_more: false,
        }
    }
}
