use serde::{Deserialize, Serialize};

/// Tuning parameters of the index build and the range reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexConfig {
    /// Largest page size accepted by [`NameDirectory::get_page`](crate::NameDirectory::get_page).
    pub max_page_limit: u64,

    /// Number of scanned lines between two progress log events during the
    /// build. Zero disables progress logging.
    pub progress_interval: u64,

    /// Requested size of the buffer used by each scan. It is clamped to the
    /// storage profile of the source.
    pub read_buffer_size: usize,

    /// When set, range reads start at the byte checkpoint of the bucket
    /// captured during the build instead of the start of the source.
    pub use_seek_checkpoints: bool,
}

impl IndexConfig {
    pub const DEFAULT_MAX_PAGE_LIMIT: u64 = 1000;
    pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;
    pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;
}

impl Default for IndexConfig {
    fn default() -> IndexConfig {
        IndexConfig {
            max_page_limit: Self::DEFAULT_MAX_PAGE_LIMIT,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
            read_buffer_size: Self::DEFAULT_READ_BUFFER_SIZE,
            use_seek_checkpoints: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IndexConfig;

    #[test]
    fn test_partial_config() {
        let config: IndexConfig =
            serde_json::from_str(r#"{ "useSeekCheckpoints": false, "maxPageLimit": 10 }"#)
                .unwrap();
        assert!(!config.use_seek_checkpoints);
        assert_eq!(config.max_page_limit, 10);
        assert_eq!(config.progress_interval, IndexConfig::DEFAULT_PROGRESS_INTERVAL);
        assert_eq!(config.read_buffer_size, IndexConfig::DEFAULT_READ_BUFFER_SIZE);
    }
}
