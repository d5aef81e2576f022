//! Load-once dataset stores.
//!
//! Ownership model:
//! - each store exclusively owns its loaded table and never mutates it after
//!   the first successful load;
//! - the first `load` populates a `OnceLock`, so concurrent first readers
//!   run a single initializer and every later reader is lock-free;
//! - a missing or structurally unreadable source degrades to an empty table
//!   rather than an error, and a restart is the only invalidation.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::config::{DatasetPaths, TableSchema};
use crate::grouping::{group_duplicates, DuplicateDatasetStats, GroupedRecord};
use crate::ratio::{ratio_stats, RatioDatasetStats, SellerRatio};
use crate::record::Record;
use crate::types::ColumnName;

/// Cached duplicate dataset: grouped rows, display schema, and statistics.
#[derive(Debug, Default)]
pub struct DuplicateTable {
    /// Qualifying duplicate rows in ascending group order.
    pub rows: Vec<GroupedRecord>,
    /// Display column metadata resolved against the source header.
    pub schema: TableSchema,
    /// Dataset statistics computed while grouping.
    pub stats: DuplicateDatasetStats,
}

impl DuplicateTable {
    /// True when the source produced at least one qualifying row.
    pub fn has_data(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Resolved display column names, in render order.
    pub fn display_columns(&self) -> Vec<ColumnName> {
        self.schema.column_names()
    }
}

/// Store for the flagged-duplicate CSV.
#[derive(Debug)]
pub struct DuplicateStore {
    path: PathBuf,
    cache: OnceLock<DuplicateTable>,
}

impl DuplicateStore {
    /// Create a store over `path`; nothing is read until the first `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceLock::new(),
        }
    }

    /// Store over the configured duplicates path.
    pub fn from_config(paths: &DatasetPaths) -> Self {
        Self::new(&paths.duplicates_csv)
    }

    /// Backing file location, for the raw-export collaborator.
    pub fn source_path(&self) -> &Path {
        &self.path
    }

    /// Load on first call, then return the cached table verbatim.
    pub fn load(&self) -> &DuplicateTable {
        self.cache.get_or_init(|| self.read())
    }

    fn read(&self) -> DuplicateTable {
        let (headers, rows) = match read_csv_rows(&self.path) {
            Some(loaded) => loaded,
            None => return DuplicateTable::default(),
        };
        let schema = TableSchema::for_duplicates(&headers);
        let (grouped, stats) = group_duplicates(&rows);
        debug!(
            path = %self.path.display(),
            rows = rows.len(),
            groups = stats.num_groups,
            "loaded duplicate dataset"
        );
        DuplicateTable {
            rows: grouped,
            schema,
            stats,
        }
    }
}

/// Cached seller-ratio dataset.
#[derive(Debug, Default)]
pub struct RatioTable {
    /// Seller records in source order.
    pub records: Vec<SellerRatio>,
    /// Ratio column metadata.
    pub schema: TableSchema,
    /// Dataset statistics computed at load.
    pub stats: RatioDatasetStats,
}

impl RatioTable {
    /// True when at least one seller record loaded.
    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Store for the precomputed seller-ratio JSON.
#[derive(Debug)]
pub struct RatioStore {
    path: PathBuf,
    cache: OnceLock<RatioTable>,
}

impl RatioStore {
    /// Create a store over `path`; nothing is read until the first `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceLock::new(),
        }
    }

    /// Store over the configured ratio path.
    pub fn from_config(paths: &DatasetPaths) -> Self {
        Self::new(&paths.ratios_json)
    }

    /// Load on first call, then return the cached table verbatim.
    pub fn load(&self) -> &RatioTable {
        self.cache.get_or_init(|| self.read())
    }

    fn read(&self) -> RatioTable {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "ratio source absent, serving empty table");
            return RatioTable::default();
        }
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ratio source unreadable");
                return RatioTable::default();
            }
        };
        let records: Vec<SellerRatio> = match serde_json::from_reader(BufReader::new(file)) {
            Ok(records) => records,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ratio source malformed");
                return RatioTable::default();
            }
        };
        let stats = ratio_stats(&records);
        debug!(
            path = %self.path.display(),
            sellers = stats.total_sellers,
            "loaded ratio dataset"
        );
        RatioTable {
            records,
            schema: TableSchema::for_ratios(),
            stats,
        }
    }
}

/// Read the header and all rows from a CSV source. `None` means the source
/// is missing or structurally unreadable; individually damaged rows are
/// skipped, not fatal.
fn read_csv_rows(path: &Path) -> Option<(Vec<ColumnName>, Vec<Record>)> {
    if !path.exists() {
        debug!(path = %path.display(), "duplicate source absent, serving empty table");
        return None;
    }
    let mut reader = match csv::ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(reader) => reader,
        Err(error) => {
            warn!(path = %path.display(), %error, "duplicate source unreadable");
            return None;
        }
    };
    let headers: Vec<ColumnName> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(error) => {
            warn!(path = %path.display(), %error, "duplicate source header malformed");
            return None;
        }
    };
    let mut rows = Vec::new();
    for entry in reader.records() {
        match entry {
            Ok(record) => {
                rows.push(Record::from_pairs(
                    headers
                        .iter()
                        .zip(record.iter())
                        .map(|(column, value)| (column.clone(), value.to_string())),
                ));
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable csv row");
            }
        }
    }
    Some((headers, rows))
}
