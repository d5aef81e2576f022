use std::io;

use thiserror::Error;

/// Error type for export and serialization failures.
///
/// Dataset loading never surfaces errors: a missing or structurally
/// malformed source degrades to an empty table, and row-level damage is
/// tolerated in place. Only operations with a caller-visible product
/// (exports, payload serialization) can fail.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Export requested while the backing dataset is empty.
    #[error("no data loaded for '{0}'")]
    NoData(&'static str),
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
