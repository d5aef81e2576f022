#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Column metadata and dataset locations.
pub mod config;
/// Column names, page defaults, and other fixed dataset facts.
pub mod constants;
/// Export serialization for the ratio dataset.
pub mod export;
/// Duplicate composite keys, grouping, and dataset statistics.
pub mod grouping;
/// Wire request/response types for the table widget.
pub mod payload;
/// The generic server-side query engine.
pub mod query;
/// Seller ratio records, risk classification, and statistics.
pub mod ratio;
/// Tabular rows and tolerant field parsing.
pub mod record;
/// Load-once dataset stores.
pub mod store;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{ColumnKind, ColumnSpec, DatasetPaths, TableSchema};
pub use errors::AuditError;
pub use export::ratio_csv;
pub use grouping::{group_duplicates, CompositeKey, DuplicateDatasetStats, GroupedRecord};
pub use payload::{
    dashboard_summary, duplicates_page, ratio_page, DashboardSummary, PageRequest, TablePayload,
};
pub use query::{
    run_query, NumberedRow, QueryResult, SortDirection, SortSpec, TableQuery, TableRow,
};
pub use ratio::{ratio_stats, RatioDatasetStats, RiskLevel, SellerRatio};
pub use record::{parse_number, FieldValue, Record};
pub use store::{DuplicateStore, DuplicateTable, RatioStore, RatioTable};
pub use types::{ColumnLabel, ColumnName, DocDate, DocNumber, Gstin};
