use std::path::PathBuf;

use crate::constants::duplicates;
use crate::types::{ColumnLabel, ColumnName};

/// Declared value type of a column, consumed by the query engine when
/// choosing a comparator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Compared lexicographically.
    Text,
    /// Parsed (failure-tolerant) and compared numerically.
    Numeric,
}

/// Per-column metadata supplied at configuration time.
///
/// The engine never inspects column names to make rendering or sorting
/// decisions; everything it needs is declared here.
#[derive(Clone, Debug)]
pub struct ColumnSpec {
    /// Source column name.
    pub name: ColumnName,
    /// Header label shown by the table widget.
    pub label: ColumnLabel,
    /// Value type used to pick the sort comparator.
    pub kind: ColumnKind,
    /// Whether free-text search scans this column.
    pub searchable: bool,
}

impl ColumnSpec {
    /// Searchable text column labelled with its own name.
    pub fn text(name: impl Into<ColumnName>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind: ColumnKind::Text,
            searchable: true,
        }
    }

    /// Searchable numeric column labelled with its own name.
    pub fn numeric(name: impl Into<ColumnName>) -> Self {
        Self {
            kind: ColumnKind::Numeric,
            ..Self::text(name)
        }
    }

    /// Exclude this column from free-text search.
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }
}

/// Ordered column metadata for one dataset.
#[derive(Clone, Debug, Default)]
pub struct TableSchema {
    columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// Build a schema from ordered column specs.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    /// Schema for the duplicate table given the columns actually present in
    /// the source: the preferred display list intersected with `present`,
    /// in preferred order, typed via the configured numeric-column list.
    pub fn for_duplicates(present: &[ColumnName]) -> Self {
        let columns = duplicates::DISPLAY_COLUMNS_PREFERRED
            .iter()
            .filter(|name| present.iter().any(|column| column == *name))
            .map(|name| {
                if duplicates::NUMERIC_COLUMNS.contains(name) {
                    ColumnSpec::numeric(*name)
                } else {
                    ColumnSpec::text(*name)
                }
            })
            .collect();
        Self { columns }
    }

    /// Schema for the seller-ratio table. Search scope is the seller
    /// identifier and name only.
    pub fn for_ratios() -> Self {
        Self {
            columns: vec![
                ColumnSpec::text("gstin"),
                ColumnSpec::text("name"),
                ColumnSpec::numeric("crn_inv_ratio").not_searchable(),
                ColumnSpec::numeric("inv_count").not_searchable(),
                ColumnSpec::numeric("crn_count").not_searchable(),
                ColumnSpec::numeric("dbn_count").not_searchable(),
                ColumnSpec::numeric("total_inv_val").not_searchable(),
                ColumnSpec::numeric("total_crn_val").not_searchable(),
            ],
        }
    }

    /// Ordered specs.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<ColumnName> {
        self.columns.iter().map(|spec| spec.name.clone()).collect()
    }

    /// Spec for `name`, if declared.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|spec| spec.name == name)
    }

    /// Columns participating in free-text search.
    pub fn searchable_columns(&self) -> impl Iterator<Item = &ColumnSpec> + '_ {
        self.columns.iter().filter(|spec| spec.searchable)
    }

    /// Comparator kind for `name`; undeclared columns compare as text.
    pub fn kind_of(&self, name: &str) -> ColumnKind {
        self.column(name).map(|spec| spec.kind).unwrap_or(ColumnKind::Text)
    }
}

/// Filesystem locations of the two backing datasets.
#[derive(Clone, Debug)]
pub struct DatasetPaths {
    /// Flagged-duplicate CSV exported by the upstream audit query.
    pub duplicates_csv: PathBuf,
    /// Precomputed per-seller credit-note ratio JSON.
    pub ratios_json: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            duplicates_csv: PathBuf::from("data/duplicates.csv"),
            ratios_json: PathBuf::from("data/crn_ratio.json"),
        }
    }
}
