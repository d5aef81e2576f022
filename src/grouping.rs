//! Duplicate grouping over the flagged-invoice table.
//!
//! Rows are partitioned by the 4-component composite key; only groups with
//! two or more members survive. Group ids are assigned by ascending key
//! order, so the output is reproducible regardless of input row order.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::constants::duplicates;
use crate::record::{parse_number, Record};
use crate::types::Gstin;

/// Composite duplicate-detection key. Components are stored trimmed and
/// compared lexicographically in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompositeKey {
    /// Buyer GSTIN.
    pub buyer_gstin: String,
    /// Seller GSTIN.
    pub seller_gstin: String,
    /// Document date, verbatim from the source.
    pub doc_date: String,
    /// Document number.
    pub doc_number: String,
}

impl CompositeKey {
    /// Build the trimmed key for a record, or `None` when any component is
    /// empty — such rows can never be part of a reported group.
    pub fn from_record(record: &Record) -> Option<Self> {
        let [buyer, seller, date, number] =
            duplicates::KEY_COLUMNS.map(|column| record.trimmed(column).to_string());
        if buyer.is_empty() || seller.is_empty() || date.is_empty() || number.is_empty() {
            return None;
        }
        Some(Self {
            buyer_gstin: buyer,
            seller_gstin: seller,
            doc_date: date,
            doc_number: number,
        })
    }
}

/// A source row annotated with its duplicate-group membership.
#[derive(Clone, Debug)]
pub struct GroupedRecord {
    /// The source row, columns passed through verbatim.
    pub record: Record,
    /// Dense zero-based rank of the group in ascending composite-key order.
    pub group_id: usize,
    /// Member count of the group this row belongs to.
    pub group_size: usize,
}

/// Dataset-level statistics accumulated while flattening groups.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DuplicateDatasetStats {
    /// Rows emitted across all qualifying groups.
    pub total_rows: usize,
    /// Number of qualifying groups.
    pub num_groups: usize,
    /// Sum of the monetary column over emitted rows; parse failures add 0.
    pub total_value: f64,
    /// Distinct non-empty seller GSTINs among emitted rows.
    pub unique_sellers: usize,
}

/// Partition `rows` into qualifying duplicate groups and flatten them in
/// ascending composite-key order, preserving intra-group encounter order.
pub fn group_duplicates(rows: &[Record]) -> (Vec<GroupedRecord>, DuplicateDatasetStats) {
    let mut groups: BTreeMap<CompositeKey, Vec<usize>> = BTreeMap::new();
    for (index, record) in rows.iter().enumerate() {
        if let Some(key) = CompositeKey::from_record(record) {
            groups.entry(key).or_default().push(index);
        }
    }

    let mut flattened = Vec::new();
    let mut stats = DuplicateDatasetStats::default();
    let mut sellers: HashSet<Gstin> = HashSet::new();
    let mut group_id = 0usize;

    for members in groups.values() {
        if members.len() < 2 {
            continue;
        }
        for &index in members {
            let record = &rows[index];
            if let Some(raw) = record.get(duplicates::TOTAL_VALUE_COLUMN) {
                stats.total_value += parse_number(raw);
            }
            let seller = record.trimmed(duplicates::SELLER_COLUMN);
            if !seller.is_empty() {
                sellers.insert(seller.to_string());
            }
            flattened.push(GroupedRecord {
                record: record.clone(),
                group_id,
                group_size: members.len(),
            });
        }
        group_id += 1;
    }

    stats.total_rows = flattened.len();
    stats.num_groups = group_id;
    stats.unique_sellers = sellers.len();
    debug!(
        rows = rows.len(),
        emitted = stats.total_rows,
        groups = stats.num_groups,
        "grouped duplicate rows"
    );
    (flattened, stats)
}
