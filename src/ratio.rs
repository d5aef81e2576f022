//! Seller credit-note ratio records and their derived statistics.
//!
//! The ratio itself is computed upstream and treated as an opaque number
//! here; this module only loads, classifies, and summarizes it.

use serde::{Deserialize, Serialize};

use crate::record::FieldValue;
use crate::types::Gstin;

/// Per-seller credit-note/invoice aggregate, as produced upstream.
///
/// All fields default when absent so a sparse record still loads; a missing
/// ratio thresholds as 0.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SellerRatio {
    /// Seller GSTIN.
    #[serde(default)]
    pub gstin: Gstin,
    /// Seller legal name.
    #[serde(default)]
    pub name: String,
    /// Upstream credit-note/invoice ratio, never recomputed here.
    #[serde(default)]
    pub crn_inv_ratio: f64,
    /// Invoice document count.
    #[serde(default)]
    pub inv_count: u64,
    /// Credit-note document count.
    #[serde(default)]
    pub crn_count: u64,
    /// Debit-note document count.
    #[serde(default)]
    pub dbn_count: u64,
    /// Total invoice value.
    #[serde(default)]
    pub total_inv_val: f64,
    /// Total credit-note value.
    #[serde(default)]
    pub total_crn_val: f64,
}

impl SellerRatio {
    /// Field view used by the query engine.
    pub fn field(&self, column: &str) -> FieldValue {
        match column {
            "gstin" => FieldValue::Text(self.gstin.clone()),
            "name" => FieldValue::Text(self.name.clone()),
            "crn_inv_ratio" => FieldValue::Number(self.crn_inv_ratio),
            "inv_count" => FieldValue::Number(self.inv_count as f64),
            "crn_count" => FieldValue::Number(self.crn_count as f64),
            "dbn_count" => FieldValue::Number(self.dbn_count as f64),
            "total_inv_val" => FieldValue::Number(self.total_inv_val),
            "total_crn_val" => FieldValue::Number(self.total_crn_val),
            _ => FieldValue::Missing,
        }
    }

    /// Risk classification of this seller's ratio.
    pub fn risk(&self) -> RiskLevel {
        RiskLevel::from_ratio(self.crn_inv_ratio)
    }
}

/// Risk band derived from the credit-note/invoice ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Ratio above 1.0: more credit-note value than invoiced.
    Extreme,
    /// Ratio above 0.5, up to 1.0.
    High,
    /// Ratio above 0.2, up to 0.5.
    Medium,
    /// Ratio at or below 0.2.
    Low,
}

impl RiskLevel {
    /// Classify a ratio. Boundaries are exclusive above: exactly 1.0 is
    /// High, exactly 0.5 is Medium, exactly 0.2 is Low.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 1.0 {
            RiskLevel::Extreme
        } else if ratio > 0.5 {
            RiskLevel::High
        } else if ratio > 0.2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Badge label rendered by the table widget.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Extreme => "EXTREME",
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }
}

/// Dataset-level statistics over the loaded ratio records.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RatioDatasetStats {
    /// Number of sellers in the loaded dataset.
    pub total_sellers: usize,
    /// Sellers with ratio strictly above 0.5.
    pub high_ratio: usize,
    /// Sellers with ratio strictly above 1.0.
    pub extreme_ratio: usize,
    /// Sum of total credit-note value across all sellers.
    pub total_crn_val: f64,
}

/// Reduce the loaded records into their summary statistics.
pub fn ratio_stats(records: &[SellerRatio]) -> RatioDatasetStats {
    let mut stats = RatioDatasetStats {
        total_sellers: records.len(),
        ..RatioDatasetStats::default()
    };
    for record in records {
        if record.crn_inv_ratio > 0.5 {
            stats.high_ratio += 1;
        }
        if record.crn_inv_ratio > 1.0 {
            stats.extreme_ratio += 1;
        }
        stats.total_crn_val += record.total_crn_val;
    }
    stats
}
