//! Export of the seller-ratio dataset.
//!
//! The duplicate export is a raw passthrough of the backing CSV and lives
//! with the route layer (`DuplicateStore::source_path` is its hook); only
//! the ratio list needs serialization here.

use crate::errors::AuditError;
use crate::ratio::SellerRatio;

const RATIO_EXPORT_HEADER: [&str; 8] = [
    "gstin",
    "name",
    "crn_inv_ratio",
    "inv_count",
    "crn_count",
    "dbn_count",
    "total_inv_val",
    "total_crn_val",
];

/// Serialize the full, unfiltered seller-ratio list to CSV.
///
/// Exporting an empty dataset is the caller-visible "not found" condition.
pub fn ratio_csv(records: &[SellerRatio]) -> Result<String, AuditError> {
    if records.is_empty() {
        return Err(AuditError::NoData("crn_ratio"));
    }
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(RATIO_EXPORT_HEADER)?;
    for record in records {
        writer.write_record([
            record.gstin.as_str(),
            record.name.as_str(),
            &record.crn_inv_ratio.to_string(),
            &record.inv_count.to_string(),
            &record.crn_count.to_string(),
            &record.dbn_count.to_string(),
            &record.total_inv_val.to_string(),
            &record.total_crn_val.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| AuditError::Io(error.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_is_not_found() {
        assert!(matches!(ratio_csv(&[]), Err(AuditError::NoData(_))));
    }

    #[test]
    fn export_includes_header_and_every_record() {
        let records = vec![
            SellerRatio {
                gstin: "29A".into(),
                name: "Acme, Ltd".into(),
                crn_inv_ratio: 1.25,
                inv_count: 4,
                crn_count: 5,
                dbn_count: 0,
                total_inv_val: 1000.0,
                total_crn_val: 1250.0,
            },
            SellerRatio::default(),
        ];
        let csv = ratio_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("gstin,name,crn_inv_ratio"));
        // Embedded comma forces quoting.
        assert!(lines[1].contains("\"Acme, Ltd\""));
        assert!(lines[1].contains("1.25"));
    }
}
