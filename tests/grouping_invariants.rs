use std::io::Write;

use tempfile::NamedTempFile;

use auditview::{CompositeKey, DuplicateStore, Record};

const HEADER: &str = "BuyerDtls_Gstin,SellerDtls_Gstin,DocDtls_Dt,DocDtls_No,ValDtls_TotInvVal,ItemList_PrdDesc";

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp csv");
    writeln!(file, "{HEADER}").expect("header");
    for line in lines {
        writeln!(file, "{line}").expect("row");
    }
    file
}

#[test]
fn qualifying_groups_share_keys_and_have_two_plus_members() {
    let file = write_csv(&[
        "A,B,2024-01-01,INV-1,100,Widgets",
        "A,B,2024-01-01,INV-1,100,Widgets",
        "A,B,2024-01-02,INV-2,50,Gadgets",
        "C,D,2024-02-02,INV-7,10,Bolts",
        "C,D,2024-02-02,INV-7,10,Bolts",
        "C,D,2024-02-02,INV-7,10,Bolts",
    ]);
    let store = DuplicateStore::new(file.path());
    let table = store.load();

    assert_eq!(table.stats.num_groups, 2);
    assert_eq!(table.stats.total_rows, 5);
    for row in &table.rows {
        assert!(row.group_size >= 2);
    }
    // Every member of a group carries the identical trimmed composite key.
    for id in 0..table.stats.num_groups {
        let keys: Vec<CompositeKey> = table
            .rows
            .iter()
            .filter(|row| row.group_id == id)
            .map(|row| CompositeKey::from_record(&row.record).expect("grouped row has full key"))
            .collect();
        assert!(!keys.is_empty());
        assert!(keys.windows(2).all(|pair| pair[0] == pair[1]));
    }
    // Single-occurrence INV-2 is excluded entirely.
    assert!(
        table
            .rows
            .iter()
            .all(|row| row.record.get("DocDtls_No") != Some("INV-2"))
    );
}

#[test]
fn rows_with_empty_key_components_never_appear() {
    let file = write_csv(&[
        ",B,2024-01-01,INV-1,100,Widgets",
        ",B,2024-01-01,INV-1,100,Widgets",
        "A,B,,INV-1,100,Widgets",
        "A,B,,INV-1,100,Widgets",
    ]);
    let store = DuplicateStore::new(file.path());
    let table = store.load();
    assert!(table.rows.is_empty());
    assert!(!table.has_data());
}

#[test]
fn group_ids_are_dense_and_reproducible_across_reloads() {
    let rows = [
        "Z9,S1,2024-03-01,N-5,10,x",
        "A1,S1,2024-03-01,N-5,10,x",
        "Z9,S1,2024-03-01,N-5,10,x",
        "M5,S2,2024-03-02,N-6,10,x",
        "A1,S1,2024-03-01,N-5,10,x",
        "M5,S2,2024-03-02,N-6,10,x",
    ];
    let first_file = write_csv(&rows);
    let first = DuplicateStore::new(first_file.path());
    let first_table = first.load();

    // Dense zero-based ids in ascending composite-key order.
    let buyers: Vec<(&str, usize)> = first_table
        .rows
        .iter()
        .map(|row| (row.record.get("BuyerDtls_Gstin").unwrap(), row.group_id))
        .collect();
    assert_eq!(
        buyers,
        vec![("A1", 0), ("A1", 0), ("M5", 1), ("M5", 1), ("Z9", 2), ("Z9", 2)]
    );

    // Loading identical input through a fresh store assigns identical ids.
    let second_file = write_csv(&rows);
    let second = DuplicateStore::new(second_file.path());
    let second_table = second.load();
    let reload_ids: Vec<usize> = second_table.rows.iter().map(|row| row.group_id).collect();
    let first_ids: Vec<usize> = first_table.rows.iter().map(|row| row.group_id).collect();
    assert_eq!(first_ids, reload_ids);
}

#[test]
fn stats_tolerate_malformed_monetary_fields() {
    let file = write_csv(&[
        "A,B,2024-01-01,INV-1,not-a-number,Widgets",
        "A,B,2024-01-01,INV-1,250.5,Widgets",
    ]);
    let store = DuplicateStore::new(file.path());
    let table = store.load();
    assert_eq!(table.stats.total_rows, 2);
    assert_eq!(table.stats.total_value, 250.5);
    assert_eq!(table.stats.unique_sellers, 1);
}

#[test]
fn display_columns_resolve_against_source_header() {
    let file = write_csv(&["A,B,2024-01-01,INV-1,1,x", "A,B,2024-01-01,INV-1,1,x"]);
    let store = DuplicateStore::new(file.path());
    let columns = store.load().display_columns();
    // Preferred order, limited to columns the source actually has.
    assert_eq!(
        columns,
        vec![
            "DocDtls_No",
            "DocDtls_Dt",
            "SellerDtls_Gstin",
            "BuyerDtls_Gstin",
            "ValDtls_TotInvVal",
            "ItemList_PrdDesc",
        ]
    );
}

#[test]
fn composite_key_rejects_any_empty_component() {
    let record = Record::from_pairs([
        ("BuyerDtls_Gstin", "A"),
        ("SellerDtls_Gstin", "B"),
        ("DocDtls_Dt", "  "),
        ("DocDtls_No", "INV-1"),
    ]);
    assert!(CompositeKey::from_record(&record).is_none());
}
