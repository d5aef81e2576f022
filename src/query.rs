//! Generic server-side table query engine.
//!
//! A query run is a pure function of the cached table and the request: no
//! state survives between calls. Both datasets are served through the same
//! search/sort/paginate pipeline; only the schema differs.

use std::cmp::Ordering;

use crate::config::{ColumnKind, TableSchema};
use crate::grouping::GroupedRecord;
use crate::ratio::SellerRatio;
use crate::record::FieldValue;
use crate::types::ColumnName;

/// Row access used by the engine; implemented by both dataset row types.
pub trait TableRow {
    /// Field view for `column`; unknown columns are `FieldValue::Missing`.
    fn field(&self, column: &str) -> FieldValue;
}

impl TableRow for GroupedRecord {
    fn field(&self, column: &str) -> FieldValue {
        self.record.field(column)
    }
}

impl TableRow for SellerRatio {
    fn field(&self, column: &str) -> FieldValue {
        SellerRatio::field(self, column)
    }
}

/// Requested sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Parse the DataTables `order[0][dir]` value; anything but `desc`
    /// sorts ascending.
    pub fn from_request(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Requested sort column and direction.
#[derive(Clone, Debug)]
pub struct SortSpec {
    /// Schema column to order by.
    pub column: ColumnName,
    /// Requested direction.
    pub direction: SortDirection,
}

/// One table request: search text, window, and optional sort.
#[derive(Clone, Debug)]
pub struct TableQuery {
    /// Free-text filter; empty or whitespace-only means no filtering.
    pub search: String,
    /// Zero-based offset into the filtered (and sorted) sequence.
    pub start: usize,
    /// Maximum page size.
    pub length: usize,
    /// Optional sort; absent preserves the table's pre-established order.
    pub sort: Option<SortSpec>,
}

impl TableQuery {
    /// Query returning the first `length` rows in table order.
    pub fn first_page(length: usize) -> Self {
        Self {
            search: String::new(),
            start: 0,
            length,
            sort: None,
        }
    }
}

/// A page row carrying its 1-based rank within the filtered+sorted sequence.
#[derive(Clone, Debug)]
pub struct NumberedRow<R> {
    /// `start + position_in_page + 1`, recomputed per request.
    pub row_num: usize,
    /// The underlying row.
    pub row: R,
}

/// Result of one query run.
#[derive(Clone, Debug)]
pub struct QueryResult<R> {
    /// Size of the full table before filtering.
    pub records_total: usize,
    /// Size after search, before pagination.
    pub records_filtered: usize,
    /// The requested window, clipped to the filtered size.
    pub page: Vec<NumberedRow<R>>,
}

/// Run `query` against `rows` under `schema`.
pub fn run_query<R>(rows: &[R], schema: &TableSchema, query: &TableQuery) -> QueryResult<R>
where
    R: TableRow + Clone,
{
    let needle = query.search.trim().to_lowercase();
    let mut filtered: Vec<&R> = if needle.is_empty() {
        rows.iter().collect()
    } else {
        rows.iter()
            .filter(|row| matches_search(*row, schema, &needle))
            .collect()
    };

    if let Some(sort) = &query.sort {
        let kind = schema.kind_of(&sort.column);
        // Vec::sort_by is stable, so equal keys keep their pre-sort order
        // and repeated identical requests page identically.
        filtered.sort_by(|a, b| {
            let ordering = compare_field(a.field(&sort.column), b.field(&sort.column), kind);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    let records_filtered = filtered.len();
    let start = query.start.min(records_filtered);
    let end = start.saturating_add(query.length).min(records_filtered);
    let page = filtered[start..end]
        .iter()
        .enumerate()
        .map(|(offset, row)| NumberedRow {
            row_num: start + offset + 1,
            row: (*row).clone(),
        })
        .collect();

    QueryResult {
        records_total: rows.len(),
        records_filtered,
        page,
    }
}

fn matches_search<R: TableRow>(row: &R, schema: &TableSchema, needle: &str) -> bool {
    schema.searchable_columns().any(|spec| {
        let value = row.field(&spec.name);
        !value.is_empty() && value.as_display().to_lowercase().contains(needle)
    })
}

fn compare_field(a: FieldValue, b: FieldValue, kind: ColumnKind) -> Ordering {
    match kind {
        ColumnKind::Numeric => a.as_number().total_cmp(&b.as_number()),
        ColumnKind::Text => a.as_display().cmp(&b.as_display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSpec;
    use crate::record::Record;

    #[derive(Clone, Debug)]
    struct StubRow {
        name: String,
        amount: f64,
    }

    impl TableRow for StubRow {
        fn field(&self, column: &str) -> FieldValue {
            match column {
                "name" => FieldValue::Text(self.name.clone()),
                "amount" => FieldValue::Number(self.amount),
                _ => FieldValue::Missing,
            }
        }
    }

    fn stub_schema() -> TableSchema {
        TableSchema::new(vec![
            ColumnSpec::text("name"),
            ColumnSpec::numeric("amount").not_searchable(),
        ])
    }

    fn stub_rows() -> Vec<StubRow> {
        ["alpha", "beta", "xyzABCzyx", "gamma", "delta"]
            .iter()
            .enumerate()
            .map(|(index, name)| StubRow {
                name: name.to_string(),
                amount: index as f64,
            })
            .collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let rows = stub_rows();
        let query = TableQuery {
            search: "abc".into(),
            ..TableQuery::first_page(10)
        };
        let result = run_query(&rows, &stub_schema(), &query);
        assert_eq!(result.records_total, 5);
        assert_eq!(result.records_filtered, 1);
        assert_eq!(result.page[0].row.name, "xyzABCzyx");
    }

    #[test]
    fn search_skips_unsearchable_columns() {
        let rows = stub_rows();
        let query = TableQuery {
            search: "3".into(),
            ..TableQuery::first_page(10)
        };
        // amount holds "3" but is not searchable; no name contains it.
        let result = run_query(&rows, &stub_schema(), &query);
        assert_eq!(result.records_filtered, 0);
        assert!(result.page.is_empty());
    }

    #[test]
    fn pagination_clips_and_numbers_rows() {
        let rows = stub_rows();
        let query = TableQuery {
            start: 0,
            length: 2,
            ..TableQuery::first_page(0)
        };
        let result = run_query(&rows, &stub_schema(), &query);
        assert_eq!(result.records_filtered, 5);
        assert_eq!(result.page.len(), 2);
        assert_eq!(result.page[0].row_num, 1);
        assert_eq!(result.page[1].row_num, 2);

        let tail = TableQuery {
            start: 4,
            length: 10,
            ..TableQuery::first_page(0)
        };
        let result = run_query(&rows, &stub_schema(), &tail);
        assert_eq!(result.page.len(), 1);
        assert_eq!(result.page[0].row_num, 5);
    }

    #[test]
    fn offset_past_end_yields_empty_page() {
        let rows = stub_rows();
        let query = TableQuery {
            start: 99,
            length: 10,
            ..TableQuery::first_page(0)
        };
        let result = run_query(&rows, &stub_schema(), &query);
        assert!(result.page.is_empty());
        assert_eq!(result.records_filtered, 5);
    }

    #[test]
    fn numeric_sort_descends_and_text_sort_is_lexicographic() {
        let rows = vec![
            StubRow { name: "b".into(), amount: 2.0 },
            StubRow { name: "a".into(), amount: 10.0 },
            StubRow { name: "c".into(), amount: 1.0 },
        ];
        let schema = stub_schema();

        let by_amount = TableQuery {
            sort: Some(SortSpec {
                column: "amount".into(),
                direction: SortDirection::Descending,
            }),
            ..TableQuery::first_page(10)
        };
        let result = run_query(&rows, &schema, &by_amount);
        let amounts: Vec<f64> = result.page.iter().map(|n| n.row.amount).collect();
        assert_eq!(amounts, vec![10.0, 2.0, 1.0]);

        let by_name = TableQuery {
            sort: Some(SortSpec {
                column: "name".into(),
                direction: SortDirection::Ascending,
            }),
            ..TableQuery::first_page(10)
        };
        let result = run_query(&rows, &schema, &by_name);
        let names: Vec<&str> = result.page.iter().map(|n| n.row.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn sort_ties_preserve_pre_sort_order() {
        let rows = vec![
            StubRow { name: "first".into(), amount: 1.0 },
            StubRow { name: "second".into(), amount: 1.0 },
            StubRow { name: "third".into(), amount: 1.0 },
        ];
        let query = TableQuery {
            sort: Some(SortSpec {
                column: "amount".into(),
                direction: SortDirection::Descending,
            }),
            ..TableQuery::first_page(10)
        };
        let result = run_query(&rows, &stub_schema(), &query);
        let names: Vec<&str> = result.page.iter().map(|n| n.row.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);

        // Identical request, identical sequence.
        let again = run_query(&rows, &stub_schema(), &query);
        let names_again: Vec<&str> = again.page.iter().map(|n| n.row.name.as_str()).collect();
        assert_eq!(names, names_again);
    }

    #[test]
    fn absent_sort_preserves_table_order() {
        let rows = stub_rows();
        let result = run_query(&rows, &stub_schema(), &TableQuery::first_page(10));
        let names: Vec<&str> = result.page.iter().map(|n| n.row.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "xyzABCzyx", "gamma", "delta"]);
    }

    #[test]
    fn grouped_record_rows_are_queryable() {
        let rows = vec![GroupedRecord {
            record: Record::from_pairs([("DocDtls_No", "INV-9")]),
            group_id: 0,
            group_size: 2,
        }];
        let schema = TableSchema::new(vec![ColumnSpec::text("DocDtls_No")]);
        let query = TableQuery {
            search: "inv-9".into(),
            ..TableQuery::first_page(10)
        };
        let result = run_query(&rows, &schema, &query);
        assert_eq!(result.records_filtered, 1);
    }
}
