//! Wire contract for the server-side table widget.
//!
//! Requests arrive as DataTables query parameters and responses go back as
//! `{draw, recordsTotal, recordsFiltered, data}` with the exact field names
//! the widget expects. Parameter parsing is tolerant: anything unparseable
//! falls back to its default rather than failing the request.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::constants::{ratios, EMPTY_DISPLAY_VALUE};
use crate::grouping::DuplicateDatasetStats;
use crate::query::{run_query, SortDirection, SortSpec, TableQuery};
use crate::ratio::RatioDatasetStats;
use crate::store::{DuplicateTable, RatioTable};
use crate::types::ColumnName;

/// One parsed table request.
///
/// The duplicate endpoint ignores `order_*` (its table is pre-ordered by
/// group); only the ratio endpoint maps an order-column index.
#[derive(Clone, Debug)]
pub struct PageRequest {
    /// Opaque widget sequence number, echoed back unchanged.
    pub draw: u64,
    /// Zero-based page offset.
    pub start: usize,
    /// Requested page size.
    pub length: usize,
    /// Trimmed free-text search value.
    pub search: String,
    /// DataTables column index to order by, when the widget sent one.
    pub order_column: Option<usize>,
    /// Requested order direction; descending when not supplied.
    pub order_direction: SortDirection,
}

impl PageRequest {
    /// Parse DataTables query parameters. `default_length` differs per
    /// dataset (100 for duplicates, 50 for ratios).
    pub fn from_params<'a, I>(params: I, default_length: usize) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self {
            draw: 1,
            start: 0,
            length: default_length,
            search: String::new(),
            order_column: None,
            order_direction: SortDirection::Descending,
        };
        for (key, value) in params {
            match key {
                "draw" => request.draw = value.parse().unwrap_or(1),
                "start" => request.start = value.parse().unwrap_or(0),
                "length" => request.length = value.parse().unwrap_or(default_length),
                "search[value]" => request.search = value.trim().to_string(),
                "order[0][column]" => request.order_column = value.parse().ok(),
                "order[0][dir]" => {
                    request.order_direction = SortDirection::from_request(value);
                }
                _ => {}
            }
        }
        request
    }
}

/// DataTables server-side response envelope.
#[derive(Clone, Debug, Serialize)]
pub struct TablePayload {
    /// Request sequence number, echoed unchanged.
    pub draw: u64,
    /// Table size before filtering.
    #[serde(rename = "recordsTotal")]
    pub records_total: usize,
    /// Size after search, before pagination.
    #[serde(rename = "recordsFiltered")]
    pub records_filtered: usize,
    /// The page rows, keyed by column name.
    pub data: Vec<Map<String, Value>>,
}

/// Serve one page of the duplicate table.
pub fn duplicates_page(table: &DuplicateTable, request: &PageRequest) -> TablePayload {
    let query = TableQuery {
        search: request.search.clone(),
        start: request.start,
        length: request.length,
        sort: None,
    };
    let result = run_query(&table.rows, &table.schema, &query);
    let data = result
        .page
        .into_iter()
        .map(|numbered| {
            let mut row = Map::new();
            for (column, value) in numbered.row.record.iter() {
                let rendered = if value.is_empty() {
                    EMPTY_DISPLAY_VALUE.to_string()
                } else {
                    value.clone()
                };
                row.insert(column.clone(), Value::String(rendered));
            }
            row.insert("_group_id".into(), json!(numbered.row.group_id));
            row.insert("_group_size".into(), json!(numbered.row.group_size));
            row.insert("_row_num".into(), json!(numbered.row_num));
            row
        })
        .collect();
    TablePayload {
        draw: request.draw,
        records_total: result.records_total,
        records_filtered: result.records_filtered,
        data,
    }
}

/// Serve one page of the seller-ratio table. Defaults to ordering by the
/// ratio column, descending.
pub fn ratio_page(table: &RatioTable, request: &PageRequest) -> TablePayload {
    let order_column = request.order_column.unwrap_or(ratios::DEFAULT_ORDER_COLUMN);
    let sort_field = ratios::ORDER_COLUMNS
        .iter()
        .find(|(index, _)| *index == order_column)
        .map(|(_, field)| *field)
        .unwrap_or(ratios::DEFAULT_SORT_FIELD);
    // Ordering by the row number means keeping the table as loaded.
    let sort = (sort_field != "_row_num").then(|| SortSpec {
        column: sort_field.to_string(),
        direction: request.order_direction,
    });

    let query = TableQuery {
        search: request.search.clone(),
        start: request.start,
        length: request.length,
        sort,
    };
    let result = run_query(&table.records, &table.schema, &query);
    let data = result
        .page
        .into_iter()
        .map(|numbered| {
            let mut row = match serde_json::to_value(&numbered.row) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            };
            row.insert("risk".into(), json!(numbered.row.risk().label()));
            row.insert("_row_num".into(), json!(numbered.row_num));
            row
        })
        .collect();
    TablePayload {
        draw: request.draw,
        records_total: result.records_total,
        records_filtered: result.records_filtered,
        data,
    }
}

/// Everything the dashboard index view needs in one pass.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardSummary {
    /// Whether the duplicate table produced any qualifying rows.
    pub has_duplicate_data: bool,
    /// Present only when the duplicate table has rows.
    pub duplicate_stats: Option<DuplicateDatasetStats>,
    /// Resolved duplicate display columns, in render order.
    pub display_columns: Vec<ColumnName>,
    /// Whether any seller-ratio records loaded.
    pub has_ratio_data: bool,
    /// Present only when ratio records loaded.
    pub ratio_stats: Option<RatioDatasetStats>,
}

/// Summarize both cached tables for the index view.
pub fn dashboard_summary(duplicates: &DuplicateTable, ratios: &RatioTable) -> DashboardSummary {
    DashboardSummary {
        has_duplicate_data: duplicates.has_data(),
        duplicate_stats: duplicates.has_data().then(|| duplicates.stats.clone()),
        display_columns: duplicates.display_columns(),
        has_ratio_data: ratios.has_data(),
        ratio_stats: ratios.has_data().then(|| ratios.stats.clone()),
    }
}
