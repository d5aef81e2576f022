use indexmap::IndexMap;

use crate::types::ColumnName;

/// A single field value as seen by the query engine.
///
/// Sources store text; numeric interpretation happens on demand through the
/// column schema so parsing rules stay in one place.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Column absent for this row.
    Missing,
    /// Verbatim text from the source.
    Text(String),
    /// Pre-typed numeric value (ratio records).
    Number(f64),
}

impl FieldValue {
    /// Text form used for substring search and display.
    pub fn as_display(&self) -> String {
        match self {
            FieldValue::Missing => String::new(),
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(value) => format_number(*value),
        }
    }

    /// Numeric form used for numeric sorting; unparseable or missing is 0.
    pub fn as_number(&self) -> f64 {
        match self {
            FieldValue::Missing => 0.0,
            FieldValue::Text(text) => parse_number(text),
            FieldValue::Number(value) => *value,
        }
    }

    /// True when there is no renderable content.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Number(_) => false,
        }
    }
}

/// Tolerant numeric parse: trims, accepts empty as 0, never fails.
///
/// Every numeric interpretation in the crate funnels through here so a
/// malformed monetary field degrades to zero instead of aborting a load
/// or a sort.
pub fn parse_number(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One row of a tabular source: column-ordered, immutable once loaded.
#[derive(Clone, Debug, Default)]
pub struct Record {
    fields: IndexMap<ColumnName, String>,
}

impl Record {
    /// Build a record from column/value pairs, preserving column order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ColumnName>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }

    /// Raw text for `column`, or `None` when the column is absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Field view used by the query engine.
    pub fn field(&self, column: &str) -> FieldValue {
        match self.fields.get(column) {
            Some(value) => FieldValue::Text(value.clone()),
            None => FieldValue::Missing,
        }
    }

    /// Trimmed text for `column`; absent columns yield the empty string.
    pub fn trimmed(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("").trim()
    }

    /// Iterate columns and values in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnName, &String)> + '_ {
        self.fields.iter()
    }

    /// Number of columns present on this row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the row carries no columns at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
