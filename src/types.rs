/// Column name in a tabular source or schema.
/// Examples: `DocDtls_No`, `ValDtls_TotInvVal`
pub type ColumnName = String;
/// GSTIN tax registration identifier of a buyer or seller.
/// Example: `29AABCU9603R1ZX`
pub type Gstin = String;
/// Document number as submitted to the e-invoice registry.
/// Example: `INV-2024-00381`
pub type DocNumber = String;
/// Document date string, passed through verbatim from the source.
/// Example: `2024-01-01`
pub type DocDate = String;
/// Display label for a rendered column header.
pub type ColumnLabel = String;
