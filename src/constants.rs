/// Constants describing the duplicate-invoice source table.
pub mod duplicates {
    /// Columns forming the duplicate composite key, in comparison order.
    pub const KEY_COLUMNS: [&str; 4] = [
        "BuyerDtls_Gstin",
        "SellerDtls_Gstin",
        "DocDtls_Dt",
        "DocDtls_No",
    ];

    /// Monetary column summed into the dataset statistics.
    pub const TOTAL_VALUE_COLUMN: &str = "ValDtls_TotInvVal";

    /// Seller identifier column counted into the unique-sellers statistic.
    pub const SELLER_COLUMN: &str = "SellerDtls_Gstin";

    /// Preferred display columns, in render order. The resolved display set
    /// is the intersection of this list with the columns actually present.
    pub const DISPLAY_COLUMNS_PREFERRED: [&str; 19] = [
        "DocDtls_No",
        "DocDtls_Dt",
        "DocDtls_Typ",
        "SellerDtls_Gstin",
        "SellerDtls_LglNm",
        "BuyerDtls_Gstin",
        "BuyerDtls_LglNm",
        "TranDtls_SupTyp",
        "ValDtls_TotInvVal",
        "ValDtls_AssVal",
        "ValDtls_CgstVal",
        "ValDtls_SgstVal",
        "ValDtls_IgstVal",
        "ItemList_HsnCd",
        "ItemList_PrdDesc",
        "ItemList_Qty",
        "ItemList_UnitPrice",
        "ItemList_TotItemVal",
        "CustomFields_ErpSource",
    ];

    /// Columns holding numeric values (right-aligned, numeric sort).
    pub const NUMERIC_COLUMNS: [&str; 8] = [
        "ValDtls_TotInvVal",
        "ValDtls_AssVal",
        "ValDtls_CgstVal",
        "ValDtls_SgstVal",
        "ValDtls_IgstVal",
        "ItemList_Qty",
        "ItemList_UnitPrice",
        "ItemList_TotItemVal",
    ];

    /// Default page length for the duplicates endpoint.
    pub const DEFAULT_PAGE_LENGTH: usize = 100;
}

/// Constants describing the seller-ratio table.
pub mod ratios {
    /// Default page length for the ratio endpoint.
    pub const DEFAULT_PAGE_LENGTH: usize = 50;

    /// Order-column index the ratio endpoint defaults to (the ratio column).
    pub const DEFAULT_ORDER_COLUMN: usize = 4;

    /// Mapping from DataTables column index to ratio field name. Index 0 is
    /// the recomputed row number (no reorder); index 1 (the risk badge) is
    /// not orderable and is absent here.
    pub const ORDER_COLUMNS: [(usize, &str); 9] = [
        (0, "_row_num"),
        (2, "gstin"),
        (3, "name"),
        (4, "crn_inv_ratio"),
        (5, "inv_count"),
        (6, "crn_count"),
        (7, "dbn_count"),
        (8, "total_inv_val"),
        (9, "total_crn_val"),
    ];

    /// Field sorted when the requested order-column index is unknown.
    pub const DEFAULT_SORT_FIELD: &str = "crn_inv_ratio";
}

/// Placeholder rendered for absent field values in wire payloads.
pub const EMPTY_DISPLAY_VALUE: &str = "-";
