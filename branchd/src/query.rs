//! Listing query builder
//!
//! Translates raw request parameters (page, limit, search, sort, order) into
//! the SQL fragments the store needs: a search filter, an order-by clause,
//! and offset/limit. Pure functions of their inputs, and lenient on bad
//! input: anything unparseable falls back to a default, never an error.

use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const DEFAULT_SORT_FIELD: &str = "branchName";
const DEFAULT_SORT_COLUMN: &str = "branch_name";

/// Wire sort-field name -> database column. Unknown names fall back to the
/// default field rather than erroring.
const SORTABLE_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("branchName", "branch_name"),
    ("branchCode", "branch_code"),
    ("address", "address"),
    ("city", "city"),
    ("state", "state"),
    ("country", "country"),
    ("pincode", "pincode"),
    ("phone", "phone"),
    ("email", "email"),
    ("status", "status"),
];

/// Raw query-string parameters, all optional and taken as strings so that
/// non-numeric values can fall back to defaults instead of failing extraction.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Resolved listing criteria: page >= 1, page_size >= 1, whitelisted sort
/// column. Ties between equal sort keys resolve in store-native order, which
/// is not stable; callers must not rely on the ordering of tied values.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCriteria {
    pub page: i64,
    pub page_size: i64,
    pub search: String,
    sort_column: &'static str,
    pub order: SortOrder,
}

impl Default for ListCriteria {
    fn default() -> Self {
        ListParams::default().resolve()
    }
}

impl ListParams {
    /// Apply defaulting and fallback rules to produce usable criteria
    pub fn resolve(self) -> ListCriteria {
        let page = parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let page_size = parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE);

        let sort_column = self
            .sort
            .as_deref()
            .and_then(lookup_column)
            .unwrap_or(DEFAULT_SORT_COLUMN);

        // Anything that is not exactly "desc" sorts ascending
        let order = match self.order.as_deref() {
            Some(o) if o.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        ListCriteria {
            page,
            page_size,
            search: self.search.unwrap_or_default(),
            sort_column,
            order,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).filter(|n| *n >= 1)
}

fn lookup_column(wire_name: &str) -> Option<&'static str> {
    SORTABLE_COLUMNS
        .iter()
        .find(|(wire, _)| *wire == wire_name)
        .map(|(_, col)| *col)
}

impl ListCriteria {
    /// WHERE fragment for the search filter, or empty when matching all.
    /// The same bound pattern applies to all three columns; see
    /// [`ListCriteria::like_pattern`].
    pub fn where_sql(&self) -> &'static str {
        if self.search.is_empty() {
            ""
        } else {
            " WHERE (branch_name LIKE ? ESCAPE '\\' \
               OR branch_code LIKE ? ESCAPE '\\' \
               OR city LIKE ? ESCAPE '\\')"
        }
    }

    /// LIKE pattern for the search text: `%text%` with SQL wildcards in the
    /// text escaped so the match is always a literal substring. SQLite's
    /// LIKE is case-insensitive for ASCII, which covers the contract.
    pub fn like_pattern(&self) -> Option<String> {
        if self.search.is_empty() {
            None
        } else {
            Some(format!("%{}%", escape_like(&self.search)))
        }
    }

    pub fn order_sql(&self) -> String {
        let direction = match self.order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        format!(" ORDER BY {} {}", self.sort_column, direction)
    }

    pub fn offset(&self) -> i64 {
        // page and page_size are caller-controlled; saturate instead of
        // overflowing on absurd but parseable values
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
