//! Listing service: one page of matching records plus total and page count
//!
//! Runs the same filter through the store twice: once paginated for the
//! records, once as a bare count. No transaction spans the two queries; a
//! write landing between them can skew the count, which is acceptable for a
//! best-effort listing view.

use serde::Serialize;

use crate::error::Result;
use crate::model::Branch;
use crate::query::ListCriteria;
use crate::store::BranchStore;

/// One page of the listing, shaped for the wire
#[derive(Debug, Serialize)]
pub struct Listing {
    pub branches: Vec<Branch>,
    pub total: i64,
    pub pages: i64,
}

/// `pages = ceil(total / page_size)`
pub async fn list(store: &BranchStore, criteria: &ListCriteria) -> Result<Listing> {
    let branches = store.find_many(criteria).await?;
    let total = store.count(criteria).await?;
    // page_size >= 1; saturate so an absurd page size cannot overflow the sum
    let pages = total.saturating_add(criteria.page_size - 1) / criteria.page_size;
    Ok(Listing { branches, total, pages })
}
