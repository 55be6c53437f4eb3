//! branchd: REST service for managing business branch records
//!
//! Paginated/searchable/sortable listing, plain CRUD, bulk XLSX
//! import/export, and a credential-gated API over a SQLite store.

pub mod auth;
pub mod error;
pub mod excel;
pub mod http;
pub mod listing;
pub mod model;
pub mod query;
pub mod store;

pub use error::{Error, Result};
