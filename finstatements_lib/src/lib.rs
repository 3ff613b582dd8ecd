//! Library layer for the income statement service: typed statements, filter
//! and sort parameters, input validation, and the query pipeline.
//!
//! Wraps the `fmp_api` crate, converting its loosely-typed records into
//! [`IncomeStatement`] values and applying the caller's range filters and sort.

pub mod error;
pub mod filter;
pub mod service;
pub mod statement;
pub mod validation;

pub use fmp_api;

pub use error::StatementsError;
pub use filter::{SortField, SortOrder, StatementFilters, StatementSort};
pub use service::{ServiceConfig, StatementQueryService};
pub use statement::{IncomeStatement, ParseError};
