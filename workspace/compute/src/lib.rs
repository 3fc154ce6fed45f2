//! Monthly aggregation and goal reconciliation for the ledger tables.
//!
//! Everything here works in exact [`rust_decimal::Decimal`] arithmetic; the
//! database is only asked for date-filtered rows, and all bucketing, summing
//! and rounding happens on this side of the connection.

pub mod aggregate;
pub mod calendar;
pub mod dashboard;
pub mod error;
pub mod goals;
pub mod history;
pub mod import;
pub mod kinds;
pub mod ledger;

#[cfg(test)]
pub(crate) mod testing;
