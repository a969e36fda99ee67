//! Core business logic - framework-agnostic billing operations.
//!
//! Data flows one direction: the ledger reader fetches purchases with their
//! installments, the status transformer derives per-purchase payment views,
//! the bill aggregator recomputes authoritative bill totals, and the limit
//! projector passes validated requests through to an external computation.

/// Bill aggregation - recomputing bill totals from installment rows
pub mod bills;
/// Purchase ledger reading and purchase/installment lifecycle
pub mod ledger;
/// Bill month (year + calendar month) value type and cycle arithmetic
pub mod month;
/// Credit-limit projection capability and its server-procedure implementation
pub mod projection;
/// Purchase payment status derivation
pub mod status;
