//! Core read logic for the escrow report service.
//!
//! This crate turns the raw chain reads exposed by `escrow-chain` into the
//! shapes the API serves: the aggregated escrow report, single deal records
//! and the fallback rules that keep a report complete when individual
//! contract methods are missing.

pub mod context;
pub mod deal;
pub mod fallback;
pub mod report;

pub use context::EscrowContext;
pub use deal::{get_deal, normalize_deal, DealError, DealMissReason, DealShapeError};
pub use fallback::FallbackChain;
pub use report::{build_report, unavailable_fields, ReportError};
