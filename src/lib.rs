//! Provident Fund Tracker - corpus projection engine for PF-style savings accounts
//!
//! This library provides:
//! - A pure timeline engine: month-by-month and year-by-year ledger with
//!   April-March financial years, monthly interest accrual, and a single
//!   year-end interest credit
//! - Forward projection of recurring contributions for future months
//! - JSON bundle load/save (profile, transactions, interest rates) with
//!   legacy-field mapping
//! - Batch generation of synthetic monthly contribution entries

pub mod account;
pub mod error;
pub mod generator;
pub mod rates;
pub mod timeline;

// Re-export commonly used types
pub use account::{AccountBundle, Profile, Transaction, TransactionKind};
pub use error::{Result, TrackerError};
pub use rates::RateTable;
pub use timeline::{
    FinancialYearRecord, MonthRecord, ProjectionConfig, TimelineEngine, TimelineResult,
    YearSummary,
};
