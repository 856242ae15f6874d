//! Timeline projection engine: calendar bucketing, interest accrual, and
//! financial-year aggregation

mod engine;
mod records;
mod state;

pub use engine::{ProjectionConfig, TimelineEngine};
pub use records::{FinancialYearRecord, MonthRecord, TimelineResult, YearSummary};
pub use state::{financial_year_of, Accumulator, MonthWindow};
