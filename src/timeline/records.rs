//! Ledger output structures for projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar month of ledger activity within a financial year
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    /// Month name ("April".."March")
    pub month_name: String,

    /// Calendar month ordinal (1 = January)
    pub month: u32,

    /// Calendar year
    pub year: i32,

    /// Balance at the first instant of the month
    pub opening_balance: f64,

    /// Credits applied this month (real + projected; includes the year-end
    /// interest credit when this is the year's final March)
    pub total_credits: f64,

    /// Debits applied this month
    pub total_debits: f64,

    /// Simple interest accrued this month against the opening balance
    pub interest_accrued: f64,

    /// Balance at the last instant of the month
    pub closing_balance: f64,
}

impl MonthRecord {
    /// Build a record; closing balance is derived so the
    /// `closing = opening + credits - debits` invariant holds by construction.
    pub fn new(
        month_name: &str,
        month: u32,
        year: i32,
        opening_balance: f64,
        total_credits: f64,
        total_debits: f64,
        interest_accrued: f64,
    ) -> Self {
        Self {
            month_name: month_name.to_string(),
            month,
            year,
            opening_balance,
            total_credits,
            total_debits,
            interest_accrued,
            closing_balance: opening_balance + total_credits - total_debits,
        }
    }

    /// Fold the financial year's accumulated interest into this month's
    /// displayed credits and closing balance. Raises both by the same amount,
    /// so the month invariant is preserved.
    pub(crate) fn credit_year_interest(&mut self, interest: f64) {
        self.total_credits += interest;
        self.closing_balance += interest;
    }
}

/// One April-March financial year of the projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialYearRecord {
    /// Calendar year the FY starts in (2023 for FY2023-24)
    pub start_year: i32,

    /// Display label, e.g. "FY2023-24"
    pub label: String,

    /// April 1 of the start year
    pub start_date: NaiveDate,

    /// March 31 of the following year
    pub end_date: NaiveDate,

    /// Balance carried in from the previous year (post-interest)
    pub opening_balance: f64,

    /// Real and projected contributions; excludes interest credits
    pub total_contributions: f64,

    /// Real withdrawals and transfers out
    pub total_withdrawals: f64,

    /// Annual rate applied, percent
    pub interest_rate: f64,

    /// Interest accrued over the year's months, credited once at year end
    pub interest_earned: f64,

    /// Balance after the year-end interest credit
    pub closing_balance: f64,

    /// Display hint: the year starts at or after the evaluation year
    pub is_projected: bool,

    /// Month ledger in April..March order
    pub monthly_breakdown: Vec<MonthRecord>,
}

impl FinancialYearRecord {
    /// Label for a financial year start year, e.g. 2023 -> "FY2023-24"
    pub fn label_for(start_year: i32) -> String {
        format!("FY{}-{:02}", start_year, (start_year + 1).rem_euclid(100))
    }

    /// Year-level summary in the shape consumed by advisory collaborators
    pub fn summary(&self) -> YearSummary {
        YearSummary {
            start_year: self.start_year,
            label: self.label.clone(),
            opening_balance: self.opening_balance,
            total_contribution: self.total_contributions,
            total_withdrawal: self.total_withdrawals,
            total_interest: self.interest_earned,
            closing_balance: self.closing_balance,
            interest_rate: self.interest_rate,
        }
    }
}

/// Derived year-level summary handed to presentation and advisory
/// collaborators; carries no month detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub start_year: i32,
    pub label: String,
    pub opening_balance: f64,
    pub total_contribution: f64,
    pub total_withdrawal: f64,
    pub total_interest: f64,
    pub closing_balance: f64,
    pub interest_rate: f64,
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResult {
    /// Ordered financial year records
    pub years: Vec<FinancialYearRecord>,

    /// Final running balance after the last year's interest credit
    pub total_balance: f64,
}

impl TimelineResult {
    /// The defined empty-input result
    pub fn empty() -> Self {
        Self {
            years: Vec::new(),
            total_balance: 0.0,
        }
    }

    /// Year summaries in projection order
    pub fn year_summaries(&self) -> Vec<YearSummary> {
        self.years.iter().map(FinancialYearRecord::summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_record_closing_invariant() {
        let record = MonthRecord::new("May", 5, 2023, 1000.0, 500.0, 200.0, 6.875);
        assert_eq!(record.closing_balance, 1300.0);
    }

    #[test]
    fn test_year_interest_credit_preserves_invariant() {
        let mut record = MonthRecord::new("March", 3, 2024, 1000.0, 100.0, 0.0, 7.5);
        record.credit_year_interest(90.0);
        assert_eq!(record.total_credits, 190.0);
        assert_eq!(
            record.closing_balance,
            record.opening_balance + record.total_credits - record.total_debits
        );
    }

    #[test]
    fn test_fy_label() {
        assert_eq!(FinancialYearRecord::label_for(2023), "FY2023-24");
        assert_eq!(FinancialYearRecord::label_for(1999), "FY1999-00");
        assert_eq!(FinancialYearRecord::label_for(2099), "FY2099-00");
    }

    #[test]
    fn test_empty_result() {
        let result = TimelineResult::empty();
        assert!(result.years.is_empty());
        assert_eq!(result.total_balance, 0.0);
        assert!(result.year_summaries().is_empty());
    }
}
