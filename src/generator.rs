//! Batch generation of recurring monthly contributions
//!
//! Convenience generator feeding the same Transaction model as hand-entered
//! data: twelve synthetic contribution entries for one financial year, one
//! per calendar month. Re-running the generator for a year replaces the
//! entries it produced earlier instead of duplicating them.

use crate::account::{AccountBundle, Transaction, TransactionKind};
use crate::error::{Result, TrackerError};
use crate::timeline::{FinancialYearRecord, MonthWindow};

/// Id prefix marking generator-owned transactions
const GENERATED_ID_PREFIX: &str = "auto";

fn generated_id(fy_start_year: i32, month: u32) -> String {
    format!("{}-{}-{:02}", GENERATED_ID_PREFIX, fy_start_year, month)
}

/// Whether a transaction was produced by the generator for the given year
fn is_generated_for(tx: &Transaction, fy_start_year: i32) -> bool {
    tx.id
        .starts_with(&format!("{}-{}-", GENERATED_ID_PREFIX, fy_start_year))
}

/// Emit twelve contribution transactions for a financial year, dated the
/// first of each month April through March. Deterministic: same inputs, same
/// ids, same dates.
pub fn generate_monthly_contributions(
    fy_start_year: i32,
    monthly_amount: f64,
) -> Result<Vec<Transaction>> {
    if !monthly_amount.is_finite() || monthly_amount <= 0.0 {
        return Err(TrackerError::InvalidAmount {
            id: generated_id(fy_start_year, 4),
            amount: monthly_amount,
        });
    }

    let label = FinancialYearRecord::label_for(fy_start_year);
    let mut transactions = Vec::with_capacity(12);
    for offset in 0..12 {
        let window = MonthWindow::for_fy(fy_start_year, offset);
        let mut tx = Transaction::new(
            generated_id(fy_start_year, window.month),
            TransactionKind::Contribution,
            monthly_amount,
            window.first_day,
        );
        tx.description = format!("Monthly contribution ({})", label);
        transactions.push(tx);
    }
    Ok(transactions)
}

/// Generate contributions for a year into a bundle, replacing any previously
/// auto-generated entries for that year and recording the year's rate.
/// Hand-entered transactions are never touched.
pub fn apply_batch(
    bundle: &mut AccountBundle,
    fy_start_year: i32,
    monthly_amount: f64,
    annual_rate: Option<f64>,
) -> Result<()> {
    let generated = generate_monthly_contributions(fy_start_year, monthly_amount)?;

    let before = bundle.transactions.len();
    bundle
        .transactions
        .retain(|tx| !is_generated_for(tx, fy_start_year));
    let replaced = before - bundle.transactions.len();
    if replaced > 0 {
        log::debug!(
            "replacing {} previously generated entries for FY{}",
            replaced,
            fy_start_year
        );
    }

    bundle.transactions.extend(generated);
    bundle
        .transactions
        .sort_by(|a, b| a.transaction_date.cmp(&b.transaction_date));

    if let Some(rate) = annual_rate {
        bundle.interest_rates.insert(fy_start_year, rate);
    }

    Ok(())
}
