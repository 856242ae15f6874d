//! Core timeline engine producing the month-by-month and year-by-year ledger

use chrono::{Datelike, Local, NaiveDate};

use crate::account::{Profile, Transaction, TransactionKind};
use crate::error::{Result, TrackerError};
use crate::rates::RateTable;

use super::records::{FinancialYearRecord, MonthRecord, TimelineResult};
use super::state::{financial_year_of, Accumulator, MonthWindow};

/// Configuration for a projection run
#[derive(Debug, Clone, Copy)]
pub struct ProjectionConfig {
    /// The evaluation instant. Months starting strictly after this date are
    /// candidates for the recurring-contribution projection; financial years
    /// starting in or after its calendar year are flagged as projected.
    pub today: NaiveDate,
}

impl ProjectionConfig {
    /// Evaluate the timeline as of a fixed date
    pub fn as_of(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }
}

/// Main timeline projection engine.
///
/// Pure over its inputs: the same profile, transactions, and rate table
/// always produce an identical result, and nothing is mutated.
pub struct TimelineEngine {
    rates: RateTable,
    config: ProjectionConfig,
}

impl TimelineEngine {
    /// Create a new engine with the given rate table and config
    pub fn new(rates: RateTable, config: ProjectionConfig) -> Self {
        Self { rates, config }
    }

    /// Project the account timeline from the joining date to the later of the
    /// target date and the last transaction.
    ///
    /// No transactions and no joining date is the defined empty case. A
    /// missing joining date with transactions present falls back to the
    /// earliest transaction date as the effective start; this fallback is
    /// warn-logged, never silent.
    pub fn project(
        &self,
        profile: &Profile,
        transactions: &[Transaction],
    ) -> Result<TimelineResult> {
        profile.validate()?;
        for tx in transactions {
            if !tx.amount.is_finite() || tx.amount <= 0.0 {
                return Err(TrackerError::InvalidAmount {
                    id: tx.id.clone(),
                    amount: tx.amount,
                });
            }
        }

        if transactions.is_empty() && profile.joining_date.is_none() {
            return Ok(TimelineResult::empty());
        }

        // Ascending by transaction date; among equal dates credits sort
        // before debits so same-day contributions offset same-day withdrawals.
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| {
            a.transaction_date
                .cmp(&b.transaction_date)
                .then_with(|| a.kind.is_debit().cmp(&b.kind.is_debit()))
        });

        let join_date = match profile.joining_date {
            Some(date) => date,
            None => {
                let earliest = sorted
                    .first()
                    .map(|tx| tx.transaction_date)
                    .ok_or_else(|| {
                        TrackerError::InvalidProfile(
                            "joining date required when no transactions exist".to_string(),
                        )
                    })?;
                log::warn!(
                    "profile has no joining date; using earliest transaction date {} as effective start",
                    earliest
                );
                earliest
            }
        };

        let last_tx_date = sorted
            .last()
            .map(|tx| tx.transaction_date)
            .unwrap_or(join_date);
        let calc_end = profile.target_date.max(last_tx_date);

        let start_fy = financial_year_of(join_date);
        let end_fy = financial_year_of(calc_end);

        let mut years = Vec::with_capacity((end_fy - start_fy + 1).max(0) as usize);
        let mut acc = Accumulator::new();

        for fy in start_fy..=end_fy {
            let (record, next) = self.project_year(fy, &sorted, join_date, profile.end_date, acc);
            acc = next;
            years.push(record);
        }

        Ok(TimelineResult {
            years,
            total_balance: acc.balance,
        })
    }

    /// Process one financial year: its months, totals, and the single
    /// year-end interest credit.
    fn project_year(
        &self,
        fy: i32,
        sorted: &[&Transaction],
        join_date: NaiveDate,
        end_date: Option<NaiveDate>,
        mut acc: Accumulator,
    ) -> (FinancialYearRecord, Accumulator) {
        let rate = self.rates.rate_for(fy);
        let opening_balance = acc.balance;

        let mut total_contributions = 0.0;
        let mut total_withdrawals = 0.0;
        let mut interest_earned = 0.0;
        let mut monthly_breakdown: Vec<MonthRecord> = Vec::new();

        for offset in 0..12 {
            let window = MonthWindow::for_fy(fy, offset);

            // Months entirely before the joining date are excluded wholesale;
            // the joining month itself is included wholesale. No proration.
            if window.last_day < join_date {
                continue;
            }

            let (record, outcome, next) = self.process_month(&window, sorted, end_date, rate, acc);
            acc = next;

            interest_earned += record.interest_accrued;
            total_contributions += outcome.contributions;
            total_withdrawals += outcome.withdrawals;
            monthly_breakdown.push(record);
        }

        // Interest accrues monthly but is credited to the balance exactly
        // once, at financial-year end.
        acc.balance += interest_earned;

        // Surface the credit in the March ledger row so the displayed months
        // show the year-end jump. Never counted as a contribution.
        if let Some(last) = monthly_breakdown.last_mut() {
            if last.month == 3 {
                last.credit_year_interest(interest_earned);
            }
        }

        let window_start = MonthWindow::for_fy(fy, 0);
        let window_end = MonthWindow::for_fy(fy, 11);
        let record = FinancialYearRecord {
            start_year: fy,
            label: FinancialYearRecord::label_for(fy),
            start_date: window_start.first_day,
            end_date: window_end.last_day,
            opening_balance,
            total_contributions,
            total_withdrawals,
            interest_rate: rate,
            interest_earned,
            closing_balance: acc.balance,
            is_projected: fy >= self.config.today.year(),
            monthly_breakdown,
        };

        (record, acc)
    }

    /// Process a single month: bucket real transactions, apply the projection
    /// heuristic, accrue interest against the opening balance, and return the
    /// advanced accumulator.
    fn process_month(
        &self,
        window: &MonthWindow,
        sorted: &[&Transaction],
        end_date: Option<NaiveDate>,
        rate: f64,
        acc: Accumulator,
    ) -> (MonthRecord, MonthOutcome, Accumulator) {
        let in_month: Vec<&Transaction> = sorted
            .iter()
            .copied()
            .filter(|tx| window.contains(tx.transaction_date))
            .collect();

        let opening_balance = acc.balance;
        let mut last_contribution = acc.last_contribution;
        let mut credits = 0.0;
        let mut debits = 0.0;
        let mut contributions = 0.0;
        let mut withdrawals = 0.0;

        for tx in &in_month {
            match tx.kind {
                TransactionKind::Contribution => {
                    credits += tx.amount;
                    contributions += tx.amount;
                    last_contribution = tx.amount;
                }
                TransactionKind::TransferIn => {
                    credits += tx.amount;
                    contributions += tx.amount;
                }
                // Explicit interest credits grow the balance but are kept out
                // of the contribution statistic.
                TransactionKind::Interest => {
                    credits += tx.amount;
                }
                TransactionKind::Withdrawal | TransactionKind::TransferOut => {
                    debits += tx.amount;
                    withdrawals += tx.amount;
                }
            }
        }

        // Projection heuristic: a future month with no real activity repeats
        // the most recent real contribution, unless employment has ended.
        let is_future = window.first_day > self.config.today;
        let before_cutoff = end_date.map_or(true, |end| window.first_day < end);
        if in_month.is_empty() && is_future && before_cutoff && last_contribution > 0.0 {
            credits += last_contribution;
            contributions += last_contribution;
        }

        // Simple monthly interest on the balance present at the start of the
        // month; intra-month activity earns nothing this month.
        let interest_accrued = opening_balance * rate / 1200.0;

        let record = MonthRecord::new(
            window.name(),
            window.month,
            window.year,
            opening_balance,
            credits,
            debits,
            interest_accrued,
        );

        let next = Accumulator {
            balance: opening_balance + credits - debits,
            last_contribution,
        };

        (
            record,
            MonthOutcome {
                contributions,
                withdrawals,
            },
            next,
        )
    }
}

/// Month-level statistic deltas fed into the year totals
#[derive(Debug, Clone, Copy)]
struct MonthOutcome {
    contributions: f64,
    withdrawals: f64,
}
