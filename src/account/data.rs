//! Account data structures matching the tracker storage format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Regular (employee/employer) contribution
    Contribution,
    /// Withdrawal from the corpus
    Withdrawal,
    /// Balance transferred in from another account
    TransferIn,
    /// Balance transferred out to another account
    TransferOut,
    /// Explicit interest credit recorded as a transaction
    Interest,
}

impl TransactionKind {
    /// Whether this kind increases the balance.
    ///
    /// The match is exhaustive on purpose: adding a new kind forces a
    /// classification decision here.
    pub fn is_credit(&self) -> bool {
        match self {
            TransactionKind::Contribution
            | TransactionKind::TransferIn
            | TransactionKind::Interest => true,
            TransactionKind::Withdrawal | TransactionKind::TransferOut => false,
        }
    }

    /// Whether this kind decreases the balance
    pub fn is_debit(&self) -> bool {
        !self.is_credit()
    }

    /// Storage tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Contribution => "contribution",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::TransferIn => "transfer_in",
            TransactionKind::TransferOut => "transfer_out",
            TransactionKind::Interest => "interest",
        }
    }
}

/// A single dated movement on the account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: String,

    /// Transaction kind (closed set)
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Monetary amount, strictly positive
    pub amount: f64,

    /// Date the transaction hit the account; authoritative for bucketing
    pub transaction_date: NaiveDate,

    /// Legacy wage-month date; display only, never used for bucketing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_date: Option<NaiveDate>,

    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Create a transaction with the modern single-date form
    pub fn new(
        id: impl Into<String>,
        kind: TransactionKind,
        amount: f64,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            amount,
            transaction_date,
            contribution_date: None,
            description: String::new(),
        }
    }
}

/// Account holder profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Employer name, display only
    #[serde(default)]
    pub employer_name: String,

    /// Date the account was opened / employment started.
    /// Required for projection; see the engine's documented fallback.
    pub joining_date: Option<NaiveDate>,

    /// Employment / contribution cutoff. Projection never runs past it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Horizon the projection runs to
    pub target_date: NaiveDate,
}

impl Profile {
    /// Validate internal consistency
    pub fn validate(&self) -> crate::error::Result<()> {
        if let (Some(join), Some(end)) = (self.joining_date, self.end_date) {
            if end < join {
                return Err(crate::error::TrackerError::InvalidProfile(format!(
                    "end date {} precedes joining date {}",
                    end, join
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_credit_debit_classification() {
        assert!(TransactionKind::Contribution.is_credit());
        assert!(TransactionKind::TransferIn.is_credit());
        assert!(TransactionKind::Interest.is_credit());
        assert!(TransactionKind::Withdrawal.is_debit());
        assert!(TransactionKind::TransferOut.is_debit());
    }

    #[test]
    fn test_profile_rejects_end_before_join() {
        let profile = Profile {
            employer_name: String::new(),
            joining_date: Some(d(2022, 4, 6)),
            end_date: Some(d(2021, 1, 1)),
            target_date: d(2025, 3, 31),
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_transaction_serde_tags() {
        let tx = Transaction::new("t1", TransactionKind::TransferIn, 500.0, d(2023, 5, 1));
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"type\":\"transfer_in\""));
        assert!(json.contains("\"transactionDate\":\"2023-05-01\""));
    }
}
