//! Load and save the account bundle (profile + transactions + rates)
//!
//! The storage document is JSON with camelCase fields. Raw records carry
//! string dates so that a bad value can be reported against the transaction
//! or profile field it came from. Legacy records that only carry a single
//! `date` field are mapped onto the modern transactionDate/contributionDate
//! pair here, before the engine ever sees them.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::rates::RateTable;

use super::{Profile, Transaction, TransactionKind};

/// Everything one projection run needs, as stored on disk
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBundle {
    pub profile: Profile,
    pub transactions: Vec<Transaction>,
    /// FY start year -> annual rate, explicit entries only
    pub interest_rates: BTreeMap<i32, f64>,
}

impl AccountBundle {
    /// Rate table for a projection run over this bundle
    pub fn rate_table(&self) -> RateTable {
        RateTable::new(self.interest_rates.clone())
    }
}

/// Raw transaction record as stored; dates are unparsed strings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    amount: f64,
    #[serde(default)]
    transaction_date: Option<String>,
    #[serde(default)]
    contribution_date: Option<String>,
    /// Legacy single-date field from the v1 storage format
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    #[serde(default)]
    employer_name: String,
    #[serde(default)]
    joining_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    target_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBundle {
    #[serde(default)]
    profile: Option<RawProfile>,
    #[serde(default)]
    transactions: Vec<RawTransaction>,
    #[serde(default)]
    interest_rates: BTreeMap<String, f64>,
}

fn parse_date(context: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| TrackerError::DateParse {
        context: context.to_string(),
        value: value.to_string(),
    })
}

/// Optional date fields store "" for unset
fn parse_optional_date(context: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some("") => Ok(None),
        Some(v) => parse_date(context, v).map(Some),
    }
}

impl RawTransaction {
    fn into_transaction(self) -> Result<Transaction> {
        let kind = match self.kind.as_str() {
            "contribution" => TransactionKind::Contribution,
            "withdrawal" => TransactionKind::Withdrawal,
            "transfer_in" => TransactionKind::TransferIn,
            "transfer_out" => TransactionKind::TransferOut,
            "interest" => TransactionKind::Interest,
            other => {
                return Err(TrackerError::UnknownTransactionType {
                    id: self.id,
                    value: other.to_string(),
                })
            }
        };

        // Legacy mapping: a single `date` feeds both modern fields when they
        // are absent.
        let tx_date_raw = self
            .transaction_date
            .or_else(|| self.date.clone())
            .or_else(|| self.contribution_date.clone());
        let tx_date_raw = tx_date_raw.ok_or_else(|| TrackerError::DateParse {
            context: format!("transaction {}.transactionDate", self.id),
            value: String::new(),
        })?;
        let transaction_date = parse_date(
            &format!("transaction {}.transactionDate", self.id),
            &tx_date_raw,
        )?;

        let contribution_raw = self.contribution_date.or(self.date);
        let contribution_date = parse_optional_date(
            &format!("transaction {}.contributionDate", self.id),
            contribution_raw.as_deref(),
        )?;

        Ok(Transaction {
            id: self.id,
            kind,
            amount: self.amount,
            transaction_date,
            contribution_date,
            description: self.description,
        })
    }
}

impl RawProfile {
    fn into_profile(self) -> Result<Profile> {
        let joining_date =
            parse_optional_date("profile.joiningDate", self.joining_date.as_deref())?;
        let end_date = parse_optional_date("profile.endDate", self.end_date.as_deref())?;

        let target_date = match self.target_date.as_deref() {
            Some("") | None => {
                let fallback = default_target_date();
                log::warn!(
                    "profile has no target date; defaulting projection horizon to {}",
                    fallback
                );
                fallback
            }
            Some(v) => parse_date("profile.targetDate", v)?,
        };

        Ok(Profile {
            employer_name: self.employer_name,
            joining_date,
            end_date,
            target_date,
        })
    }
}

/// One year out from today, matching the app's default horizon
fn default_target_date() -> NaiveDate {
    let today = Local::now().date_naive();
    today.checked_add_months(Months::new(12)).unwrap_or(today)
}

impl RawBundle {
    fn into_bundle(self) -> Result<AccountBundle> {
        let profile = self.profile.unwrap_or_default().into_profile()?;

        let mut transactions = Vec::with_capacity(self.transactions.len());
        for raw in self.transactions {
            transactions.push(raw.into_transaction()?);
        }

        let mut interest_rates = BTreeMap::new();
        for (key, rate) in self.interest_rates {
            let year: i32 = key
                .parse()
                .map_err(|_| TrackerError::InvalidRateKey(key.clone()))?;
            interest_rates.insert(year, rate);
        }

        Ok(AccountBundle {
            profile,
            transactions,
            interest_rates,
        })
    }
}

/// Parse a bundle from a JSON string
pub fn load_bundle_from_str(json: &str) -> Result<AccountBundle> {
    let raw: RawBundle = serde_json::from_str(json)?;
    raw.into_bundle()
}

/// Load a bundle from any reader
pub fn load_bundle_from_reader<R: std::io::Read>(reader: R) -> Result<AccountBundle> {
    let raw: RawBundle = serde_json::from_reader(reader)?;
    raw.into_bundle()
}

/// Load a bundle from a JSON file
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<AccountBundle> {
    let file = File::open(&path)?;
    let bundle = load_bundle_from_reader(file)?;
    log::info!(
        "loaded {} transactions and {} rate entries from {}",
        bundle.transactions.len(),
        bundle.interest_rates.len(),
        path.as_ref().display()
    );
    Ok(bundle)
}

/// Write a bundle back as pretty-printed JSON
pub fn save_bundle<P: AsRef<Path>>(path: P, bundle: &AccountBundle) -> Result<()> {
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(file, bundle)?;
    log::info!(
        "saved {} transactions to {}",
        bundle.transactions.len(),
        path.as_ref().display()
    );
    Ok(())
}
