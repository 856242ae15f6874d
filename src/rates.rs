//! Per-financial-year interest rate table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Rate applied when a financial year has no explicit entry
pub const DEFAULT_INTEREST_RATE: f64 = 8.25;

/// Annual interest rates keyed by financial-year start year
/// (2023 means FY2023-24).
///
/// Immutable for the duration of one projection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<i32, f64>,
    default_rate: f64,
}

impl RateTable {
    /// Build a table from explicit entries with the standard fallback rate
    pub fn new(rates: BTreeMap<i32, f64>) -> Self {
        Self {
            rates,
            default_rate: DEFAULT_INTEREST_RATE,
        }
    }

    /// Build a table with a custom fallback rate
    pub fn with_default_rate(rates: BTreeMap<i32, f64>, default_rate: f64) -> Self {
        Self {
            rates,
            default_rate,
        }
    }

    /// Published EPF rates for recent financial years
    pub fn historical() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(2021, 8.10);
        rates.insert(2022, 8.15); // FY 2022-23
        rates.insert(2023, 8.25); // FY 2023-24
        rates.insert(2024, 8.25);
        rates.insert(2025, 8.25);
        Self::new(rates)
    }

    /// Annual rate for a financial year, falling back to the default
    pub fn rate_for(&self, fy_start_year: i32) -> f64 {
        self.rates
            .get(&fy_start_year)
            .copied()
            .unwrap_or(self.default_rate)
    }

    /// Record or overwrite the rate for a financial year
    pub fn set_rate(&mut self, fy_start_year: i32, annual_rate: f64) {
        self.rates.insert(fy_start_year, annual_rate);
    }

    /// Explicit entries, in year order
    pub fn entries(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.rates.iter().map(|(y, r)| (*y, *r))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}
