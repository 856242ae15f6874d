//! Projection accumulator state and calendar month windows

use chrono::NaiveDate;

/// Fold state threaded through month processing.
///
/// Carried explicitly into and out of every month step so a single month can
/// be exercised in isolation and a whole projection stays re-entrant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    /// Balance at the instant processing reaches the current month
    pub balance: f64,

    /// Most recent real contribution amount observed in chronological
    /// processing order; seeds the forward projection heuristic
    pub last_contribution: f64,
}

impl Accumulator {
    /// Opening state for a projection run
    pub fn new() -> Self {
        Self {
            balance: 0.0,
            last_contribution: 0.0,
        }
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// One calendar month inside a financial year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    /// Calendar year of this month
    pub year: i32,

    /// Calendar month ordinal (1 = January)
    pub month: u32,

    /// First day of the month
    pub first_day: NaiveDate,

    /// Last day of the month
    pub last_day: NaiveDate,
}

impl MonthWindow {
    /// Month window for a financial year and a 0-based offset within it
    /// (offset 0 = April, offset 11 = March of the following calendar year).
    pub fn for_fy(fy_start_year: i32, offset: u32) -> Self {
        debug_assert!(offset < 12);
        let month = (offset + 3) % 12 + 1;
        let year = if offset < 9 {
            fy_start_year
        } else {
            fy_start_year + 1
        };

        let first_day = first_of_month(year, month);
        let (next_y, next_m) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let last_day = first_of_month(next_y, next_m)
            .pred_opt()
            .expect("month start has a predecessor");

        Self {
            year,
            month,
            first_day,
            last_day,
        }
    }

    /// Whether a date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }

    /// Month name as displayed in the ledger
    pub fn name(&self) -> &'static str {
        match self.month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => unreachable!("month ordinal out of range"),
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date")
}

/// Financial year (April-March) containing a date.
/// January-March dates belong to the year that started the previous April.
pub fn financial_year_of(date: NaiveDate) -> i32 {
    use chrono::Datelike;
    if date.month() < 4 {
        date.year() - 1
    } else {
        date.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_fy_offsets_map_to_calendar() {
        let april = MonthWindow::for_fy(2023, 0);
        assert_eq!((april.year, april.month), (2023, 4));
        assert_eq!(april.first_day, d(2023, 4, 1));
        assert_eq!(april.last_day, d(2023, 4, 30));

        let december = MonthWindow::for_fy(2023, 8);
        assert_eq!((december.year, december.month), (2023, 12));

        let january = MonthWindow::for_fy(2023, 9);
        assert_eq!((january.year, january.month), (2024, 1));

        let march = MonthWindow::for_fy(2023, 11);
        assert_eq!((march.year, march.month), (2024, 3));
        assert_eq!(march.last_day, d(2024, 3, 31));
    }

    #[test]
    fn test_february_leap_year() {
        let feb = MonthWindow::for_fy(2023, 10);
        assert_eq!((feb.year, feb.month), (2024, 2));
        assert_eq!(feb.last_day, d(2024, 2, 29));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let may = MonthWindow::for_fy(2023, 1);
        assert!(may.contains(d(2023, 5, 1)));
        assert!(may.contains(d(2023, 5, 31)));
        assert!(!may.contains(d(2023, 4, 30)));
        assert!(!may.contains(d(2023, 6, 1)));
    }

    #[test]
    fn test_financial_year_of() {
        assert_eq!(financial_year_of(d(2023, 4, 1)), 2023);
        assert_eq!(financial_year_of(d(2024, 3, 31)), 2023);
        assert_eq!(financial_year_of(d(2024, 4, 1)), 2024);
        assert_eq!(financial_year_of(d(2024, 1, 15)), 2023);
    }
}
