//! Bill month arithmetic.
//!
//! A bill month is a calendar year + month pair identifying which billing
//! cycle an installment belongs to. Purchases made after the card's closing
//! day fall into the following month's cycle.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar year + month identifying one billing cycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BillMonth {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
}

impl BillMonth {
    /// Creates a bill month from a year and a month in 1..=12.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The bill month containing the given calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Rebuilds a bill month from raw storage columns.
    ///
    /// The month column is clamped into 1..=12; values outside that range
    /// cannot be produced by this crate and indicate hand-edited rows.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // clamp guarantees 1..=12
    pub fn from_columns(year: i32, month: i32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12) as u32,
        }
    }

    /// The month column value for storage.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // month is 1..=12
    pub const fn month_column(self) -> i32 {
        self.month as i32
    }

    /// The next bill month, wrapping December into January of the next year.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The first billing cycle a purchase falls into.
    ///
    /// Purchases on or before the card's closing day belong to the current
    /// month's bill; purchases after it roll over to the next month.
    #[must_use]
    pub fn first_cycle(purchase_date: NaiveDate, closing_day: i32) -> Self {
        let base = Self::from_date(purchase_date);
        if i64::from(purchase_date.day()) > i64::from(closing_day) {
            base.next()
        } else {
            base
        }
    }
}

impl fmt::Display for BillMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_date() {
        assert_eq!(BillMonth::from_date(date(2025, 6, 15)), BillMonth::new(2025, 6));
    }

    #[test]
    fn test_next_wraps_december() {
        assert_eq!(BillMonth::new(2025, 12).next(), BillMonth::new(2026, 1));
        assert_eq!(BillMonth::new(2025, 6).next(), BillMonth::new(2025, 7));
    }

    #[test]
    fn test_first_cycle_before_closing_day() {
        // Purchase on the 10th with closing day 20 stays in June
        let month = BillMonth::first_cycle(date(2025, 6, 10), 20);
        assert_eq!(month, BillMonth::new(2025, 6));
    }

    #[test]
    fn test_first_cycle_on_closing_day() {
        // The closing day itself still belongs to the current cycle
        let month = BillMonth::first_cycle(date(2025, 6, 20), 20);
        assert_eq!(month, BillMonth::new(2025, 6));
    }

    #[test]
    fn test_first_cycle_after_closing_day() {
        // Purchase on the 25th with closing day 20 rolls into July
        let month = BillMonth::first_cycle(date(2025, 6, 25), 20);
        assert_eq!(month, BillMonth::new(2025, 7));
    }

    #[test]
    fn test_first_cycle_december_rollover() {
        let month = BillMonth::first_cycle(date(2025, 12, 28), 20);
        assert_eq!(month, BillMonth::new(2026, 1));
    }

    #[test]
    fn test_from_columns_clamps() {
        assert_eq!(BillMonth::from_columns(2025, 6), BillMonth::new(2025, 6));
        assert_eq!(BillMonth::from_columns(2025, 0), BillMonth::new(2025, 1));
        assert_eq!(BillMonth::from_columns(2025, 13), BillMonth::new(2025, 12));
    }

    #[test]
    fn test_display() {
        assert_eq!(BillMonth::new(2025, 6).to_string(), "2025-06");
        assert_eq!(BillMonth::new(2025, 11).to_string(), "2025-11");
    }

    #[test]
    fn test_ordering() {
        assert!(BillMonth::new(2025, 12) < BillMonth::new(2026, 1));
        assert!(BillMonth::new(2025, 6) < BillMonth::new(2025, 7));
    }
}
