//! Credit-score bands and their interest-rate intervals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse credit-score label supplied by the lender check.
///
/// Each band maps to a closed annual-interest interval; the actual rate
/// for a deal is drawn uniformly from the band's interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBand {
    /// 0.00% - 0.90%
    Excellent,
    /// 1.00% - 2.00%
    VeryGood,
    /// 2.00% - 5.00%
    Good,
    /// 5.00% - 7.00%
    Average,
    /// 7.00% - 10.00%
    Poor,
}

impl CreditBand {
    /// Returns the display label of the band.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Poor => "Poor",
        }
    }

    /// Parses a band from its label (case-insensitive).
    ///
    /// Unrecognized labels return `None`; callers surface that as a
    /// validation error rather than falling back to a default band.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "excellent" => Some(Self::Excellent),
            "very good" => Some(Self::VeryGood),
            "good" => Some(Self::Good),
            "average" => Some(Self::Average),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }

    /// Closed annual-rate interval for the band, in basis points of a
    /// percent (two decimal places of precision).
    #[must_use]
    pub const fn rate_bounds_bps(self) -> (i64, i64) {
        match self {
            Self::Excellent => (0, 90),
            Self::VeryGood => (100, 200),
            Self::Good => (200, 500),
            Self::Average => (500, 700),
            Self::Poor => (700, 1000),
        }
    }

    /// Closed annual-rate interval for the band, in percent.
    #[must_use]
    pub fn rate_bounds(self) -> (Decimal, Decimal) {
        let (lo, hi) = self.rate_bounds_bps();
        (Decimal::new(lo, 2), Decimal::new(hi, 2))
    }
}

impl fmt::Display for CreditBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_band_labels_round_trip() {
        for band in [
            CreditBand::Excellent,
            CreditBand::VeryGood,
            CreditBand::Good,
            CreditBand::Average,
            CreditBand::Poor,
        ] {
            assert_eq!(CreditBand::parse(band.as_str()), Some(band));
        }
        assert_eq!(CreditBand::parse("very good"), Some(CreditBand::VeryGood));
        assert_eq!(CreditBand::parse("Subprime"), None);
    }

    #[test]
    fn test_rate_bounds() {
        assert_eq!(
            CreditBand::Excellent.rate_bounds(),
            (dec!(0.00), dec!(0.90))
        );
        assert_eq!(CreditBand::Poor.rate_bounds(), (dec!(7.00), dec!(10.00)));
    }
}
