//! Service record domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How badly a vehicle needs the workshop.
///
/// The level fixes the default repair cost and duration when a service
/// entry does not supply explicit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seriousness {
    /// Major work; 3 days, 2000 default cost.
    High,
    /// Moderate work; 2 days, 1200 default cost.
    Medium,
    /// Touch-up work; 1 day, 500 default cost.
    Low,
}

impl Seriousness {
    /// Returns the display representation of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parses a level from its label (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Default repair cost added to the vehicle at completion.
    #[must_use]
    pub fn default_cost(self) -> Decimal {
        match self {
            Self::High => Decimal::new(2000, 0),
            Self::Medium => Decimal::new(1200, 0),
            Self::Low => Decimal::new(500, 0),
        }
    }

    /// Default estimated repair duration, in days.
    #[must_use]
    pub const fn default_days(self) -> i32 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl fmt::Display for Seriousness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a service record. At most one In Service record exists per
/// VIN at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Repair in progress.
    InService,
    /// Repair finished and rolled into the vehicle's cost.
    Completed,
}

impl ServiceStatus {
    /// Returns the display representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InService => "In Service",
            Self::Completed => "Completed",
        }
    }

    /// Parses a status from its display representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "In Service" => Some(Self::InService),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_by_seriousness() {
        assert_eq!(Seriousness::High.default_cost(), dec!(2000));
        assert_eq!(Seriousness::High.default_days(), 3);
        assert_eq!(Seriousness::Medium.default_cost(), dec!(1200));
        assert_eq!(Seriousness::Medium.default_days(), 2);
        assert_eq!(Seriousness::Low.default_cost(), dec!(500));
        assert_eq!(Seriousness::Low.default_days(), 1);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Seriousness::parse("high"), Some(Seriousness::High));
        assert_eq!(Seriousness::parse(" MEDIUM "), Some(Seriousness::Medium));
        assert_eq!(Seriousness::parse("catastrophic"), None);
    }
}
