//! Vehicle domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition class assigned at acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCondition {
    /// Road-ready, no repair needed.
    Normal,
    /// Needs repair before it can be offered.
    Damaged,
}

impl VehicleCondition {
    /// Returns the string representation of the condition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Damaged => "Damaged",
        }
    }

    /// Parses a condition from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "damaged" => Some(Self::Damaged),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a vehicle on the lot.
///
/// A vehicle enters as Available (or In Service when acquired damaged),
/// moves through the negotiation statuses while a sale is active, and
/// ends Sold. The service-completion sweep returns repaired vehicles to
/// Available; the negotiation-cleanup sweep returns abandoned ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    /// On the lot and sellable.
    Available,
    /// In the workshop.
    InService,
    /// An active negotiation reached Under Writing.
    UnderWriting,
    /// An active negotiation reached Under Contract.
    UnderContract,
    /// Sold; kept in inventory for the finance snapshot.
    Sold,
}

impl VehicleStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InService => "In Service",
            Self::UnderWriting => "Under Writing",
            Self::UnderContract => "Under Contract",
            Self::Sold => "Sold",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(Self::Available),
            "In Service" => Some(Self::InService),
            "Under Writing" => Some(Self::UnderWriting),
            "Under Contract" => Some(Self::UnderContract),
            "Sold" => Some(Self::Sold),
            _ => None,
        }
    }

    /// Initial status for a newly acquired vehicle.
    #[must_use]
    pub const fn initial_for(condition: VehicleCondition) -> Self {
        match condition {
            VehicleCondition::Normal => Self::Available,
            VehicleCondition::Damaged => Self::InService,
        }
    }

    /// Vehicles in the workshop, in an active negotiation, or already sold
    /// are not eligible for promotion pricing.
    #[must_use]
    pub const fn allows_promotion_pricing(self) -> bool {
        !matches!(
            self,
            Self::InService | Self::UnderContract | Self::UnderWriting | Self::Sold
        )
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_from_condition() {
        assert_eq!(
            VehicleStatus::initial_for(VehicleCondition::Normal),
            VehicleStatus::Available
        );
        assert_eq!(
            VehicleStatus::initial_for(VehicleCondition::Damaged),
            VehicleStatus::InService
        );
    }

    #[test]
    fn test_promotion_eligibility() {
        assert!(VehicleStatus::Available.allows_promotion_pricing());
        assert!(!VehicleStatus::InService.allows_promotion_pricing());
        assert!(!VehicleStatus::UnderContract.allows_promotion_pricing());
        assert!(!VehicleStatus::UnderWriting.allows_promotion_pricing());
        assert!(!VehicleStatus::Sold.allows_promotion_pricing());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            VehicleStatus::Available,
            VehicleStatus::InService,
            VehicleStatus::UnderWriting,
            VehicleStatus::UnderContract,
            VehicleStatus::Sold,
        ] {
            assert_eq!(VehicleStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_condition_parse_is_case_insensitive() {
        assert_eq!(
            VehicleCondition::parse("damaged"),
            Some(VehicleCondition::Damaged)
        );
        assert_eq!(
            VehicleCondition::parse(" Normal "),
            Some(VehicleCondition::Normal)
        );
        assert_eq!(VehicleCondition::parse("wrecked"), None);
    }
}
