//! Resolved staff identity and role model.
//!
//! Credential issuance and role lookup live in an external collaborator;
//! by the time a request reaches this system it carries a fully resolved
//! `Actor` with a role and a home location.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff roles recognized by the dealership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Unrestricted back-office role.
    Admin,
    /// Finance desk; unrestricted read access, finance operations only.
    Finance,
    /// Negotiates sales; location-scoped.
    SalesRep,
    /// Acquires vehicles; location-scoped, stricter profit floors.
    BuyerRep,
    /// Workshop staff; location-scoped.
    ServiceRep,
    /// Promotion pricing; location-scoped with per-vehicle quota.
    Pr,
}

impl Role {
    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Finance => "Finance",
            Self::SalesRep => "SalesRep",
            Self::BuyerRep => "BuyerRep",
            Self::ServiceRep => "ServiceRep",
            Self::Pr => "PR",
        }
    }

    /// Parses a role from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Self::Admin),
            "Finance" => Some(Self::Finance),
            "SalesRep" => Some(Self::SalesRep),
            "BuyerRep" => Some(Self::BuyerRep),
            "ServiceRep" => Some(Self::ServiceRep),
            "PR" => Some(Self::Pr),
            _ => None,
        }
    }

    /// Admin and Finance bypass location restrictions.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Finance)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated staff member, as resolved by the identity collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Internal user id.
    pub user_id: i64,
    /// Login name, used in audit output.
    pub username: String,
    /// Resolved role.
    pub role: Role,
    /// Home location (dealership lot).
    pub location: String,
}

impl Actor {
    /// Returns true if the actor may operate on records at `location`.
    #[must_use]
    pub fn can_access_location(&self, location: &str) -> bool {
        self.role.is_privileged() || self.location == location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Admin, "Admin")]
    #[case(Role::Finance, "Finance")]
    #[case(Role::SalesRep, "SalesRep")]
    #[case(Role::BuyerRep, "BuyerRep")]
    #[case(Role::ServiceRep, "ServiceRep")]
    #[case(Role::Pr, "PR")]
    fn test_role_round_trip(#[case] role: Role, #[case] s: &str) {
        assert_eq!(role.as_str(), s);
        assert_eq!(Role::parse(s), Some(role));
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_eq!(Role::parse("Janitor"), None);
    }

    #[test]
    fn test_privileged_roles_bypass_location() {
        let admin = Actor {
            user_id: 1,
            username: "admin".into(),
            role: Role::Admin,
            location: "HQ".into(),
        };
        assert!(admin.can_access_location("Denver"));

        let rep = Actor {
            user_id: 2,
            username: "rep".into(),
            role: Role::SalesRep,
            location: "Denver".into(),
        };
        assert!(rep.can_access_location("Denver"));
        assert!(!rep.can_access_location("Boston"));
    }
}
