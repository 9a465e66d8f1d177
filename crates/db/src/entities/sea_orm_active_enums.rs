//! Postgres enum mappings.
//!
//! These mirror the pure enums in `lotworks-core`; the `From` impls keep
//! the two worlds convertible without string round-trips.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Condition class assigned at acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vehicle_condition")]
pub enum VehicleCondition {
    /// Road-ready.
    #[sea_orm(string_value = "normal")]
    Normal,
    /// Needs repair.
    #[sea_orm(string_value = "damaged")]
    Damaged,
}

/// Lifecycle status of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vehicle_status")]
pub enum VehicleStatus {
    /// On the lot and sellable.
    #[sea_orm(string_value = "available")]
    Available,
    /// In the workshop.
    #[sea_orm(string_value = "in_service")]
    InService,
    /// Negotiation reached Under Writing.
    #[sea_orm(string_value = "under_writing")]
    UnderWriting,
    /// Negotiation reached Under Contract.
    #[sea_orm(string_value = "under_contract")]
    UnderContract,
    /// Sold.
    #[sea_orm(string_value = "sold")]
    Sold,
}

/// Status of a sale record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sale_status")]
pub enum SaleStatus {
    /// Buyer signed.
    #[sea_orm(string_value = "under_contract")]
    UnderContract,
    /// With underwriting.
    #[sea_orm(string_value = "under_writing")]
    UnderWriting,
    /// Closed (terminal).
    #[sea_orm(string_value = "sold")]
    Sold,
}

/// How the buyer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
pub enum PaymentMethod {
    /// Full payment on closing.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Card payment.
    #[sea_orm(string_value = "credit")]
    Credit,
    /// Financed.
    #[sea_orm(string_value = "loan")]
    Loan,
}

/// Credit-score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "credit_band")]
pub enum CreditBand {
    /// 0.00% - 0.90%
    #[sea_orm(string_value = "excellent")]
    Excellent,
    /// 1.00% - 2.00%
    #[sea_orm(string_value = "very_good")]
    VeryGood,
    /// 2.00% - 5.00%
    #[sea_orm(string_value = "good")]
    Good,
    /// 5.00% - 7.00%
    #[sea_orm(string_value = "average")]
    Average,
    /// 7.00% - 10.00%
    #[sea_orm(string_value = "poor")]
    Poor,
}

/// Repair seriousness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "seriousness")]
pub enum Seriousness {
    /// Major work.
    #[sea_orm(string_value = "high")]
    High,
    /// Moderate work.
    #[sea_orm(string_value = "medium")]
    Medium,
    /// Touch-up work.
    #[sea_orm(string_value = "low")]
    Low,
}

/// Status of a service record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "service_status")]
pub enum ServiceStatus {
    /// Repair in progress.
    #[sea_orm(string_value = "in_service")]
    InService,
    /// Repair finished.
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl From<lotworks_core::inventory::VehicleCondition> for VehicleCondition {
    fn from(value: lotworks_core::inventory::VehicleCondition) -> Self {
        match value {
            lotworks_core::inventory::VehicleCondition::Normal => Self::Normal,
            lotworks_core::inventory::VehicleCondition::Damaged => Self::Damaged,
        }
    }
}

impl From<VehicleCondition> for lotworks_core::inventory::VehicleCondition {
    fn from(value: VehicleCondition) -> Self {
        match value {
            VehicleCondition::Normal => Self::Normal,
            VehicleCondition::Damaged => Self::Damaged,
        }
    }
}

impl From<lotworks_core::inventory::VehicleStatus> for VehicleStatus {
    fn from(value: lotworks_core::inventory::VehicleStatus) -> Self {
        match value {
            lotworks_core::inventory::VehicleStatus::Available => Self::Available,
            lotworks_core::inventory::VehicleStatus::InService => Self::InService,
            lotworks_core::inventory::VehicleStatus::UnderWriting => Self::UnderWriting,
            lotworks_core::inventory::VehicleStatus::UnderContract => Self::UnderContract,
            lotworks_core::inventory::VehicleStatus::Sold => Self::Sold,
        }
    }
}

impl From<VehicleStatus> for lotworks_core::inventory::VehicleStatus {
    fn from(value: VehicleStatus) -> Self {
        match value {
            VehicleStatus::Available => Self::Available,
            VehicleStatus::InService => Self::InService,
            VehicleStatus::UnderWriting => Self::UnderWriting,
            VehicleStatus::UnderContract => Self::UnderContract,
            VehicleStatus::Sold => Self::Sold,
        }
    }
}

impl From<lotworks_core::sales::SaleStatus> for SaleStatus {
    fn from(value: lotworks_core::sales::SaleStatus) -> Self {
        match value {
            lotworks_core::sales::SaleStatus::UnderContract => Self::UnderContract,
            lotworks_core::sales::SaleStatus::UnderWriting => Self::UnderWriting,
            lotworks_core::sales::SaleStatus::Sold => Self::Sold,
        }
    }
}

impl From<SaleStatus> for lotworks_core::sales::SaleStatus {
    fn from(value: SaleStatus) -> Self {
        match value {
            SaleStatus::UnderContract => Self::UnderContract,
            SaleStatus::UnderWriting => Self::UnderWriting,
            SaleStatus::Sold => Self::Sold,
        }
    }
}

impl From<SaleStatus> for VehicleStatus {
    fn from(value: SaleStatus) -> Self {
        match value {
            SaleStatus::UnderContract => Self::UnderContract,
            SaleStatus::UnderWriting => Self::UnderWriting,
            SaleStatus::Sold => Self::Sold,
        }
    }
}

impl From<lotworks_core::sales::PaymentMethod> for PaymentMethod {
    fn from(value: lotworks_core::sales::PaymentMethod) -> Self {
        match value {
            lotworks_core::sales::PaymentMethod::Cash => Self::Cash,
            lotworks_core::sales::PaymentMethod::Credit => Self::Credit,
            lotworks_core::sales::PaymentMethod::Loan => Self::Loan,
        }
    }
}

impl From<PaymentMethod> for lotworks_core::sales::PaymentMethod {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Cash => Self::Cash,
            PaymentMethod::Credit => Self::Credit,
            PaymentMethod::Loan => Self::Loan,
        }
    }
}

impl From<lotworks_core::loan::CreditBand> for CreditBand {
    fn from(value: lotworks_core::loan::CreditBand) -> Self {
        match value {
            lotworks_core::loan::CreditBand::Excellent => Self::Excellent,
            lotworks_core::loan::CreditBand::VeryGood => Self::VeryGood,
            lotworks_core::loan::CreditBand::Good => Self::Good,
            lotworks_core::loan::CreditBand::Average => Self::Average,
            lotworks_core::loan::CreditBand::Poor => Self::Poor,
        }
    }
}

impl From<CreditBand> for lotworks_core::loan::CreditBand {
    fn from(value: CreditBand) -> Self {
        match value {
            CreditBand::Excellent => Self::Excellent,
            CreditBand::VeryGood => Self::VeryGood,
            CreditBand::Good => Self::Good,
            CreditBand::Average => Self::Average,
            CreditBand::Poor => Self::Poor,
        }
    }
}

impl From<lotworks_core::servicing::Seriousness> for Seriousness {
    fn from(value: lotworks_core::servicing::Seriousness) -> Self {
        match value {
            lotworks_core::servicing::Seriousness::High => Self::High,
            lotworks_core::servicing::Seriousness::Medium => Self::Medium,
            lotworks_core::servicing::Seriousness::Low => Self::Low,
        }
    }
}

impl From<Seriousness> for lotworks_core::servicing::Seriousness {
    fn from(value: Seriousness) -> Self {
        match value {
            Seriousness::High => Self::High,
            Seriousness::Medium => Self::Medium,
            Seriousness::Low => Self::Low,
        }
    }
}

impl From<lotworks_core::servicing::ServiceStatus> for ServiceStatus {
    fn from(value: lotworks_core::servicing::ServiceStatus) -> Self {
        match value {
            lotworks_core::servicing::ServiceStatus::InService => Self::InService,
            lotworks_core::servicing::ServiceStatus::Completed => Self::Completed,
        }
    }
}

impl From<ServiceStatus> for lotworks_core::servicing::ServiceStatus {
    fn from(value: ServiceStatus) -> Self {
        match value {
            ServiceStatus::InService => Self::InService,
            ServiceStatus::Completed => Self::Completed,
        }
    }
}
