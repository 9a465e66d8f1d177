//! `SeaORM` entity definitions.

pub mod finance;
pub mod inventory;
pub mod sales;
pub mod sea_orm_active_enums;
pub mod service_records;
