//! Initial database migration.
//!
//! Creates the enums, the four record tables, and their indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: TABLES
        // ============================================================
        db.execute_unprepared(INVENTORY_SQL).await?;
        db.execute_unprepared(SALES_SQL).await?;
        db.execute_unprepared(SERVICE_RECORDS_SQL).await?;
        db.execute_unprepared(FINANCE_SQL).await?;

        // ============================================================
        // PART 3: INDEXES
        // ============================================================
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE vehicle_condition AS ENUM ('normal', 'damaged');
CREATE TYPE vehicle_status AS ENUM ('available', 'in_service', 'under_writing', 'under_contract', 'sold');
CREATE TYPE sale_status AS ENUM ('under_contract', 'under_writing', 'sold');
CREATE TYPE payment_method AS ENUM ('cash', 'credit', 'loan');
CREATE TYPE credit_band AS ENUM ('excellent', 'very_good', 'good', 'average', 'poor');
CREATE TYPE seriousness AS ENUM ('high', 'medium', 'low');
CREATE TYPE service_status AS ENUM ('in_service', 'completed');
";

const INVENTORY_SQL: &str = r"
CREATE TABLE inventory (
    id              BIGSERIAL PRIMARY KEY,
    vin_number      TEXT NOT NULL UNIQUE,
    make            TEXT NOT NULL,
    model           TEXT NOT NULL,
    year            INTEGER NOT NULL,
    mileage         INTEGER NOT NULL,
    condition_type  vehicle_condition NOT NULL,
    cost            NUMERIC(14, 2) NOT NULL,
    sale_price      NUMERIC(14, 2) NOT NULL,
    profit_percent  NUMERIC(10, 2) NOT NULL,
    status          vehicle_status NOT NULL DEFAULT 'available',
    location        TEXT NOT NULL,
    pr_update_count INTEGER NOT NULL DEFAULT 0,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const SALES_SQL: &str = r"
CREATE TABLE sales (
    id                       BIGSERIAL PRIMARY KEY,
    sale_id                  TEXT NOT NULL UNIQUE,
    vin_number               TEXT NOT NULL REFERENCES inventory (vin_number),
    sale_price               NUMERIC(14, 2) NOT NULL,
    status                   sale_status NOT NULL,
    payment_method           payment_method NOT NULL,
    deposit                  NUMERIC(14, 2),
    interest_rate            NUMERIC(6, 2),
    credit_band              credit_band,
    term_months              INTEGER,
    monthly_payment          NUMERIC(14, 2),
    created_at               TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at               TIMESTAMPTZ NOT NULL DEFAULT now(),
    status_under_contract_at TIMESTAMPTZ,
    status_under_writing_at  TIMESTAMPTZ,
    status_sold_at           TIMESTAMPTZ
);
";

const SERVICE_RECORDS_SQL: &str = r"
CREATE TABLE service_records (
    id                BIGSERIAL PRIMARY KEY,
    service_id        TEXT NOT NULL UNIQUE,
    vin_number        TEXT NOT NULL REFERENCES inventory (vin_number),
    seriousness_level seriousness NOT NULL,
    estimated_days    INTEGER NOT NULL,
    cost_added        NUMERIC(14, 2) NOT NULL DEFAULT 0,
    status            service_status NOT NULL DEFAULT 'in_service',
    created_at        TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const FINANCE_SQL: &str = r"
CREATE TABLE finance (
    id               BIGSERIAL PRIMARY KEY,
    finance_id       TEXT NOT NULL UNIQUE,
    sale_id          TEXT,
    vin_number       TEXT NOT NULL,
    cost             NUMERIC(14, 2) NOT NULL DEFAULT 0,
    sale_price       NUMERIC(14, 2) NOT NULL DEFAULT 0,
    status           vehicle_status NOT NULL DEFAULT 'available',
    payment_type     payment_method,
    deposit          NUMERIC(14, 2) NOT NULL DEFAULT 0,
    loan_term        INTEGER,
    loan_interest    NUMERIC(6, 2),
    monthly_payment  NUMERIC(14, 2),
    cc_fee           NUMERIC(14, 2) NOT NULL DEFAULT 0,
    tax              NUMERIC(14, 2) NOT NULL DEFAULT 0,
    final_sale_price NUMERIC(14, 2) NOT NULL DEFAULT 0,
    amount_paid      NUMERIC(14, 2) NOT NULL DEFAULT 0,
    amount_remaining NUMERIC(14, 2) NOT NULL DEFAULT 0,
    net_profit       NUMERIC(14, 2) NOT NULL DEFAULT 0,
    profit_now       NUMERIC(14, 2) NOT NULL DEFAULT 0,
    sale_date        DATE,
    created_at       TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX ix_inventory_status ON inventory (status);
CREATE INDEX ix_inventory_location ON inventory (location);
CREATE INDEX ix_sales_vin_number ON sales (vin_number);
CREATE INDEX ix_sales_status ON sales (status);
CREATE INDEX ix_service_records_vin_number ON service_records (vin_number);
CREATE INDEX ix_service_records_status ON service_records (status);
CREATE INDEX ix_finance_vin_number ON finance (vin_number);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS finance;
DROP TABLE IF EXISTS service_records;
DROP TABLE IF EXISTS sales;
DROP TABLE IF EXISTS inventory;
DROP TYPE IF EXISTS service_status;
DROP TYPE IF EXISTS seriousness;
DROP TYPE IF EXISTS credit_band;
DROP TYPE IF EXISTS payment_method;
DROP TYPE IF EXISTS sale_status;
DROP TYPE IF EXISTS vehicle_status;
DROP TYPE IF EXISTS vehicle_condition;
";
