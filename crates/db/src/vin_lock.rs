//! Per-VIN advisory locking.
//!
//! The "at most one active Sale/Service per VIN" invariants rely on
//! read-validate-write sequencing. Concurrent requests against the same
//! VIN would race through that sequence, so every mutation path takes a
//! `PostgreSQL` transaction-scoped advisory lock on the VIN before its
//! first read. The lock releases automatically with the transaction.

use sea_orm::{ConnectionTrait, DbBackend, DbErr, Statement};

/// Serializes mutations for one VIN within the given transaction.
///
/// Blocks until any other transaction holding the same VIN's lock commits
/// or rolls back.
///
/// # Errors
///
/// Returns an error if the lock statement fails.
pub async fn acquire<C: ConnectionTrait>(conn: &C, vin_number: &str) -> Result<(), DbErr> {
    conn.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_xact_lock(hashtext($1))",
        [vin_number.into()],
    ))
    .await?;
    Ok(())
}
