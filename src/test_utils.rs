//! Shared test utilities for `FaturaCore`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults. Card and bill rows are
//! inserted directly (their lifecycle belongs to external collaborators);
//! purchases go through the real `record_purchase` path so installments and
//! bill rows are created the same way production does.

use crate::{
    core::ledger,
    entities::{Installment, bill, card, installment, purchase},
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// Initializes test tracing; safe to call from multiple tests.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A fixed calendar date for deterministic tests.
#[allow(clippy::unwrap_used)]
pub fn test_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates an active test card with sensible defaults.
///
/// # Defaults
/// * `credit_limit`: 2000.00
/// * `closing_day`: 20
/// * `due_day`: 27
pub async fn create_test_card(db: &DatabaseConnection, name: &str) -> Result<card::Model> {
    create_custom_card(db, name, true, 20).await
}

/// Creates a test card with custom activity flag and closing day.
pub async fn create_custom_card(
    db: &DatabaseConnection,
    name: &str,
    is_active: bool,
    closing_day: i32,
) -> Result<card::Model> {
    card::ActiveModel {
        name: Set(name.to_string()),
        credit_limit: Set(Decimal::new(200_000, 2)),
        closing_day: Set(closing_day),
        due_day: Set(27),
        is_active: Set(is_active),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Records a test purchase dated 2025-06-10 through the production path,
/// creating its installment schedule and bill rows.
pub async fn create_test_purchase(
    db: &DatabaseConnection,
    card_id: i64,
    total: Decimal,
    installment_count: i32,
) -> Result<purchase::Model> {
    ledger::record_purchase(
        db,
        card_id,
        "Test purchase".to_string(),
        total,
        test_date(2025, 6, 10),
        installment_count,
        "outros".to_string(),
    )
    .await
}

/// Marks the first `count` installments of a purchase (by bill month) paid.
pub async fn pay_installments(
    db: &DatabaseConnection,
    purchase_id: i64,
    count: usize,
) -> Result<()> {
    let rows = Installment::find()
        .filter(installment::Column::PurchaseId.eq(purchase_id))
        .order_by_asc(installment::Column::BillYear)
        .order_by_asc(installment::Column::BillMonth)
        .all(db)
        .await?;

    for row in rows.into_iter().take(count) {
        ledger::set_installment_paid(db, row.id, true).await?;
    }
    Ok(())
}

/// Inserts a bill row directly, bypassing purchase entry. Used for ghost-bill
/// scenarios where installment rows intentionally do not exist.
pub async fn insert_bill(
    db: &DatabaseConnection,
    card_id: i64,
    bill_year: i32,
    bill_month: i32,
    total: Decimal,
    is_paid: bool,
) -> Result<bill::Model> {
    bill::ActiveModel {
        card_id: Set(card_id),
        bill_year: Set(bill_year),
        bill_month: Set(bill_month),
        total: Set(total),
        is_paid: Set(is_paid),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Sets up a complete test environment with one active card.
/// Returns (db, card) for common test scenarios.
pub async fn setup_with_card() -> Result<(DatabaseConnection, card::Model)> {
    let db = setup_test_db().await?;
    let test_card = create_test_card(&db, "Test Card").await?;
    Ok((db, test_card))
}
