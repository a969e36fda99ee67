//! Database configuration module.
//!
//! Handles database connection and table creation using `SeaORM`. Production
//! deployments point `DATABASE_URL` at the hosted Postgres service; local
//! development and tests fall back to `SQLite`. Table creation uses
//! `Schema::create_table_from_entity` so the dev/test schema always matches
//! the entity definitions without manual SQL.

use crate::config::AppConfig;
use crate::entities::{Bill, Card, Installment, Purchase};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/fatura.sqlite";

/// Resolves the database URL: `DATABASE_URL` env var, then the configured
/// value, then a local `SQLite` default.
#[must_use]
pub fn get_database_url(config: &AppConfig) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| config.database_url.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the resolved database URL.
pub async fn create_connection(config: &AppConfig) -> Result<DatabaseConnection> {
    Database::connect(get_database_url(config))
        .await
        .map_err(Into::into)
}

/// Creates all tables from the entity definitions.
///
/// Used for local `SQLite` databases and tests; the hosted service owns its
/// own migrations.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let card_table = schema.create_table_from_entity(Card);
    let purchase_table = schema.create_table_from_entity(Purchase);
    let installment_table = schema.create_table_from_entity(Installment);
    let bill_table = schema.create_table_from_entity(Bill);

    db.execute(builder.build(&card_table)).await?;
    db.execute(builder.build(&purchase_table)).await?;
    db.execute(builder.build(&installment_table)).await?;
    db.execute(builder.build(&bill_table)).await?;

    Ok(())
}
