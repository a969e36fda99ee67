//! Purchase entity - Represents a single credit card purchase.
//!
//! A purchase carries its full `total_amount` and an `installment_count`
//! (1..=36); the actual monthly obligations live in the installment table,
//! one row per consecutive bill month starting at the purchase's billing cycle.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    /// Unique identifier for the purchase
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the card this purchase was made with
    pub card_id: i64,
    /// Human-readable description of the purchase
    pub description: String,
    /// Total purchase amount, across all installments
    pub total_amount: Decimal,
    /// Calendar date of the purchase
    pub purchase_date: Date,
    /// Number of installments the amount is split into (1..=36)
    pub installment_count: i32,
    /// Spending category (e.g., "mercado", "transporte")
    pub category: String,
}

/// Defines relationships between Purchase and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each purchase belongs to one card
    #[sea_orm(
        belongs_to = "super::card::Entity",
        from = "Column::CardId",
        to = "super::card::Column::Id"
    )]
    Card,
    /// One purchase has many installments
    #[sea_orm(has_many = "super::installment::Entity")]
    Installments,
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl Related<super::installment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Installments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
