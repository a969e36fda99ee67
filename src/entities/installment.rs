//! Installment entity - One monthly fractional obligation of a purchase.
//!
//! Each installment is tied to a specific bill month (`bill_year` +
//! `bill_month`) and carries its own amount; for a given purchase the
//! installment amounts sum to the purchase's total, with the rounding
//! remainder placed on the last installment. The `is_paid` flag is the only
//! field ever mutated after creation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Installment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "installments")]
pub struct Model {
    /// Unique identifier for the installment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the purchase this installment belongs to
    pub purchase_id: i64,
    /// ID of the owning card (denormalized for bill-month lookups)
    pub card_id: i64,
    /// Year of the bill month this installment belongs to
    pub bill_year: i32,
    /// Month (1-12) of the bill month this installment belongs to
    pub bill_month: i32,
    /// Amount due for this installment
    pub amount: Decimal,
    /// Whether this installment has been paid
    pub is_paid: bool,
}

/// Defines relationships between Installment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each installment belongs to one purchase
    #[sea_orm(
        belongs_to = "super::purchase::Entity",
        from = "Column::PurchaseId",
        to = "super::purchase::Column::Id"
    )]
    Purchase,
    /// Each installment belongs to one card
    #[sea_orm(
        belongs_to = "super::card::Entity",
        from = "Column::CardId",
        to = "super::card::Column::Id"
    )]
    Card,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
    }
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
