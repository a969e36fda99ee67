//! Card entity - Represents a credit card and its billing cycle parameters.
//!
//! Each card has a credit limit, a `closing_day` (purchases after it fall into
//! the next month's bill), a `due_day`, and an `is_active` flag. Deactivated
//! cards stay readable for history but are marked in derived display names and
//! excluded from current bill listings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Credit card database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    /// Unique identifier for the card
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the card (e.g., "Nubank", "Visa Gold")
    pub name: String,
    /// Total credit limit of the card
    pub credit_limit: Decimal,
    /// Day of the month on which the billing cycle closes (1-31)
    pub closing_day: i32,
    /// Day of the month on which the bill is due (1-31)
    pub due_day: i32,
    /// Whether the card is active; inactive cards are kept for history only
    pub is_active: bool,
}

/// Defines relationships between Card and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One card has many purchases
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
    /// One card has many installments
    #[sea_orm(has_many = "super::installment::Entity")]
    Installments,
    /// One card has many bills
    #[sea_orm(has_many = "super::bill::Entity")]
    Bills,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl Related<super::installment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Installments.def()
    }
}

impl Related<super::bill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
