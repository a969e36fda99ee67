//! Bill entity - The persisted monthly charge record for one card.
//!
//! The stored `total` is a running value maintained at purchase-entry time and
//! may go stale after edits; the aggregator always recomputes it from the
//! installment rows and never trusts this column. `is_paid` is persisted and
//! is what keeps a "ghost" bill (no remaining installment rows) visible in
//! history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bill database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    /// Unique identifier for the bill
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the card this bill belongs to
    pub card_id: i64,
    /// Year of the billing cycle
    pub bill_year: i32,
    /// Month (1-12) of the billing cycle
    pub bill_month: i32,
    /// Stored total; possibly stale, recomputed on every read
    pub total: Decimal,
    /// Whether the bill has been marked paid
    pub is_paid: bool,
}

/// Defines relationships between Bill and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each bill belongs to one card
    #[sea_orm(
        belongs_to = "super::card::Entity",
        from = "Column::CardId",
        to = "super::card::Column::Id"
    )]
    Card,
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
