//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod bill;
pub mod card;
pub mod installment;
pub mod purchase;

// Re-export specific types to avoid conflicts
pub use bill::{Column as BillColumn, Entity as Bill, Model as BillModel};
pub use card::{Column as CardColumn, Entity as Card, Model as CardModel};
pub use installment::{
    Column as InstallmentColumn, Entity as Installment, Model as InstallmentModel,
};
pub use purchase::{Column as PurchaseColumn, Entity as Purchase, Model as PurchaseModel};
