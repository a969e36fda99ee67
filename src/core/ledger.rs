//! Purchase ledger business logic.
//!
//! Provides the ledger reader (purchases joined with card info and
//! per-installment payment flags) and the purchase lifecycle operations:
//! recording a purchase together with its full installment schedule in one
//! database transaction, and flipping an installment's paid flag. Bills are
//! never mutated by readers; a bill row is created or bumped only at
//! purchase-entry time, and its stored total is treated as stale everywhere
//! else.

use crate::{
    core::month::BillMonth,
    entities::{Bill, Card, Installment, Purchase, bill, card, installment, purchase},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::debug;

/// Maximum number of installments a purchase can be split into.
pub const MAX_INSTALLMENTS: i32 = 36;

/// One purchase together with its owning card's display info and its
/// installment rows, as returned by the ledger reader.
#[derive(Debug, Clone)]
pub struct PurchaseLedgerEntry {
    /// The purchase record
    pub purchase: purchase::Model,
    /// Name of the owning card
    pub card_name: String,
    /// Whether the owning card is still active
    pub card_is_active: bool,
    /// Installments of this purchase, ordered by bill month ascending
    pub installments: Vec<installment::Model>,
}

/// Retrieves all purchases with their card info and installment paid flags,
/// ordered by purchase date descending (most recent first).
///
/// If `card_filter` is given, only purchases of that card are returned.
/// Purchases of inactive cards are included; callers decide how to mark them
/// (see [`crate::core::status`]). The full matching set is returned - there is
/// no pagination. A failed query surfaces [`Error::DataAccess`]; an empty
/// result is never substituted for a failure.
pub async fn purchases_with_installments(
    db: &DatabaseConnection,
    card_filter: Option<i64>,
) -> Result<Vec<PurchaseLedgerEntry>> {
    let mut query = Purchase::find();
    if let Some(card_id) = card_filter {
        query = query.filter(purchase::Column::CardId.eq(card_id));
    }
    let purchases = query
        .order_by_desc(purchase::Column::PurchaseDate)
        .order_by_desc(purchase::Column::Id)
        .all(db)
        .await?;

    let cards: HashMap<i64, card::Model> = Card::find()
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let purchase_ids: Vec<i64> = purchases.iter().map(|p| p.id).collect();
    let mut by_purchase: HashMap<i64, Vec<installment::Model>> = HashMap::new();
    if !purchase_ids.is_empty() {
        let rows = Installment::find()
            .filter(installment::Column::PurchaseId.is_in(purchase_ids))
            .order_by_asc(installment::Column::BillYear)
            .order_by_asc(installment::Column::BillMonth)
            .all(db)
            .await?;
        for row in rows {
            by_purchase.entry(row.purchase_id).or_default().push(row);
        }
    }

    purchases
        .into_iter()
        .map(|p| {
            let owning_card = cards
                .get(&p.card_id)
                .ok_or(Error::CardNotFound { id: p.card_id })?;
            Ok(PurchaseLedgerEntry {
                card_name: owning_card.name.clone(),
                card_is_active: owning_card.is_active,
                installments: by_purchase.remove(&p.id).unwrap_or_default(),
                purchase: p,
            })
        })
        .collect()
}

/// Records a purchase and its complete installment schedule atomically.
///
/// The total is split into `installment_count` monthly shares rounded to two
/// decimal places, with the rounding remainder placed on the last installment
/// so the shares always sum to the exact total. The first installment lands in
/// the billing cycle determined by the purchase date and the card's closing
/// day; each subsequent installment lands in the next consecutive month. A
/// bill row is created for every affected month if one does not exist yet, and
/// its stored running total is bumped.
///
/// # Arguments
/// * `card_id` - The card the purchase was made with (must exist and be active)
/// * `description` - Description of the purchase
/// * `total_amount` - Total purchase amount (must be positive)
/// * `purchase_date` - Calendar date of the purchase
/// * `installment_count` - Number of installments, 1..=36
/// * `category` - Spending category
pub async fn record_purchase(
    db: &DatabaseConnection,
    card_id: i64,
    description: String,
    total_amount: Decimal,
    purchase_date: NaiveDate,
    installment_count: i32,
    category: String,
) -> Result<purchase::Model> {
    if total_amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: total_amount,
        });
    }
    if !(1..=MAX_INSTALLMENTS).contains(&installment_count) {
        return Err(Error::InvalidInstallmentCount {
            count: installment_count,
        });
    }

    // Use a transaction so the purchase, its installments, and the touched
    // bill rows appear together or not at all
    let txn = db.begin().await?;

    let owning_card = Card::find_by_id(card_id)
        .one(&txn)
        .await?
        .ok_or(Error::CardNotFound { id: card_id })?;
    if !owning_card.is_active {
        return Err(Error::CardNotFound { id: card_id });
    }

    let created = purchase::ActiveModel {
        card_id: Set(card_id),
        description: Set(description),
        total_amount: Set(total_amount),
        purchase_date: Set(purchase_date),
        installment_count: Set(installment_count),
        category: Set(category),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let share = (total_amount / Decimal::from(installment_count)).round_dp(2);
    let mut cycle = BillMonth::first_cycle(purchase_date, owning_card.closing_day);
    for index in 0..installment_count {
        // Rounding remainder lands on the last installment
        let amount = if index == installment_count - 1 {
            total_amount - share * Decimal::from(installment_count - 1)
        } else {
            share
        };

        installment::ActiveModel {
            purchase_id: Set(created.id),
            card_id: Set(card_id),
            bill_year: Set(cycle.year),
            bill_month: Set(cycle.month_column()),
            amount: Set(amount),
            is_paid: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        ensure_bill(&txn, card_id, cycle, amount).await?;
        cycle = cycle.next();
    }

    txn.commit().await?;

    debug!(
        purchase_id = created.id,
        card_id,
        installments = installment_count,
        "recorded purchase"
    );
    Ok(created)
}

/// Flips the paid flag of a single installment.
///
/// This is the only installment mutation the system performs; amounts and
/// bill months are immutable after creation.
pub async fn set_installment_paid(
    db: &DatabaseConnection,
    installment_id: i64,
    paid: bool,
) -> Result<installment::Model> {
    let row = Installment::find_by_id(installment_id)
        .one(db)
        .await?
        .ok_or(Error::InstallmentNotFound { id: installment_id })?;

    let mut active: installment::ActiveModel = row.into();
    active.is_paid = Set(paid);
    active.update(db).await.map_err(Into::into)
}

/// Finds or creates the bill row for (card, month) and bumps its stored
/// running total by `amount`.
async fn ensure_bill<C: ConnectionTrait>(
    conn: &C,
    card_id: i64,
    month: BillMonth,
    amount: Decimal,
) -> Result<()> {
    let existing = Bill::find()
        .filter(bill::Column::CardId.eq(card_id))
        .filter(bill::Column::BillYear.eq(month.year))
        .filter(bill::Column::BillMonth.eq(month.month_column()))
        .one(conn)
        .await?;

    match existing {
        Some(row) => {
            let new_total = row.total + amount;
            let mut active: bill::ActiveModel = row.into();
            active.total = Set(new_total);
            active.update(conn).await?;
        }
        None => {
            bill::ActiveModel {
                card_id: Set(card_id),
                bill_year: Set(month.year),
                bill_month: Set(month.month_column()),
                total: Set(amount),
                is_paid: Set(false),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }
    }
    Ok(())
}
