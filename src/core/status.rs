//! Purchase payment status derivation.
//!
//! Pure, stateless per-record transform from ledger entries to the
//! `PurchaseStatus` view model; safe to apply independently and in parallel
//! across purchases. No queries are issued here.

use crate::core::ledger::PurchaseLedgerEntry;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Marker appended to the display name of cards that were deactivated, so a
/// live card's bill is never confused with an orphaned one.
pub const INACTIVE_CARD_MARKER: &str = "(Excluído)";

/// Payment status view of one purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseStatus {
    /// ID of the underlying purchase
    pub purchase_id: i64,
    /// Description of the purchase
    pub description: String,
    /// Total purchase amount
    pub total_amount: Decimal,
    /// Number of installments the purchase was split into
    pub installment_count: i32,
    /// How many installments have been paid
    pub paid_installments: usize,
    /// Amount still owed, per the per-installment-share formula
    pub remaining_amount: Decimal,
    /// Card name, suffixed with `"(Excluído)"` when the card is inactive
    pub card_display_name: String,
    /// Whether the owning card is still active
    pub card_is_active: bool,
    /// Calendar date of the purchase
    pub purchase_date: NaiveDate,
    /// Spending category
    pub category: String,
}

/// Derives the payment status of a single ledger entry.
///
/// The remaining amount is computed as
/// `(total / installment_count) × (installment_count − paid_count)`, i.e. the
/// uniform per-installment share times the number of unpaid installments.
/// When installment amounts are not perfectly uniform (the rounding remainder
/// sits on the last installment) this can diverge from
/// `total − Σ paid amounts` by up to one cent; the formula is kept for
/// compatibility with the amounts users have already seen.
#[must_use]
pub fn purchase_status(entry: &PurchaseLedgerEntry) -> PurchaseStatus {
    let paid = entry.installments.iter().filter(|i| i.is_paid).count();
    let paid_i64 = i64::try_from(paid).unwrap_or(i64::MAX);

    // installment_count is 1..=36 by construction; guard the division anyway
    let count = i64::from(entry.purchase.installment_count.max(1));
    let share = entry.purchase.total_amount / Decimal::from(count);
    let unpaid = (count - paid_i64).max(0);
    let remaining_amount = (share * Decimal::from(unpaid)).round_dp(2);

    let card_display_name = if entry.card_is_active {
        entry.card_name.clone()
    } else {
        format!("{} {INACTIVE_CARD_MARKER}", entry.card_name)
    };

    PurchaseStatus {
        purchase_id: entry.purchase.id,
        description: entry.purchase.description.clone(),
        total_amount: entry.purchase.total_amount,
        installment_count: entry.purchase.installment_count,
        paid_installments: paid,
        remaining_amount,
        card_display_name,
        card_is_active: entry.card_is_active,
        purchase_date: entry.purchase.purchase_date,
        category: entry.purchase.category.clone(),
    }
}

/// Derives payment statuses for a whole ledger slice, preserving order.
#[must_use]
pub fn purchase_statuses(entries: &[PurchaseLedgerEntry]) -> Vec<PurchaseStatus> {
    entries.iter().map(purchase_status).collect()
}
