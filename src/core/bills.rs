//! Bill aggregation business logic.
//!
//! Recomputes each bill's authoritative total from its installment rows - the
//! stored total is treated as stale and replaced on every read. Installment
//! sub-fetches fan out concurrently, one future per bill, and fan back in with
//! per-bill error isolation: one corrupt bill must not hide all other valid
//! bills, so a failed sub-fetch becomes a warning instead of aborting the
//! batch.

use crate::{
    core::month::BillMonth,
    entities::{Bill, Installment, bill, card, installment},
    errors::Result,
};
use futures::future::join_all;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr, JoinType, QueryOrder, QuerySelect, prelude::*};
use tracing::{trace, warn};

/// One bill with its total recomputed from installment rows.
#[derive(Debug, Clone, PartialEq)]
pub struct BillSummary {
    /// ID of the underlying bill row
    pub bill_id: i64,
    /// ID of the owning card
    pub card_id: i64,
    /// Billing cycle this bill covers
    pub month: BillMonth,
    /// Recomputed total: the decimal sum of matching installment amounts
    pub total: Decimal,
    /// Persisted paid flag
    pub is_paid: bool,
    /// Number of installment rows backing the total
    pub installment_count: usize,
}

/// A bill omitted from the output because its installment sub-fetch failed.
#[derive(Debug, Clone)]
pub struct AggregationWarning {
    /// ID of the owning card
    pub card_id: i64,
    /// Billing cycle of the omitted bill
    pub month: BillMonth,
    /// Why the sub-fetch failed
    pub reason: String,
}

/// Result of aggregating one card's bills: the retained bills plus warnings
/// for any bill whose installments could not be fetched.
#[derive(Debug, Clone, Default)]
pub struct BillAggregation {
    /// Retained bills, ordered by bill month descending
    pub bills: Vec<BillSummary>,
    /// One entry per bill omitted due to a sub-fetch failure
    pub warnings: Vec<AggregationWarning>,
}

/// Aggregates all bills of a card, recomputing every total from installments.
///
/// Bills are restricted to active cards via a join-time predicate and ordered
/// by bill month descending. A bill is retained if it has at least one
/// matching installment row, or if its persisted paid flag is set (a fully
/// paid bill whose installment rows were pruned by later edits). Bills with
/// zero installments and `is_paid == false` are dropped silently - a normal
/// "ghost bill" condition from superseded purchases, not an error.
///
/// Failure of the bill-list query itself is fatal and surfaces
/// [`crate::errors::Error::DataAccess`]. Failure of one bill's installment
/// fetch only removes that bill and records an [`AggregationWarning`];
/// sibling fetches keep running.
pub async fn bills_by_card(db: &DatabaseConnection, card_id: i64) -> Result<BillAggregation> {
    let bill_rows = Bill::find()
        .filter(bill::Column::CardId.eq(card_id))
        .join(JoinType::InnerJoin, bill::Relation::Card.def())
        .filter(card::Column::IsActive.eq(true))
        .order_by_desc(bill::Column::BillYear)
        .order_by_desc(bill::Column::BillMonth)
        .all(db)
        .await?;

    // Fan out one fetch per bill; join_all preserves input order and never
    // cancels siblings when one future resolves to an error
    let outcomes = join_all(
        bill_rows
            .into_iter()
            .map(|row| fetch_bill_installments(db, row)),
    )
    .await;

    let mut aggregation = BillAggregation::default();
    for (row, outcome) in outcomes {
        let month = BillMonth::from_columns(row.bill_year, row.bill_month);
        match outcome {
            Ok(rows) => {
                if rows.is_empty() && !row.is_paid {
                    trace!(card_id = row.card_id, %month, "dropping ghost bill");
                    continue;
                }
                let total: Decimal = rows.iter().map(|i| i.amount).sum();
                aggregation.bills.push(BillSummary {
                    bill_id: row.id,
                    card_id: row.card_id,
                    month,
                    total,
                    is_paid: row.is_paid,
                    installment_count: rows.len(),
                });
            }
            Err(e) => {
                warn!(
                    card_id = row.card_id,
                    %month,
                    error = %e,
                    "skipping bill: installment fetch failed"
                );
                aggregation.warnings.push(AggregationWarning {
                    card_id: row.card_id,
                    month,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(aggregation)
}

/// Fetches the installment rows backing one bill, keeping the bill row paired
/// with its outcome so failures stay attributable.
async fn fetch_bill_installments(
    db: &DatabaseConnection,
    row: bill::Model,
) -> (bill::Model, std::result::Result<Vec<installment::Model>, DbErr>) {
    let outcome = Installment::find()
        .filter(installment::Column::CardId.eq(row.card_id))
        .filter(installment::Column::BillYear.eq(row.bill_year))
        .filter(installment::Column::BillMonth.eq(row.bill_month))
        .all(db)
        .await;
    (row, outcome)
}
