//! Explicit bill-aggregation cache.
//!
//! The aggregation core is cache-agnostic and always recomputes from the
//! store; callers that want caching go through this component instead. The
//! cache is a keyed store with explicit invalidation: after any external
//! mutation (new purchase, paid flag flipped, bill marked paid), invalidate
//! the affected card. Partial aggregations - ones that carried warnings - are
//! never cached, so a transient sub-fetch failure can't pin an incomplete
//! bill list.

use crate::core::bills::{self, BillAggregation, BillSummary};
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, trace};

/// Keyed cache of complete bill aggregations, by card id.
#[derive(Debug, Clone, Default)]
pub struct BillCache {
    inner: Arc<RwLock<HashMap<i64, Vec<BillSummary>>>>,
}

impl BillCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached bills for a card, if present.
    pub async fn get(&self, card_id: i64) -> Option<Vec<BillSummary>> {
        self.inner.read().await.get(&card_id).cloned()
    }

    /// Drops the cached entry for one card. Call after any mutation touching
    /// that card's purchases, installments, or bills.
    pub async fn invalidate(&self, card_id: i64) {
        let removed = self.inner.write().await.remove(&card_id).is_some();
        if removed {
            info!(card_id, "invalidated cached bill aggregation");
        }
    }

    /// Drops every cached entry.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Returns the bills of a card, serving from the cache when possible.
    ///
    /// On a miss the aggregation runs against the store; the result is cached
    /// only when it carried no warnings, so partially aggregated bill lists
    /// are always recomputed on the next call.
    pub async fn bills_by_card(
        &self,
        db: &DatabaseConnection,
        card_id: i64,
    ) -> Result<BillAggregation> {
        if let Some(cached) = self.get(card_id).await {
            trace!(card_id, "serving bill aggregation from cache");
            return Ok(BillAggregation {
                bills: cached,
                warnings: Vec::new(),
            });
        }

        let aggregation = bills::bills_by_card(db, card_id).await?;
        if aggregation.warnings.is_empty() {
            self.inner
                .write()
                .await
                .insert(card_id, aggregation.bills.clone());
        }
        Ok(aggregation)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::ledger;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_miss_then_hit() -> Result<()> {
        let (db, test_card) = setup_with_card().await?;
        create_test_purchase(&db, test_card.id, dec!(300.00), 3).await?;

        let cache = BillCache::new();
        assert!(cache.get(test_card.id).await.is_none());

        let first = cache.bills_by_card(&db, test_card.id).await?;
        assert_eq!(first.bills.len(), 3);
        assert!(cache.get(test_card.id).await.is_some());

        let second = cache.bills_by_card(&db, test_card.id).await?;
        assert_eq!(second.bills, first.bills);

        Ok(())
    }

    #[tokio::test]
    async fn test_stale_until_invalidated() -> Result<()> {
        init_test_tracing();
        let (db, test_card) = setup_with_card().await?;
        create_test_purchase(&db, test_card.id, dec!(300.00), 3).await?;

        let cache = BillCache::new();
        let before = cache.bills_by_card(&db, test_card.id).await?;
        assert_eq!(before.bills.len(), 3);

        // Mutation outside the cache's view
        ledger::record_purchase(
            &db,
            test_card.id,
            "Tênis".to_string(),
            dec!(240.00),
            test_date(2025, 6, 15),
            6,
            "vestuario".to_string(),
        )
        .await?;

        // Still serves the cached (now stale) aggregation
        let stale = cache.bills_by_card(&db, test_card.id).await?;
        assert_eq!(stale.bills.len(), 3);

        cache.invalidate(test_card.id).await;
        let fresh = cache.bills_by_card(&db, test_card.id).await?;
        assert_eq!(fresh.bills.len(), 6);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_drops_all_cards() -> Result<()> {
        let db = setup_test_db().await?;
        let card_a = create_test_card(&db, "Card A").await?;
        let card_b = create_test_card(&db, "Card B").await?;
        create_test_purchase(&db, card_a.id, dec!(100.00), 1).await?;
        create_test_purchase(&db, card_b.id, dec!(100.00), 1).await?;

        let cache = BillCache::new();
        cache.bills_by_card(&db, card_a.id).await?;
        cache.bills_by_card(&db, card_b.id).await?;
        assert!(cache.get(card_a.id).await.is_some());
        assert!(cache.get(card_b.id).await.is_some());

        cache.clear().await;
        assert!(cache.get(card_a.id).await.is_none());
        assert!(cache.get(card_b.id).await.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_aggregation_is_cached() -> Result<()> {
        let (db, test_card) = setup_with_card().await?;

        let cache = BillCache::new();
        let aggregation = cache.bills_by_card(&db, test_card.id).await?;
        assert!(aggregation.bills.is_empty());
        // No warnings, so even an empty list is a complete answer
        assert!(cache.get(test_card.id).await.is_some());

        Ok(())
    }
}
