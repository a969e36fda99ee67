//! Credit-limit projection.
//!
//! Projection math lives server-side; this module only validates inputs,
//! invokes the computation, and passes its result through unmodified. The
//! computation is a capability trait so tests (and local tooling) can
//! substitute a pure in-process implementation for the remote procedure.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};
use std::future::Future;

/// Months projected ahead when the caller does not specify a horizon.
pub const DEFAULT_HORIZON: i32 = 12;

/// Name of the server-side procedure computing limit projections.
pub const PROJECTION_PROCEDURE: &str = "project_card_limits";

/// One projected month of credit-limit usage, as produced by the computation.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct ProjectionPoint {
    /// Year of the projected month
    pub bill_year: i32,
    /// Month (1-12) of the projected month
    pub bill_month: i32,
    /// Credit expected to be consumed in that month
    pub projected_used: Decimal,
    /// Credit expected to remain available in that month
    pub projected_available: Decimal,
}

impl ProjectionPoint {
    /// The billing cycle this point refers to.
    #[must_use]
    pub fn month(&self) -> crate::core::month::BillMonth {
        crate::core::month::BillMonth::from_columns(self.bill_year, self.bill_month)
    }
}

/// Capability for computing credit-limit projections.
///
/// The production implementation calls the named server-side procedure;
/// tests substitute local implementations to exercise validation and
/// pass-through behavior without a database.
pub trait LimitProjection {
    /// Projects `horizon` months of limit usage for one card, ordered by
    /// month ascending as produced by the computation.
    fn project(
        &self,
        card_id: i64,
        horizon: u32,
    ) -> impl Future<Output = Result<Vec<ProjectionPoint>>> + Send;
}

/// Server-procedure-backed projection: invokes the named procedure with
/// (card id, horizon) and maps each returned row to a [`ProjectionPoint`].
#[derive(Debug)]
pub struct ProcedureProjection {
    db: DatabaseConnection,
    procedure: String,
}

impl ProcedureProjection {
    /// Creates a projection backed by the default procedure name.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_procedure(db, PROJECTION_PROCEDURE)
    }

    /// Creates a projection backed by a custom procedure name.
    #[must_use]
    pub fn with_procedure(db: DatabaseConnection, procedure: &str) -> Self {
        Self {
            db,
            procedure: procedure.to_string(),
        }
    }
}

impl LimitProjection for ProcedureProjection {
    async fn project(&self, card_id: i64, horizon: u32) -> Result<Vec<ProjectionPoint>> {
        let sql = format!(
            "SELECT bill_year, bill_month, projected_used, projected_available \
             FROM {}($1, $2)",
            self.procedure
        );
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [card_id.into(), i64::from(horizon).into()],
        );
        ProjectionPoint::find_by_statement(statement)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }
}

/// Validates inputs and invokes the projection computation.
///
/// The card reference must be a positive id and the horizon a non-negative
/// number of months (defaulting to [`DEFAULT_HORIZON`] when unspecified);
/// both are rejected before any remote call is made. The computation's result
/// is returned unmodified - an empty sequence is valid (e.g., a brand-new card
/// with no projectable data) and is not an error.
pub async fn project_limits<P: LimitProjection>(
    projector: &P,
    card_id: i64,
    horizon: Option<i32>,
) -> Result<Vec<ProjectionPoint>> {
    if card_id <= 0 {
        return Err(Error::InvalidCardReference { card_id });
    }
    let horizon = horizon.unwrap_or(DEFAULT_HORIZON);
    let months = u32::try_from(horizon).map_err(|_| Error::InvalidHorizon { horizon })?;

    projector.project(card_id, months).await
}
