//! Bulk catalog assignment: after signup a client gets one visibility row per
//! product. Inserts run concurrently within a fixed-size batch; the batch
//! settles fully before the next one starts. A duplicate pair is success, any
//! other per-item failure is recorded in the summary instead of aborting.

use std::future::Future;

use futures::future::join_all;
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;

use super::repo::{self, InsertOutcome};
use crate::products;

pub const BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentFailure {
    pub product_id: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct AssignmentSummary {
    /// Products the client now has visibility into (fresh inserts plus
    /// pre-existing pairs).
    pub assigned: usize,
    pub failures: Vec<AssignmentFailure>,
}

/// Ensures an assignment row exists for every product in the catalog. An empty
/// catalog is a no-op success. A fatal `Err` here (catalog load) is the
/// caller's cue to run its compensating user delete.
pub async fn assign_full_catalog(
    db: &PgPool,
    client_id: &str,
) -> anyhow::Result<AssignmentSummary> {
    let product_ids = products::repo::list_ids(db).await?;

    let summary = run_batches(&product_ids, |product_id| async move {
        repo::insert(db, client_id, &product_id).await
    })
    .await;

    for failure in &summary.failures {
        warn!(
            client_id,
            product_id = %failure.product_id,
            reason = %failure.reason,
            "assignment insert failed"
        );
    }
    Ok(summary)
}

async fn run_batches<F, Fut>(product_ids: &[String], insert: F) -> AssignmentSummary
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = anyhow::Result<InsertOutcome>>,
{
    let mut summary = AssignmentSummary::default();
    for batch in product_ids.chunks(BATCH_SIZE) {
        let results = join_all(batch.iter().map(|id| insert(id.clone()))).await;
        for (product_id, result) in batch.iter().zip(results) {
            match result {
                Ok(_) => summary.assigned += 1,
                Err(e) => summary.failures.push(AssignmentFailure {
                    product_id: product_id.clone(),
                    reason: e.to_string(),
                }),
            }
        }
    }
    summary
}
