//! Repository for batches.

use trackgate_core::batch::{validate_new_batch, Batch, NewBatch};
use trackgate_core::error::CoreError;
use trackgate_core::progress::BatchProgress;
use trackgate_core::types::EntityId;

use crate::latency::Operation;
use crate::MemoryDb;

/// Creation, lookup and progress for batches.
pub struct BatchRepo;

impl BatchRepo {
    /// Validate the request, generate every track and store the batch.
    pub async fn create(db: &MemoryDb, input: &NewBatch) -> Result<Batch, CoreError> {
        validate_new_batch(input)?;
        db.latency().pause(Operation::CreateBatch).await;

        let batch = Batch::generate(input, db.generator());
        db.insert_batch(batch.clone()).await;

        tracing::info!(
            batch_id = %batch.id,
            name = %batch.name,
            track_count = batch.tracks.len(),
            "Batch created"
        );
        Ok(batch)
    }

    /// Find a batch by id.
    pub async fn find_by_id(db: &MemoryDb, id: EntityId) -> Option<Batch> {
        db.latency().pause(Operation::GetBatch).await;
        db.batch(id).await
    }

    /// Fetch a batch, failing with `NotFound` when it does not exist.
    pub async fn get(db: &MemoryDb, id: EntityId) -> Result<Batch, CoreError> {
        Self::find_by_id(db, id)
            .await
            .ok_or_else(|| CoreError::not_found("batch", id))
    }

    /// All batches in creation order.
    pub async fn list(db: &MemoryDb) -> Vec<Batch> {
        db.latency().pause(Operation::ListBatches).await;
        db.all_batches().await
    }

    /// Progress summary of one batch.
    pub async fn progress(db: &MemoryDb, id: EntityId) -> Result<BatchProgress, CoreError> {
        let batch = Self::get(db, id).await?;
        Ok(BatchProgress::compute(&batch))
    }
}
