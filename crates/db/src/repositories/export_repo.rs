//! CSV export of the stored collections.

use trackgate_core::export::{batches_to_csv, playlists_to_csv};

use crate::latency::Operation;
use crate::MemoryDb;

pub struct ExportRepo;

impl ExportRepo {
    pub async fn batches_csv(db: &MemoryDb) -> String {
        db.latency().pause(Operation::Export).await;
        let batches = db.all_batches().await;
        tracing::debug!(rows = batches.len(), "Exporting batches");
        batches_to_csv(&batches)
    }

    pub async fn playlists_csv(db: &MemoryDb) -> String {
        db.latency().pause(Operation::Export).await;
        let playlists = db.all_playlists().await;
        tracing::debug!(rows = playlists.len(), "Exporting playlists");
        playlists_to_csv(&playlists)
    }
}
