//! In-memory storage for batches and playlists.
//!
//! [`MemoryDb`] is the explicit store object owned by the composition root
//! and shared as a [`DbPool`]. Collections live for the life of the process
//! and are rebuilt from scratch on restart.
//!
//! Mutations are copy-on-write: the affected record is cloned, the workflow
//! engine produces the new value, and the copy is swapped in while the write
//! lock is held. A failing operation never touches the stored record.

use std::sync::Arc;

use tokio::sync::RwLock;
use trackgate_core::batch::Batch;
use trackgate_core::error::CoreError;
use trackgate_core::generation::{ContentGenerator, SnippetGenerator};
use trackgate_core::playlist::Playlist;
use trackgate_core::types::EntityId;

pub mod latency;
pub mod repositories;
pub mod seed;

use latency::SimulatedLatency;

pub type DbPool = Arc<MemoryDb>;

/// Store construction options.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    /// Sleep before each operation to mimic a remote backend.
    pub simulated_latency: bool,
    /// Start with the sample playlists instead of an empty playlist list.
    pub seed_sample_playlists: bool,
}

/// Create a shared store from configuration, using the snippet generator.
pub fn create_pool(config: &DbConfig) -> DbPool {
    let generator = Arc::new(SnippetGenerator);
    let mut db = if config.seed_sample_playlists {
        MemoryDb::seeded(generator)
    } else {
        MemoryDb::new(generator)
    };
    if config.simulated_latency {
        db = db.with_latency(SimulatedLatency::enabled());
    }
    Arc::new(db)
}

pub struct MemoryDb {
    batches: RwLock<Vec<Batch>>,
    playlists: RwLock<Vec<Playlist>>,
    generator: Arc<dyn ContentGenerator>,
    latency: SimulatedLatency,
}

impl MemoryDb {
    /// An empty store with latency disabled.
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            batches: RwLock::new(Vec::new()),
            playlists: RwLock::new(Vec::new()),
            generator,
            latency: SimulatedLatency::disabled(),
        }
    }

    /// A store holding the sample playlists.
    pub fn seeded(generator: Arc<dyn ContentGenerator>) -> Self {
        Self::new(generator).with_playlists(seed::sample_playlists())
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_playlists(self, playlists: Vec<Playlist>) -> Self {
        Self {
            playlists: RwLock::new(playlists),
            ..self
        }
    }

    pub fn generator(&self) -> &dyn ContentGenerator {
        self.generator.as_ref()
    }

    pub(crate) fn latency(&self) -> &SimulatedLatency {
        &self.latency
    }

    /// Number of stored batches and playlists.
    pub async fn counts(&self) -> (usize, usize) {
        let batches = self.batches.read().await.len();
        let playlists = self.playlists.read().await.len();
        (batches, playlists)
    }

    // -- batch collection ------------------------------------------------

    pub(crate) async fn insert_batch(&self, batch: Batch) {
        self.batches.write().await.push(batch);
    }

    pub(crate) async fn batch(&self, batch_id: EntityId) -> Option<Batch> {
        self.batches
            .read()
            .await
            .iter()
            .find(|b| b.id == batch_id)
            .cloned()
    }

    pub(crate) async fn all_batches(&self) -> Vec<Batch> {
        self.batches.read().await.clone()
    }

    /// Replace one batch with the value computed by `update`.
    ///
    /// The write lock is held for the whole call, so concurrent updates of
    /// the same batch are serialized. If `update` fails the stored batch is
    /// left as it was.
    pub(crate) async fn update_batch<T>(
        &self,
        batch_id: EntityId,
        update: impl FnOnce(&Batch) -> Result<(Batch, T), CoreError>,
    ) -> Result<T, CoreError> {
        let mut batches = self.batches.write().await;
        let slot = batches
            .iter_mut()
            .find(|b| b.id == batch_id)
            .ok_or_else(|| CoreError::not_found("batch", batch_id))?;
        let (updated, output) = update(slot)?;
        *slot = updated;
        Ok(output)
    }

    // -- playlist collection ---------------------------------------------

    pub(crate) async fn insert_playlist(&self, playlist: Playlist) {
        self.playlists.write().await.push(playlist);
    }

    pub(crate) async fn playlist(&self, playlist_id: EntityId) -> Option<Playlist> {
        self.playlists
            .read()
            .await
            .iter()
            .find(|p| p.id == playlist_id)
            .cloned()
    }

    pub(crate) async fn all_playlists(&self) -> Vec<Playlist> {
        self.playlists.read().await.clone()
    }

    /// Replace several playlists at once. Every id must resolve before any
    /// playlist is written.
    pub(crate) async fn update_playlists(
        &self,
        playlist_ids: &[EntityId],
        update: impl Fn(&Playlist) -> Playlist,
    ) -> Result<Vec<Playlist>, CoreError> {
        let mut playlists = self.playlists.write().await;

        let mut indices = Vec::with_capacity(playlist_ids.len());
        for id in playlist_ids {
            let index = playlists
                .iter()
                .position(|p| p.id == *id)
                .ok_or_else(|| CoreError::not_found("playlist", *id))?;
            if !indices.contains(&index) {
                indices.push(index);
            }
        }

        let updated: Vec<Playlist> = indices.iter().map(|&i| update(&playlists[i])).collect();
        for (&i, playlist) in indices.iter().zip(&updated) {
            playlists[i] = playlist.clone();
        }
        Ok(updated)
    }
}

impl Default for MemoryDb {
    fn default() -> Self {
        Self::new(Arc::new(SnippetGenerator))
    }
}
