/// Opaque identifier shared by batches, tracks, audio versions and playlists.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh random identifier.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4()
}
