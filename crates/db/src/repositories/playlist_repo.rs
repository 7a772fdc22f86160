//! Repository for playlists.

use trackgate_core::error::CoreError;
use trackgate_core::playlist::{validate_new_playlist, validate_selection, NewPlaylist, Playlist};
use trackgate_core::track::Track;
use trackgate_core::types::EntityId;
use trackgate_core::workflow::is_fully_validated;

use crate::latency::Operation;
use crate::repositories::TrackRepo;
use crate::MemoryDb;

/// CRUD and track assignment for playlists.
pub struct PlaylistRepo;

impl PlaylistRepo {
    pub async fn create(db: &MemoryDb, input: &NewPlaylist) -> Result<Playlist, CoreError> {
        validate_new_playlist(input)?;
        db.latency().pause(Operation::CreatePlaylist).await;

        let playlist = Playlist::create(input);
        db.insert_playlist(playlist.clone()).await;

        tracing::info!(playlist_id = %playlist.id, name = %playlist.name, "Playlist created");
        Ok(playlist)
    }

    pub async fn find_by_id(db: &MemoryDb, id: EntityId) -> Option<Playlist> {
        db.latency().pause(Operation::GetPlaylist).await;
        db.playlist(id).await
    }

    /// Fetch a playlist, failing with `NotFound` when it does not exist.
    pub async fn get(db: &MemoryDb, id: EntityId) -> Result<Playlist, CoreError> {
        Self::find_by_id(db, id)
            .await
            .ok_or_else(|| CoreError::not_found("playlist", id))
    }

    /// All playlists in creation order.
    pub async fn list(db: &MemoryDb) -> Vec<Playlist> {
        db.latency().pause(Operation::ListPlaylists).await;
        db.all_playlists().await
    }

    /// Add track references with set-union semantics.
    pub async fn add_tracks(
        db: &MemoryDb,
        playlist_id: EntityId,
        track_ids: &[EntityId],
    ) -> Result<Playlist, CoreError> {
        db.latency().pause(Operation::AddTracks).await;

        let mut updated = db
            .update_playlists(&[playlist_id], |p| p.with_tracks(track_ids))
            .await?;

        tracing::info!(
            playlist_id = %playlist_id,
            added = track_ids.len(),
            "Tracks added to playlist"
        );
        updated
            .pop()
            .ok_or_else(|| CoreError::Internal("playlist update returned nothing".to_string()))
    }

    /// Remove one track reference. Removing an absent track is a no-op.
    pub async fn remove_track(
        db: &MemoryDb,
        playlist_id: EntityId,
        track_id: EntityId,
    ) -> Result<Playlist, CoreError> {
        db.latency().pause(Operation::RemoveTrack).await;

        let mut updated = db
            .update_playlists(&[playlist_id], |p| p.without_track(track_id))
            .await?;

        tracing::info!(
            playlist_id = %playlist_id,
            track_id = %track_id,
            "Track removed from playlist"
        );
        updated
            .pop()
            .ok_or_else(|| CoreError::Internal("playlist update returned nothing".to_string()))
    }

    /// Add the same selection of tracks to several playlists.
    ///
    /// Both selections must be non-empty, every track must exist and be
    /// fully validated, and every playlist must exist. Nothing is written
    /// unless all checks pass.
    ///
    /// Track eligibility is read before the playlist write lock is taken, so
    /// the two steps are not atomic with respect to track updates. Callers
    /// issue one operation at a time; a caller that regenerates tracks while
    /// an assignment is in flight may see a track that just lost its final
    /// status added to the playlists.
    pub async fn assign_tracks(
        db: &MemoryDb,
        track_ids: &[EntityId],
        playlist_ids: &[EntityId],
    ) -> Result<Vec<Playlist>, CoreError> {
        validate_selection(track_ids, playlist_ids)?;

        let tracks = TrackRepo::find_by_ids(db, track_ids).await;
        for id in track_ids {
            let track = tracks
                .iter()
                .find(|t| t.id == *id)
                .ok_or_else(|| CoreError::not_found("track", *id))?;
            if !is_fully_validated(track) {
                return Err(CoreError::PreconditionFailed(format!(
                    "Track {id} is not fully validated and cannot join a playlist"
                )));
            }
        }

        db.latency().pause(Operation::AddTracks).await;
        let updated = db
            .update_playlists(playlist_ids, |p| p.with_tracks(track_ids))
            .await?;

        tracing::info!(
            tracks = track_ids.len(),
            playlists = updated.len(),
            "Tracks assigned to playlists"
        );
        Ok(updated)
    }

    /// Resolve a playlist's references to tracks, in playlist order.
    /// References that no longer resolve are skipped.
    pub async fn tracks_for_playlist(
        db: &MemoryDb,
        playlist_id: EntityId,
    ) -> Result<Vec<Track>, CoreError> {
        let playlist = Self::get(db, playlist_id).await?;
        let found = TrackRepo::find_by_ids(db, &playlist.track_ids).await;

        Ok(playlist
            .track_ids
            .iter()
            .filter_map(|id| found.iter().find(|t| t.id == *id).cloned())
            .collect())
    }
}
