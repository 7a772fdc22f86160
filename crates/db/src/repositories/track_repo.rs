//! Repository for tracks.
//!
//! Tracks are owned by their batch, so every write goes through
//! [`MemoryDb::update_batch`] and replaces the whole batch value.

use trackgate_core::batch::Batch;
use trackgate_core::error::CoreError;
use trackgate_core::status::{Decision, ReviewStatus, Stage, TrackField};
use trackgate_core::track::Track;
use trackgate_core::types::EntityId;
use trackgate_core::workflow;

use crate::latency::Operation;
use crate::MemoryDb;

/// Review transitions and lookups for tracks.
pub struct TrackRepo;

/// Replace one track of `batch` with the result of `update`.
fn update_track(
    batch: &Batch,
    track_id: EntityId,
    update: impl FnOnce(&Track) -> Result<Track, CoreError>,
) -> Result<(Batch, Track), CoreError> {
    let index = batch
        .track_index(track_id)
        .ok_or_else(|| CoreError::not_found("track", track_id))?;
    let track = update(&batch.tracks[index])?;

    let mut updated = batch.clone();
    updated.tracks[index] = track.clone();
    Ok((updated, track))
}

/// Swap the full track list of `batch`.
fn with_tracks(batch: &Batch, tracks: Vec<Track>) -> (Batch, Vec<Track>) {
    let mut updated = batch.clone();
    updated.tracks = tracks.clone();
    (updated, tracks)
}

impl TrackRepo {
    // ── Single-track transitions ─────────────────────────────────────

    /// Record a reviewer decision on one text field.
    ///
    /// `status` must be validated or rejected.
    pub async fn update_field_status(
        db: &MemoryDb,
        batch_id: EntityId,
        track_id: EntityId,
        field: TrackField,
        status: ReviewStatus,
    ) -> Result<Track, CoreError> {
        let decision = Decision::try_from(status)?;
        db.latency().pause(Operation::UpdateTrackField).await;

        let track = db
            .update_batch(batch_id, |batch| {
                update_track(batch, track_id, |track| {
                    Ok(workflow::set_field_status(track, field, decision.into()))
                })
            })
            .await?;

        tracing::info!(
            batch_id = %batch_id,
            track_id = %track_id,
            field = %field,
            status = %status,
            "Track field reviewed"
        );
        Ok(track)
    }

    /// Regenerate one stage of a track from the batch prompts.
    pub async fn regenerate(
        db: &MemoryDb,
        batch_id: EntityId,
        track_id: EntityId,
        stage: Stage,
    ) -> Result<Track, CoreError> {
        db.latency().pause(Operation::RegenerateTrack).await;

        let generator = db.generator();
        let track = db
            .update_batch(batch_id, |batch| {
                let prompts = batch.prompts.clone();
                update_track(batch, track_id, |track| {
                    Ok(workflow::regenerate_stage(track, stage, &prompts, generator))
                })
            })
            .await?;

        tracing::info!(
            batch_id = %batch_id,
            track_id = %track_id,
            stage = %stage,
            "Track regenerated"
        );
        Ok(track)
    }

    /// Validate one audio candidate and reject its siblings.
    pub async fn validate_audio_version(
        db: &MemoryDb,
        batch_id: EntityId,
        track_id: EntityId,
        audio_id: EntityId,
    ) -> Result<Track, CoreError> {
        db.latency().pause(Operation::AudioDecision).await;

        let track = db
            .update_batch(batch_id, |batch| {
                update_track(batch, track_id, |track| {
                    workflow::validate_audio_version(track, audio_id)
                })
            })
            .await?;

        tracing::info!(
            batch_id = %batch_id,
            track_id = %track_id,
            audio_id = %audio_id,
            "Audio version validated"
        );
        Ok(track)
    }

    /// Reject one audio candidate.
    pub async fn reject_audio_version(
        db: &MemoryDb,
        batch_id: EntityId,
        track_id: EntityId,
        audio_id: EntityId,
    ) -> Result<Track, CoreError> {
        db.latency().pause(Operation::AudioDecision).await;

        let track = db
            .update_batch(batch_id, |batch| {
                update_track(batch, track_id, |track| {
                    workflow::reject_audio_version(track, audio_id)
                })
            })
            .await?;

        tracing::info!(
            batch_id = %batch_id,
            track_id = %track_id,
            audio_id = %audio_id,
            all_rejected = workflow::are_all_audio_rejected(&track),
            "Audio version rejected"
        );
        Ok(track)
    }

    // ── Bulk transitions ─────────────────────────────────────────────

    /// Regenerate `stage` for every relevant, not yet validated track.
    ///
    /// Returns the full track list of the batch after the update.
    pub async fn regenerate_all(
        db: &MemoryDb,
        batch_id: EntityId,
        stage: Stage,
    ) -> Result<Vec<Track>, CoreError> {
        db.latency().pause(Operation::RegenerateAll).await;

        let generator = db.generator();
        let tracks = db
            .update_batch(batch_id, |batch| {
                let tracks = workflow::regenerate_all_non_validated(batch, stage, generator);
                Ok(with_tracks(batch, tracks))
            })
            .await?;

        tracing::info!(batch_id = %batch_id, stage = %stage, "Non-validated tracks regenerated");
        Ok(tracks)
    }

    /// Validate `field` on every pending relevant track.
    ///
    /// Fails with `PreconditionFailed` while any track of the batch has the
    /// field rejected. Returns the full track list of the batch after the update.
    pub async fn validate_all(
        db: &MemoryDb,
        batch_id: EntityId,
        field: TrackField,
    ) -> Result<Vec<Track>, CoreError> {
        db.latency().pause(Operation::ValidateAll).await;

        let tracks = db
            .update_batch(batch_id, |batch| {
                workflow::ensure_no_rejections(batch, field)?;
                let tracks = workflow::validate_all_pending(batch, field);
                Ok(with_tracks(batch, tracks))
            })
            .await?;

        tracing::info!(batch_id = %batch_id, field = %field, "Pending tracks validated");
        Ok(tracks)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    /// Tracks of a batch that may be acted on for `stage`.
    pub async fn list_relevant(
        db: &MemoryDb,
        batch_id: EntityId,
        stage: Stage,
    ) -> Result<Vec<Track>, CoreError> {
        db.latency().pause(Operation::GetBatch).await;
        let batch = db
            .batch(batch_id)
            .await
            .ok_or_else(|| CoreError::not_found("batch", batch_id))?;
        Ok(workflow::relevant_tracks_for_stage(&batch, stage)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Fully validated tracks of a batch, eligible for playlists.
    pub async fn list_final_tracks(
        db: &MemoryDb,
        batch_id: EntityId,
    ) -> Result<Vec<Track>, CoreError> {
        db.latency().pause(Operation::GetBatch).await;
        let batch = db
            .batch(batch_id)
            .await
            .ok_or_else(|| CoreError::not_found("batch", batch_id))?;
        Ok(workflow::fully_validated_tracks(&batch)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Tracks matching `ids`, searched across every batch. Unknown ids are
    /// skipped; results follow batch and track order.
    pub async fn find_by_ids(db: &MemoryDb, ids: &[EntityId]) -> Vec<Track> {
        db.latency().pause(Operation::GetTracks).await;
        db.all_batches()
            .await
            .into_iter()
            .flat_map(|batch| batch.tracks)
            .filter(|track| ids.contains(&track.id))
            .collect()
    }
}
