//! Validation workflow engine.
//!
//! Pure functions over [`Track`] and [`Batch`] values. Every operation takes
//! its input by reference and returns a new value, so a failed call never
//! leaves a half-updated record behind.
//!
//! Gating order is theme -> style -> lyrics -> audio. A track is only acted
//! on for a stage once every earlier stage is validated for it.

use crate::batch::Batch;
use crate::error::CoreError;
use crate::generation::{ContentGenerator, GenerationPrompts};
use crate::status::{ReviewStatus, Stage, TrackField};
use crate::track::{audio_pair, Track};
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Theme, style and lyrics are all validated. Sole admission gate into audio
/// review.
pub fn is_ready_for_audio(track: &Track) -> bool {
    track.statuses.all_validated()
}

pub fn has_validated_audio(track: &Track) -> bool {
    track.validated_audio().is_some()
}

/// Ready for audio and one audio candidate is validated. Gate for playlist
/// eligibility and the final player.
pub fn is_fully_validated(track: &Track) -> bool {
    is_ready_for_audio(track) && has_validated_audio(track)
}

/// Every audio candidate was rejected, which makes the track eligible for
/// audio regeneration.
pub fn are_all_audio_rejected(track: &Track) -> bool {
    track
        .audio_versions
        .iter()
        .all(|av| av.status == ReviewStatus::Rejected)
}

/// Whether `track` has cleared every stage before `stage`.
pub fn is_stage_unlocked(track: &Track, stage: Stage) -> bool {
    match stage {
        Stage::Theme => true,
        Stage::Style => track.status(TrackField::Theme).is_validated(),
        Stage::Lyrics => {
            track.status(TrackField::Theme).is_validated()
                && track.status(TrackField::Style).is_validated()
        }
        Stage::Audio => is_ready_for_audio(track),
    }
}

/// Whether `track` is done with `stage`.
pub fn is_stage_validated(track: &Track, stage: Stage) -> bool {
    match stage.field() {
        Some(field) => track.status(field).is_validated(),
        None => has_validated_audio(track),
    }
}

/// Fail with `PreconditionFailed` unless the track may enter audio review.
pub fn ensure_ready_for_audio(track: &Track) -> Result<(), CoreError> {
    if is_ready_for_audio(track) {
        Ok(())
    } else {
        Err(CoreError::PreconditionFailed(format!(
            "Track {} is not ready for audio review: theme, style and lyrics must be validated",
            track.id
        )))
    }
}

// ---------------------------------------------------------------------------
// Single-track transitions
// ---------------------------------------------------------------------------

/// Set the review status of one text field. Other fields are untouched.
///
/// Prerequisite stages are not re-checked here; callers gate on
/// [`is_stage_unlocked`] before offering the action.
pub fn set_field_status(track: &Track, field: TrackField, status: ReviewStatus) -> Track {
    let mut updated = track.clone();
    updated.statuses.set(field, status);
    updated
}

/// Replace one text field with newly generated content and reset it to
/// pending.
pub fn regenerate_field(
    track: &Track,
    field: TrackField,
    prompt: &str,
    generator: &dyn ContentGenerator,
) -> Track {
    let content = match field {
        TrackField::Theme => generator.theme(prompt),
        TrackField::Style => generator.style(prompt),
        TrackField::Lyrics => generator.lyrics(prompt),
    };

    let mut updated = track.clone();
    updated.set_content(field, content);
    updated.statuses.set(field, ReviewStatus::Pending);
    updated
}

/// Discard every audio candidate and render a new pending pair.
pub fn regenerate_audio(track: &Track, generator: &dyn ContentGenerator) -> Track {
    let mut updated = track.clone();
    updated.audio_versions = audio_pair(generator);
    updated.final_audio_url = None;
    updated
}

/// Regenerate whatever `stage` reviews: a text field or the audio pair.
pub fn regenerate_stage(
    track: &Track,
    stage: Stage,
    prompts: &GenerationPrompts,
    generator: &dyn ContentGenerator,
) -> Track {
    match stage {
        Stage::Theme => regenerate_field(track, TrackField::Theme, &prompts.theme, generator),
        Stage::Style => regenerate_field(track, TrackField::Style, &prompts.style, generator),
        Stage::Lyrics => regenerate_field(track, TrackField::Lyrics, &prompts.lyrics, generator),
        Stage::Audio => regenerate_audio(track, generator),
    }
}

/// Validate one audio candidate and reject all of its siblings.
///
/// Sets `final_audio_url` to the chosen candidate's url.
pub fn validate_audio_version(track: &Track, audio_id: EntityId) -> Result<Track, CoreError> {
    ensure_ready_for_audio(track)?;
    let url = track
        .audio_version(audio_id)
        .map(|av| av.url.clone())
        .ok_or_else(|| CoreError::not_found("audio version", audio_id))?;

    let mut updated = track.clone();
    for av in &mut updated.audio_versions {
        av.status = if av.id == audio_id {
            ReviewStatus::Validated
        } else {
            ReviewStatus::Rejected
        };
    }
    updated.final_audio_url = Some(url);
    Ok(updated)
}

/// Reject one audio candidate. Siblings and `final_audio_url` are untouched.
pub fn reject_audio_version(track: &Track, audio_id: EntityId) -> Result<Track, CoreError> {
    ensure_ready_for_audio(track)?;

    let mut updated = track.clone();
    let av = updated
        .audio_versions
        .iter_mut()
        .find(|av| av.id == audio_id)
        .ok_or_else(|| CoreError::not_found("audio version", audio_id))?;
    av.status = ReviewStatus::Rejected;
    Ok(updated)
}

// ---------------------------------------------------------------------------
// Batch-level rules
// ---------------------------------------------------------------------------

/// Tracks of `batch` that may be acted on for `stage`.
///
/// Theme selects every track; each later stage additionally requires the
/// previous stages to be validated.
pub fn relevant_tracks_for_stage(batch: &Batch, stage: Stage) -> Vec<&Track> {
    batch
        .tracks
        .iter()
        .filter(|t| is_stage_unlocked(t, stage))
        .collect()
}

/// [`relevant_tracks_for_stage`] for a text field.
pub fn relevant_tracks_for_field(batch: &Batch, field: TrackField) -> Vec<&Track> {
    relevant_tracks_for_stage(batch, field.stage())
}

/// Tracks that passed every stage, in batch order.
pub fn fully_validated_tracks(batch: &Batch) -> Vec<&Track> {
    batch
        .tracks
        .iter()
        .filter(|t| is_fully_validated(t))
        .collect()
}

/// Fail with `PreconditionFailed` if any track of the batch has `field`
/// rejected.
///
/// Every track counts, relevant or not: bulk validation is only offered once
/// each rejection for the field has been regenerated away.
pub fn ensure_no_rejections(batch: &Batch, field: TrackField) -> Result<(), CoreError> {
    let rejected = batch
        .tracks
        .iter()
        .filter(|t| t.status(field) == ReviewStatus::Rejected)
        .count();

    if rejected == 0 {
        Ok(())
    } else {
        Err(CoreError::PreconditionFailed(format!(
            "Cannot validate all {field} fields: {rejected} track(s) have a rejected {field}"
        )))
    }
}

/// Validate `field` on every pending relevant track.
///
/// Only tracks whose earlier stages are validated are touched; already
/// validated or rejected fields keep their status. Returns the full, updated
/// track list of the batch.
pub fn validate_all_pending(batch: &Batch, field: TrackField) -> Vec<Track> {
    let stage = field.stage();
    batch
        .tracks
        .iter()
        .map(|track| {
            if is_stage_unlocked(track, stage) && track.status(field) == ReviewStatus::Pending {
                set_field_status(track, field, ReviewStatus::Validated)
            } else {
                track.clone()
            }
        })
        .collect()
}

/// Regenerate `stage` for every relevant track that is not validated for it.
///
/// For audio, "not validated" means no audio candidate is validated. Tracks
/// outside the relevant set are returned unchanged. Returns the full, updated
/// track list of the batch.
pub fn regenerate_all_non_validated(
    batch: &Batch,
    stage: Stage,
    generator: &dyn ContentGenerator,
) -> Vec<Track> {
    batch
        .tracks
        .iter()
        .map(|track| {
            if is_stage_unlocked(track, stage) && !is_stage_validated(track, stage) {
                regenerate_stage(track, stage, &batch.prompts, generator)
            } else {
                track.clone()
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
