//! Batch progress aggregation.
//!
//! Drives the per-stage progress bars and decides which stage entry actions
//! are offered for a batch.

use serde::{Deserialize, Serialize};

use crate::batch::Batch;
use crate::status::{ReviewStatus, Stage, TrackField};
use crate::track::Track;
use crate::workflow::{has_validated_audio, is_fully_validated};

/// Validated counts and integer percentages for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub total: usize,
    pub theme_validated: usize,
    pub style_validated: usize,
    pub lyrics_validated: usize,
    /// Tracks with at least one validated audio version.
    pub audio_validated: usize,
    /// Tracks that passed every stage.
    pub final_tracks: usize,
    pub theme_progress: u8,
    pub style_progress: u8,
    pub lyrics_progress: u8,
    pub audio_progress: u8,
    pub final_progress: u8,
}

impl BatchProgress {
    pub fn compute(batch: &Batch) -> Self {
        Self::from_tracks(&batch.tracks)
    }

    pub fn from_tracks(tracks: &[Track]) -> Self {
        let total = tracks.len();
        let theme_validated =
            count_tracks_with_status(tracks, TrackField::Theme, ReviewStatus::Validated);
        let style_validated =
            count_tracks_with_status(tracks, TrackField::Style, ReviewStatus::Validated);
        let lyrics_validated =
            count_tracks_with_status(tracks, TrackField::Lyrics, ReviewStatus::Validated);
        let audio_validated = count_tracks_with_audio_status(tracks, ReviewStatus::Validated);
        let final_tracks = tracks.iter().filter(|t| is_fully_validated(t)).count();

        Self {
            total,
            theme_validated,
            style_validated,
            lyrics_validated,
            audio_validated,
            final_tracks,
            theme_progress: percentage(theme_validated, total),
            style_progress: percentage(style_validated, total),
            lyrics_progress: percentage(lyrics_validated, total),
            audio_progress: percentage(audio_validated, total),
            final_progress: percentage(final_tracks, total),
        }
    }

    /// Number of tracks validated for `stage`.
    pub fn validated(&self, stage: Stage) -> usize {
        match stage {
            Stage::Theme => self.theme_validated,
            Stage::Style => self.style_validated,
            Stage::Lyrics => self.lyrics_validated,
            Stage::Audio => self.audio_validated,
        }
    }

    pub fn percentage(&self, stage: Stage) -> u8 {
        match stage {
            Stage::Theme => self.theme_progress,
            Stage::Style => self.style_progress,
            Stage::Lyrics => self.lyrics_progress,
            Stage::Audio => self.audio_progress,
        }
    }

    /// Whether the "Validate <stage>" entry action is offered.
    ///
    /// Offered while the stage is incomplete and, for every stage after
    /// theme, once the previous stage has at least one validated track.
    pub fn stage_offered(&self, stage: Stage) -> bool {
        let unlocked = match stage.previous() {
            None => true,
            Some(previous) => self.validated(previous) > 0,
        };
        unlocked && self.validated(stage) < self.total
    }

    /// Stages whose entry action is currently offered, in pipeline order.
    pub fn offered_stages(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.stage_offered(*stage))
            .collect()
    }

    /// At least one track is ready for playlist assignment.
    pub fn has_final_tracks(&self) -> bool {
        self.final_tracks > 0
    }
}

/// `round(count / total * 100)` with halves rounded up. An empty batch
/// reports 0.
pub fn percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * count + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Count tracks whose `field` has the given status.
pub fn count_tracks_with_status(
    tracks: &[Track],
    field: TrackField,
    status: ReviewStatus,
) -> usize {
    tracks.iter().filter(|t| t.status(field) == status).count()
}

/// Count tracks by audio outcome.
///
/// Validated: any candidate validated. Rejected: every candidate rejected.
/// Pending: every candidate still pending.
pub fn count_tracks_with_audio_status(tracks: &[Track], status: ReviewStatus) -> usize {
    tracks
        .iter()
        .filter(|t| match status {
            ReviewStatus::Validated => has_validated_audio(t),
            other => t.audio_versions.iter().all(|av| av.status == other),
        })
        .count()
}
