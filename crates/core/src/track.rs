//! Track and audio version records.

use serde::{Deserialize, Serialize};

use crate::generation::{ContentGenerator, GenerationPrompts};
use crate::status::{ReviewStatus, TrackField};
use crate::types::{new_id, EntityId};

/// Number of audio candidates rendered together for every track.
pub const AUDIO_VERSIONS_PER_TRACK: usize = 2;

/// One candidate rendering of a track's audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioVersion {
    pub id: EntityId,
    pub url: String,
    pub status: ReviewStatus,
}

impl AudioVersion {
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            url: url.into(),
            status: ReviewStatus::Pending,
        }
    }
}

/// Per-field review status, addressed by [`TrackField`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStatuses {
    pub theme: ReviewStatus,
    pub style: ReviewStatus,
    pub lyrics: ReviewStatus,
}

impl FieldStatuses {
    pub fn get(&self, field: TrackField) -> ReviewStatus {
        match field {
            TrackField::Theme => self.theme,
            TrackField::Style => self.style,
            TrackField::Lyrics => self.lyrics,
        }
    }

    pub fn set(&mut self, field: TrackField, status: ReviewStatus) {
        let slot = match field {
            TrackField::Theme => &mut self.theme,
            TrackField::Style => &mut self.style,
            TrackField::Lyrics => &mut self.lyrics,
        };
        *slot = status;
    }

    /// True when every text field is validated.
    pub fn all_validated(&self) -> bool {
        TrackField::ALL
            .into_iter()
            .all(|field| self.get(field).is_validated())
    }
}

/// A unit of generated content moving through the review pipeline.
///
/// Invariant: at most one entry of `audio_versions` is validated, and
/// `final_audio_url` holds that entry's url when one is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: EntityId,
    pub theme: String,
    pub style: String,
    pub lyrics: String,
    pub statuses: FieldStatuses,
    pub audio_versions: Vec<AudioVersion>,
    pub final_audio_url: Option<String>,
}

impl Track {
    /// Generate a fresh track with every field pending and a new pair of
    /// audio candidates.
    pub fn generate(generator: &dyn ContentGenerator, prompts: &GenerationPrompts) -> Self {
        Self {
            id: new_id(),
            theme: generator.theme(&prompts.theme),
            style: generator.initial_style(&prompts.style),
            lyrics: generator.lyrics(&prompts.lyrics),
            statuses: FieldStatuses::default(),
            audio_versions: audio_pair(generator),
            final_audio_url: None,
        }
    }

    pub fn status(&self, field: TrackField) -> ReviewStatus {
        self.statuses.get(field)
    }

    pub fn content(&self, field: TrackField) -> &str {
        match field {
            TrackField::Theme => &self.theme,
            TrackField::Style => &self.style,
            TrackField::Lyrics => &self.lyrics,
        }
    }

    pub(crate) fn set_content(&mut self, field: TrackField, content: String) {
        match field {
            TrackField::Theme => self.theme = content,
            TrackField::Style => self.style = content,
            TrackField::Lyrics => self.lyrics = content,
        }
    }

    pub fn audio_version(&self, audio_id: EntityId) -> Option<&AudioVersion> {
        self.audio_versions.iter().find(|av| av.id == audio_id)
    }

    /// The validated audio candidate, if any.
    pub fn validated_audio(&self) -> Option<&AudioVersion> {
        self.audio_versions
            .iter()
            .find(|av| av.status.is_validated())
    }
}

/// Render a new pair of pending audio candidates.
pub fn audio_pair(generator: &dyn ContentGenerator) -> Vec<AudioVersion> {
    (0..AUDIO_VERSIONS_PER_TRACK)
        .map(|_| AudioVersion::pending(generator.audio_url()))
        .collect()
}
