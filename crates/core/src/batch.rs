//! Batch records and creation rules.
//!
//! A batch is created once from three generation prompts and a requested
//! track count. The prompts and the number of tracks never change afterwards;
//! only the tracks' contents and statuses do.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::generation::{ContentGenerator, GenerationPrompts};
use crate::track::Track;
use crate::types::{new_id, EntityId, Timestamp};

/// Smallest batch that may be requested.
pub const MIN_TRACKS_PER_BATCH: usize = 1;

/// Largest batch that may be requested.
pub const MAX_TRACKS_PER_BATCH: usize = 200;

/// A named collection of tracks generated together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: EntityId,
    pub name: String,
    pub created_at: Timestamp,
    pub prompts: GenerationPrompts,
    pub tracks: Vec<Track>,
}

impl Batch {
    /// Generate a new batch. The input must already have passed
    /// [`validate_new_batch`].
    pub fn generate(input: &NewBatch, generator: &dyn ContentGenerator) -> Self {
        let prompts = input.prompts();
        let tracks = (0..input.track_count)
            .map(|_| Track::generate(generator, &prompts))
            .collect();

        Self {
            id: new_id(),
            name: input.name.trim().to_string(),
            created_at: chrono::Utc::now(),
            prompts,
            tracks,
        }
    }

    pub fn track(&self, track_id: EntityId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    pub fn track_index(&self, track_id: EntityId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }
}

/// Input for creating a batch.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBatch {
    pub name: String,
    pub track_count: usize,
    pub theme_prompt: String,
    pub style_prompt: String,
    pub lyrics_prompt: String,
}

impl NewBatch {
    pub fn prompts(&self) -> GenerationPrompts {
        GenerationPrompts::new(
            self.theme_prompt.trim(),
            self.style_prompt.trim(),
            self.lyrics_prompt.trim(),
        )
    }
}

/// Validate a batch creation request.
///
/// All four text fields are required and the track count must lie in
/// `MIN_TRACKS_PER_BATCH..=MAX_TRACKS_PER_BATCH`.
pub fn validate_new_batch(input: &NewBatch) -> Result<(), CoreError> {
    let required = [
        ("name", &input.name),
        ("theme prompt", &input.theme_prompt),
        ("style prompt", &input.style_prompt),
        ("lyrics prompt", &input.lyrics_prompt),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::InvalidArgument(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        )));
    }

    if !(MIN_TRACKS_PER_BATCH..=MAX_TRACKS_PER_BATCH).contains(&input.track_count) {
        return Err(CoreError::InvalidArgument(format!(
            "Track count must be between {MIN_TRACKS_PER_BATCH} and {MAX_TRACKS_PER_BATCH}, got {}",
            input.track_count
        )));
    }

    Ok(())
}
