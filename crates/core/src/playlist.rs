//! Playlists: user-curated, cross-batch collections of track references.
//!
//! A playlist holds track ids only. It does not own the tracks it points at,
//! and the prompts it carries are provenance metadata with no enforcement.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{new_id, EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub theme_prompt: Option<String>,
    pub style_prompt: Option<String>,
    pub lyrics_prompt: Option<String>,
    /// Referenced tracks in insertion order, without duplicates.
    pub track_ids: Vec<EntityId>,
}

/// Input for creating a playlist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    pub theme_prompt: Option<String>,
    pub style_prompt: Option<String>,
    pub lyrics_prompt: Option<String>,
}

impl NewPlaylist {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_prompts(
        mut self,
        theme: impl Into<String>,
        style: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        self.theme_prompt = Some(theme.into());
        self.style_prompt = Some(style.into());
        self.lyrics_prompt = Some(lyrics.into());
        self
    }
}

impl Playlist {
    /// Build an empty playlist. The input must already have passed
    /// [`validate_new_playlist`].
    pub fn create(input: &NewPlaylist) -> Self {
        Self {
            id: new_id(),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            created_at: chrono::Utc::now(),
            theme_prompt: non_blank(&input.theme_prompt),
            style_prompt: non_blank(&input.style_prompt),
            lyrics_prompt: non_blank(&input.lyrics_prompt),
            track_ids: Vec::new(),
        }
    }

    /// Set union with `track_ids`, keeping existing order and appending new
    /// ids in the order given.
    pub fn with_tracks(&self, track_ids: &[EntityId]) -> Self {
        let mut updated = self.clone();
        for id in track_ids {
            if !updated.track_ids.contains(id) {
                updated.track_ids.push(*id);
            }
        }
        updated
    }

    /// Drop every reference to `track_id`. Removing an absent id is a no-op.
    pub fn without_track(&self, track_id: EntityId) -> Self {
        let mut updated = self.clone();
        updated.track_ids.retain(|id| *id != track_id);
        updated
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Validate a playlist creation request. Only the name is required.
pub fn validate_new_playlist(input: &NewPlaylist) -> Result<(), CoreError> {
    if input.name.trim().is_empty() {
        return Err(CoreError::InvalidArgument(
            "Please enter a playlist name".to_string(),
        ));
    }
    Ok(())
}

/// Validate a track-to-playlist assignment. Both selections must be
/// non-empty.
pub fn validate_selection(
    track_ids: &[EntityId],
    playlist_ids: &[EntityId],
) -> Result<(), CoreError> {
    if track_ids.is_empty() {
        return Err(CoreError::InvalidArgument(
            "Please select at least one track".to_string(),
        ));
    }
    if playlist_ids.is_empty() {
        return Err(CoreError::InvalidArgument(
            "Please select at least one playlist".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn playlist() -> Playlist {
        Playlist::create(&NewPlaylist::new("Summer Vibes", "Upbeat tracks"))
    }

    #[test]
    fn create_starts_empty() {
        let p = playlist();
        assert_eq!(p.name, "Summer Vibes");
        assert!(p.track_ids.is_empty());
        assert!(p.theme_prompt.is_none());
    }

    #[test]
    fn blank_prompts_are_dropped() {
        let input = NewPlaylist::new("Chill", "").with_prompts("Nature", "  ", "Abstract");
        let p = Playlist::create(&input);
        assert_eq!(p.theme_prompt.as_deref(), Some("Nature"));
        assert_eq!(p.style_prompt, None);
        assert_eq!(p.lyrics_prompt.as_deref(), Some("Abstract"));
    }

    #[test]
    fn with_tracks_is_a_set_union() {
        let (a, b, c) = (new_id(), new_id(), new_id());
        let p = playlist().with_tracks(&[a, b]);
        let p = p.with_tracks(&[b, c, c]);
        assert_eq!(p.track_ids, vec![a, b, c]);
    }

    #[test]
    fn without_track_removes_reference() {
        let (a, b) = (new_id(), new_id());
        let p = playlist().with_tracks(&[a, b]).without_track(a);
        assert_eq!(p.track_ids, vec![b]);
        assert_eq!(p.without_track(new_id()).track_ids, vec![b]);
    }

    #[test]
    fn name_is_required() {
        let input = NewPlaylist::new(" ", "desc");
        assert_matches!(validate_new_playlist(&input), Err(CoreError::InvalidArgument(_)));
        assert!(validate_new_playlist(&NewPlaylist::new("Mix", "")).is_ok());
    }

    #[test]
    fn empty_selections_rejected() {
        let id = new_id();
        let err = validate_selection(&[], &[id]).unwrap_err();
        assert!(err.to_string().contains("at least one track"));
        let err = validate_selection(&[id], &[]).unwrap_err();
        assert!(err.to_string().contains("at least one playlist"));
        assert!(validate_selection(&[id], &[id]).is_ok());
    }
}
