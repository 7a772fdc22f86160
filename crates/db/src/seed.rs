//! Sample data loaded into a fresh store.

use trackgate_core::playlist::{NewPlaylist, Playlist};

/// The three starter playlists offered before any batch exists.
pub fn sample_playlists() -> Vec<Playlist> {
    [
        NewPlaylist::new("Summer Vibes", "Upbeat tracks perfect for summer parties")
            .with_prompts("Adventure and Journey", "Pop", "Emotional"),
        NewPlaylist::new("Chill Session", "Relaxed beats for focus and meditation")
            .with_prompts("Nature and Environment", "Electronic", "Abstract"),
        NewPlaylist::new("Workout Mix", "High energy tracks to keep you motivated")
            .with_prompts("Hope and Inspiration", "Hip-Hop", "Direct"),
    ]
    .iter()
    .map(Playlist::create)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_playlists_are_empty_and_named() {
        let playlists = sample_playlists();
        let names: Vec<_> = playlists.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Summer Vibes", "Chill Session", "Workout Mix"]);
        assert!(playlists.iter().all(|p| p.track_ids.is_empty()));
        assert!(playlists.iter().all(|p| p.style_prompt.is_some()));
    }
}
