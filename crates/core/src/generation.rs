//! Content generation port.
//!
//! Producing theme, style, lyrics and audio is delegated to an external
//! generator. The workflow engine only needs some text derived from the
//! batch prompt and a locator for each rendered audio candidate.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The three generation prompts a batch was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPrompts {
    pub theme: String,
    pub style: String,
    pub lyrics: String,
}

impl GenerationPrompts {
    pub fn new(
        theme: impl Into<String>,
        style: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        Self {
            theme: theme.into(),
            style: style.into(),
            lyrics: lyrics.into(),
        }
    }
}

/// Produces new content for a track.
///
/// Implementations must be cheap to call repeatedly; bulk regeneration calls
/// them once per affected track.
pub trait ContentGenerator: Send + Sync {
    fn theme(&self, prompt: &str) -> String;
    /// Style for a freshly generated track. Defaults to [`Self::style`].
    fn initial_style(&self, prompt: &str) -> String {
        self.style(prompt)
    }
    /// Style for a regenerated track.
    fn style(&self, prompt: &str) -> String;
    fn lyrics(&self, prompt: &str) -> String;
    /// Locator of a freshly rendered audio candidate.
    fn audio_url(&self) -> String;
}

// ---------------------------------------------------------------------------
// SnippetGenerator
// ---------------------------------------------------------------------------

/// Sample audio locators handed out by [`SnippetGenerator`].
pub const SAMPLE_AUDIO_URLS: &[&str] = &[
    "https://actions.google.com/sounds/v1/alarms/digital_watch_alarm_long.ogg",
    "https://actions.google.com/sounds/v1/alarms/alarm_clock.ogg",
    "https://actions.google.com/sounds/v1/alarms/beep_short.ogg",
    "https://actions.google.com/sounds/v1/ambiences/machine_hum.ogg",
    "https://actions.google.com/sounds/v1/ambiences/piano_background.ogg",
];

/// Lyric lines stitched together by [`SnippetGenerator`].
pub const LYRIC_SNIPPETS: &[&str] = &[
    "In the shadows of tomorrow, we find our light today",
    "Dancing through the memories of what could have been",
    "The rhythm of your heartbeat guides me home",
    "Lost in the echo of forgotten dreams",
    "When stars align and worlds collide, we'll find our way",
    "Through stormy seas and desert sands, I'll search for you",
    "Chasing whispers in the wind, seeking truths untold",
    "The melody of life plays on in endless harmony",
    "Breaking chains that bind us to the past",
    "In the silence between notes, your voice still resonates",
];

/// Number of lyric lines in a generated verse.
pub const LYRIC_LINES_PER_VERSE: usize = 3;

/// Stand-in generator that assembles content from canned snippets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnippetGenerator;

impl SnippetGenerator {
    fn snippet() -> &'static str {
        LYRIC_SNIPPETS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or_default()
    }
}

impl ContentGenerator for SnippetGenerator {
    fn theme(&self, prompt: &str) -> String {
        format!("{prompt} - {}", Self::snippet())
    }

    fn initial_style(&self, prompt: &str) -> String {
        format!("{prompt} with modern production elements")
    }

    fn style(&self, prompt: &str) -> String {
        let flavour = if rand::rng().random_bool(0.5) {
            "classic"
        } else {
            "innovative"
        };
        format!("{prompt} with {flavour} elements")
    }

    fn lyrics(&self, _prompt: &str) -> String {
        let lines: Vec<&str> = (0..LYRIC_LINES_PER_VERSE)
            .map(|_| Self::snippet())
            .collect();
        format!("\"{}\"", lines.join("\n"))
    }

    fn audio_url(&self) -> String {
        SAMPLE_AUDIO_URLS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_is_derived_from_prompt() {
        let theme = SnippetGenerator.theme("Hope");
        assert!(theme.starts_with("Hope - "));
        let snippet = theme.trim_start_matches("Hope - ");
        assert!(LYRIC_SNIPPETS.contains(&snippet));
    }

    #[test]
    fn style_mentions_prompt() {
        assert_eq!(
            SnippetGenerator.initial_style("Pop"),
            "Pop with modern production elements"
        );
        let style = SnippetGenerator.style("Pop");
        assert!(style == "Pop with classic elements" || style == "Pop with innovative elements");
    }

    #[test]
    fn lyrics_have_three_quoted_lines() {
        let lyrics = SnippetGenerator.lyrics("Direct");
        assert!(lyrics.starts_with('"') && lyrics.ends_with('"'));
        assert_eq!(lyrics.lines().count(), LYRIC_LINES_PER_VERSE);
    }

    #[test]
    fn audio_url_comes_from_samples() {
        let url = SnippetGenerator.audio_url();
        assert!(SAMPLE_AUDIO_URLS.contains(&url.as_str()));
    }
}
