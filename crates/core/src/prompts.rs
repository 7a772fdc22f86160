//! Built-in generation prompt catalog.
//!
//! Reviewers pick one theme, one style and one lyrics prompt when creating a
//! batch. Free-form prompts are accepted too; the catalog is a starting point.

use serde::Serialize;

use crate::status::TrackField;

/// A predefined prompt for one generation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub id: &'static str,
    pub category: TrackField,
    pub title: &'static str,
    pub description: &'static str,
}

const fn prompt(
    id: &'static str,
    category: TrackField,
    title: &'static str,
    description: &'static str,
) -> Prompt {
    Prompt {
        id,
        category,
        title,
        description,
    }
}

#[rustfmt::skip]
pub const PROMPT_CATALOG: &[Prompt] = &[
    prompt("theme-1", TrackField::Theme, "Love and Romance", "Songs about falling in love, heartbreak, and romantic relationships."),
    prompt("theme-2", TrackField::Theme, "Adventure and Journey", "Songs about exploration, travel, and personal growth."),
    prompt("theme-3", TrackField::Theme, "Hope and Inspiration", "Uplifting songs about overcoming challenges and finding hope."),
    prompt("theme-4", TrackField::Theme, "Social Commentary", "Songs that reflect on society, culture, and current events."),
    prompt("theme-5", TrackField::Theme, "Nature and Environment", "Songs celebrating the natural world and environmental awareness."),
    prompt("style-1", TrackField::Style, "Pop", "Catchy, commercial, mainstream sound with hooks and repetitive structures."),
    prompt("style-2", TrackField::Style, "Rock", "Guitar-driven with strong drums and powerful vocals."),
    prompt("style-3", TrackField::Style, "Hip-Hop", "Rhythm-focused with rap vocals, beats, and samples."),
    prompt("style-4", TrackField::Style, "Electronic", "Synthesizer-based with digital production and dance beats."),
    prompt("style-5", TrackField::Style, "Folk", "Acoustic instruments with storytelling lyrics and traditional elements."),
    prompt("lyrics-1", TrackField::Lyrics, "Narrative", "Tells a story with characters, plot, and resolution."),
    prompt("lyrics-2", TrackField::Lyrics, "Emotional", "Focuses on expressing feelings and personal experiences."),
    prompt("lyrics-3", TrackField::Lyrics, "Symbolic", "Uses metaphors and imagery to convey deeper meanings."),
    prompt("lyrics-4", TrackField::Lyrics, "Direct", "Straightforward messaging with clear intentions."),
    prompt("lyrics-5", TrackField::Lyrics, "Abstract", "Open to interpretation with poetic and non-linear elements."),
];

pub fn prompts_by_category(category: TrackField) -> Vec<&'static Prompt> {
    PROMPT_CATALOG
        .iter()
        .filter(|p| p.category == category)
        .collect()
}

pub fn prompt_by_id(id: &str) -> Option<&'static Prompt> {
    PROMPT_CATALOG.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_prompts_per_category() {
        for field in TrackField::ALL {
            let prompts = prompts_by_category(field);
            assert_eq!(prompts.len(), 5);
            assert!(prompts.iter().all(|p| p.id.starts_with(field.as_str())));
        }
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = PROMPT_CATALOG.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PROMPT_CATALOG.len());
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(prompt_by_id("style-3").map(|p| p.title), Some("Hip-Hop"));
        assert!(prompt_by_id("style-9").is_none());
    }
}
