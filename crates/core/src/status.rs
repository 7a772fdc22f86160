//! Review status, track fields and pipeline stages.
//!
//! A track moves through four ordered stages (theme, style, lyrics, audio).
//! The first three are free-text fields carrying their own [`ReviewStatus`];
//! the audio stage is decided by the track's audio versions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// ReviewStatus
// ---------------------------------------------------------------------------

/// Three-state review outcome of a field or audio version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Not yet reviewed. Every freshly generated field starts here.
    #[default]
    Pending,
    Validated,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [Self::Pending, Self::Validated, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_validated(self) -> bool {
        self == Self::Validated
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::InvalidArgument(format!(
                    "Invalid status '{s}'. Must be one of: pending, validated, rejected"
                ))
            })
    }
}

/// A reviewer decision. Fields can only be moved to validated or rejected
/// by hand; `Pending` is reserved for regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Validate,
    Reject,
}

impl From<Decision> for ReviewStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Validate => ReviewStatus::Validated,
            Decision::Reject => ReviewStatus::Rejected,
        }
    }
}

impl TryFrom<ReviewStatus> for Decision {
    type Error = CoreError;

    fn try_from(status: ReviewStatus) -> Result<Self, Self::Error> {
        match status {
            ReviewStatus::Validated => Ok(Decision::Validate),
            ReviewStatus::Rejected => Ok(Decision::Reject),
            ReviewStatus::Pending => Err(CoreError::InvalidArgument(
                "A field can only be set to validated or rejected".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// TrackField
// ---------------------------------------------------------------------------

/// One of the three generated text fields of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackField {
    Theme,
    Style,
    Lyrics,
}

impl TrackField {
    pub const ALL: [TrackField; 3] = [Self::Theme, Self::Style, Self::Lyrics];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Style => "style",
            Self::Lyrics => "lyrics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Theme => "Theme",
            Self::Style => "Style",
            Self::Lyrics => "Lyrics",
        }
    }

    /// The pipeline stage this field is reviewed in.
    pub fn stage(self) -> Stage {
        match self {
            Self::Theme => Stage::Theme,
            Self::Style => Stage::Style,
            Self::Lyrics => Stage::Lyrics,
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                CoreError::InvalidArgument(format!(
                    "Invalid field '{s}'. Must be one of: theme, style, lyrics"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// A step of the ordered validation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Theme,
    Style,
    Lyrics,
    Audio,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 4] = [Self::Theme, Self::Style, Self::Lyrics, Self::Audio];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Style => "style",
            Self::Lyrics => "lyrics",
            Self::Audio => "audio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Theme => "Theme",
            Self::Style => "Style",
            Self::Lyrics => "Lyrics",
            Self::Audio => "Audio",
        }
    }

    /// The stage that must be validated before this one can be acted on.
    pub fn previous(self) -> Option<Stage> {
        match self {
            Self::Theme => None,
            Self::Style => Some(Self::Theme),
            Self::Lyrics => Some(Self::Style),
            Self::Audio => Some(Self::Lyrics),
        }
    }

    /// The text field reviewed in this stage, `None` for audio.
    pub fn field(self) -> Option<TrackField> {
        match self {
            Self::Theme => Some(TrackField::Theme),
            Self::Style => Some(TrackField::Style),
            Self::Lyrics => Some(TrackField::Lyrics),
            Self::Audio => None,
        }
    }
}

impl From<TrackField> for Stage {
    fn from(field: TrackField) -> Self {
        field.stage()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                CoreError::InvalidArgument(format!(
                    "Invalid stage '{s}'. Must be one of: theme, style, lyrics, audio"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
