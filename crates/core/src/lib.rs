//! Domain core of the track review workflow.
//!
//! Generated tracks pass through ordered validation gates (theme, style,
//! lyrics, audio) before they can be curated into playlists. This crate holds
//! the records, the gating rules and the progress aggregation. It performs no
//! I/O; storage lives in `trackgate-db`.

pub mod batch;
pub mod error;
pub mod export;
pub mod generation;
pub mod playlist;
pub mod progress;
pub mod prompts;
pub mod status;
pub mod track;
pub mod types;
pub mod workflow;
