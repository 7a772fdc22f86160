//! CSV export of batches and playlists.
//!
//! One header row, then one row per entity. Values containing a comma, quote
//! or newline are quoted so free-text prompts cannot shift columns.

use chrono::SecondsFormat;

use crate::batch::Batch;
use crate::playlist::Playlist;
use crate::progress::BatchProgress;
use crate::types::Timestamp;

pub const BATCH_CSV_HEADER: &str =
    "Batch ID,Batch Name,Created At,Theme Prompt,Style Prompt,Lyrics Prompt,Total Tracks,Validated Tracks";

pub const PLAYLIST_CSV_HEADER: &str =
    "Playlist ID,Playlist Name,Description,Created At,Theme Prompt,Style Prompt,Lyrics Prompt,Track Count";

/// Default file name for the batch export.
pub const BATCH_EXPORT_FILE: &str = "batches-export.csv";

/// Default file name for the playlist export.
pub const PLAYLIST_EXPORT_FILE: &str = "playlists-export.csv";

/// Escape a value for CSV: wrap in quotes if it contains comma, quote, or newline.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn push_row(out: &mut String, cells: &[String]) {
    let row: Vec<String> = cells.iter().map(|c| csv_escape(c)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Build the batch export. "Validated Tracks" counts fully validated tracks.
pub fn batches_to_csv(batches: &[Batch]) -> String {
    let mut csv = String::from(BATCH_CSV_HEADER);
    csv.push('\n');

    for batch in batches {
        let progress = BatchProgress::compute(batch);
        push_row(
            &mut csv,
            &[
                batch.id.to_string(),
                batch.name.clone(),
                csv_timestamp(&batch.created_at),
                batch.prompts.theme.clone(),
                batch.prompts.style.clone(),
                batch.prompts.lyrics.clone(),
                batch.tracks.len().to_string(),
                progress.final_tracks.to_string(),
            ],
        );
    }

    csv
}

/// Build the playlist export. Missing prompts are written as empty cells.
pub fn playlists_to_csv(playlists: &[Playlist]) -> String {
    let mut csv = String::from(PLAYLIST_CSV_HEADER);
    csv.push('\n');

    for playlist in playlists {
        push_row(
            &mut csv,
            &[
                playlist.id.to_string(),
                playlist.name.clone(),
                playlist.description.clone(),
                csv_timestamp(&playlist.created_at),
                playlist.theme_prompt.clone().unwrap_or_default(),
                playlist.style_prompt.clone().unwrap_or_default(),
                playlist.lyrics_prompt.clone().unwrap_or_default(),
                playlist.track_ids.len().to_string(),
            ],
        );
    }

    csv
}
