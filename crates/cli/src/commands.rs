//! Command implementations.
//!
//! Each command works against an explicit [`DbPool`] owned by the caller.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use trackgate_core::batch::NewBatch;
use trackgate_core::export::{BATCH_EXPORT_FILE, PLAYLIST_EXPORT_FILE};
use trackgate_core::playlist::NewPlaylist;
use trackgate_core::prompts::{prompt_by_id, prompts_by_category, Prompt, PROMPT_CATALOG};
use trackgate_core::status::{ReviewStatus, Stage, TrackField};
use trackgate_core::types::EntityId;
use trackgate_db::repositories::{BatchRepo, ExportRepo, PlaylistRepo, TrackRepo};
use trackgate_db::DbPool;

// ---------------------------------------------------------------------------
// prompts
// ---------------------------------------------------------------------------

/// The prompt catalog as pretty-printed JSON, optionally for one field only.
pub fn prompts_json(category: Option<TrackField>) -> Result<String> {
    let prompts: Vec<&Prompt> = match category {
        Some(field) => prompts_by_category(field),
        None => PROMPT_CATALOG.iter().collect(),
    };
    serde_json::to_string_pretty(&prompts).context("Failed to serialize prompt catalog")
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

/// Locations of the two CSV files written by an export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportPaths {
    pub batches: PathBuf,
    pub playlists: PathBuf,
}

/// Write `batches-export.csv` and `playlists-export.csv` into `out_dir`,
/// creating the directory if needed.
pub async fn write_exports(db: &DbPool, out_dir: &Path) -> Result<ExportPaths> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("Failed to create export directory {}", out_dir.display()))?;

    let paths = ExportPaths {
        batches: out_dir.join(BATCH_EXPORT_FILE),
        playlists: out_dir.join(PLAYLIST_EXPORT_FILE),
    };

    let batches = ExportRepo::batches_csv(db).await;
    tokio::fs::write(&paths.batches, batches)
        .await
        .with_context(|| format!("Failed to write {}", paths.batches.display()))?;

    let playlists = ExportRepo::playlists_csv(db).await;
    tokio::fs::write(&paths.playlists, playlists)
        .await
        .with_context(|| format!("Failed to write {}", paths.playlists.display()))?;

    tracing::info!(
        batches = %paths.batches.display(),
        playlists = %paths.playlists.display(),
        "Export written"
    );
    Ok(paths)
}

// ---------------------------------------------------------------------------
// demo
// ---------------------------------------------------------------------------

pub const DEMO_BATCH_NAME: &str = "Demo batch";
pub const DEMO_PLAYLIST_NAME: &str = "Demo picks";

/// Outcome of a demo run.
#[derive(Debug, Clone, Serialize)]
pub struct DemoSummary {
    pub batch_id: EntityId,
    pub playlist_id: EntityId,
    pub total_tracks: usize,
    pub final_tracks: usize,
    pub exports: ExportPaths,
}

/// Walk a fresh batch through every review stage.
///
/// The first track of each text stage is reviewed on its own, the remaining
/// pending tracks are bulk validated, and every track ready for audio gets
/// its first candidate picked. The fully validated tracks end up in a new
/// playlist and both exports are written to `out_dir`.
pub async fn run_demo(db: &DbPool, track_count: usize, out_dir: &Path) -> Result<DemoSummary> {
    let input = demo_batch(track_count);
    let batch = BatchRepo::create(db, &input)
        .await
        .context("Failed to create demo batch")?;

    for stage in Stage::ALL {
        match stage.field() {
            Some(field) => review_text_stage(db, batch.id, field).await?,
            None => review_audio_stage(db, batch.id).await?,
        }

        let progress = BatchRepo::progress(db, batch.id).await?;
        tracing::info!(
            stage = stage.label(),
            validated = progress.validated(stage),
            total = progress.total,
            percent = progress.percentage(stage),
            still_offered = ?progress.offered_stages(),
            "Stage reviewed"
        );
    }

    let finals = TrackRepo::list_final_tracks(db, batch.id).await?;
    let playlist = PlaylistRepo::create(
        db,
        &NewPlaylist::new(DEMO_PLAYLIST_NAME, format!("Final tracks of {}", batch.name))
            .with_prompts(&input.theme_prompt, &input.style_prompt, &input.lyrics_prompt),
    )
    .await?;

    let final_ids: Vec<EntityId> = finals.iter().map(|t| t.id).collect();
    if BatchRepo::progress(db, batch.id).await?.has_final_tracks() {
        PlaylistRepo::assign_tracks(db, &final_ids, &[playlist.id])
            .await?;
    }

    let exports = write_exports(db, out_dir).await?;

    Ok(DemoSummary {
        batch_id: batch.id,
        playlist_id: playlist.id,
        total_tracks: batch.tracks.len(),
        final_tracks: final_ids.len(),
        exports,
    })
}

/// Catalog prompts the demo batch is generated from.
pub const DEMO_PROMPT_IDS: [&str; 3] = ["theme-1", "style-1", "lyrics-1"];

/// Request for the demo batch, built from [`DEMO_PROMPT_IDS`].
fn demo_batch(track_count: usize) -> NewBatch {
    let [theme, style, lyrics] = DEMO_PROMPT_IDS.map(|id| {
        prompt_by_id(id)
            .map(|p| p.title.to_string())
            .unwrap_or_else(|| id.to_string())
    });

    NewBatch {
        name: DEMO_BATCH_NAME.to_string(),
        track_count,
        theme_prompt: theme,
        style_prompt: style,
        lyrics_prompt: lyrics,
    }
}

async fn review_text_stage(db: &DbPool, batch_id: EntityId, field: TrackField) -> Result<()> {
    let relevant = TrackRepo::list_relevant(db, batch_id, field.stage()).await?;

    if let Some(first) = relevant.first() {
        TrackRepo::update_field_status(db, batch_id, first.id, field, ReviewStatus::Validated)
            .await?;
    }
    TrackRepo::validate_all(db, batch_id, field)
        .await
        .with_context(|| format!("Failed to validate all {} fields", field.label()))?;
    Ok(())
}

async fn review_audio_stage(db: &DbPool, batch_id: EntityId) -> Result<()> {
    for track in TrackRepo::list_relevant(db, batch_id, Stage::Audio).await? {
        let Some(candidate) = track.audio_versions.first() else {
            tracing::warn!(track_id = %track.id, "Track has no audio candidates");
            continue;
        };
        TrackRepo::validate_audio_version(db, batch_id, track.id, candidate.id)
            .await?;
    }
    Ok(())
}
