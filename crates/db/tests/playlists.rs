//! Integration tests for playlists and CSV export.
//!
//! Runs against a store seeded with the sample playlists, the same way the
//! command line front end creates it.

use assert_matches::assert_matches;
use trackgate_core::batch::{Batch, NewBatch};
use trackgate_core::error::CoreError;
use trackgate_core::export::{BATCH_CSV_HEADER, PLAYLIST_CSV_HEADER};
use trackgate_core::playlist::NewPlaylist;
use trackgate_core::status::{ReviewStatus, Stage, TrackField};
use trackgate_core::types::{new_id, EntityId};
use trackgate_db::repositories::{BatchRepo, ExportRepo, PlaylistRepo, TrackRepo};
use trackgate_db::{create_pool, DbConfig, DbPool};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seeded_pool() -> DbPool {
    create_pool(&DbConfig {
        simulated_latency: false,
        seed_sample_playlists: true,
    })
}

async fn create_batch(db: &DbPool, track_count: usize) -> Batch {
    let input = NewBatch {
        name: "Night Drive".to_string(),
        track_count,
        theme_prompt: "Nostalgia and Memory".to_string(),
        style_prompt: "Synthwave".to_string(),
        lyrics_prompt: "Storytelling".to_string(),
    };
    BatchRepo::create(db, &input).await.unwrap()
}

/// Push one track through every stage and return its id.
async fn finalize_track(db: &DbPool, batch: &Batch, index: usize) -> EntityId {
    let track = &batch.tracks[index];
    for field in TrackField::ALL {
        TrackRepo::update_field_status(db, batch.id, track.id, field, ReviewStatus::Validated)
            .await
            .unwrap();
    }
    TrackRepo::validate_audio_version(db, batch.id, track.id, track.audio_versions[0].id)
        .await
        .unwrap();
    track.id
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn seeded_store_lists_sample_playlists() {
    let db = seeded_pool();
    let playlists = PlaylistRepo::list(&db).await;
    assert_eq!(playlists.len(), 3);
    assert_eq!(playlists[0].name, "Summer Vibes");
}

#[tokio::test]
async fn create_requires_a_name() {
    let db = seeded_pool();
    assert_matches!(
        PlaylistRepo::create(&db, &NewPlaylist::new("   ", "blank")).await,
        Err(CoreError::InvalidArgument(_))
    );

    let playlist = PlaylistRepo::create(&db, &NewPlaylist::new("Late Night", ""))
        .await
        .unwrap();
    assert!(playlist.track_ids.is_empty());
    assert!(playlist.theme_prompt.is_none());
    assert_eq!(PlaylistRepo::get(&db, playlist.id).await.unwrap(), playlist);
}

#[tokio::test]
async fn add_tracks_is_a_set_union() {
    let db = seeded_pool();
    let playlist = PlaylistRepo::create(&db, &NewPlaylist::new("Mix", ""))
        .await
        .unwrap();
    let (a, b, c) = (new_id(), new_id(), new_id());

    PlaylistRepo::add_tracks(&db, playlist.id, &[a, b])
        .await
        .unwrap();
    let updated = PlaylistRepo::add_tracks(&db, playlist.id, &[b, c])
        .await
        .unwrap();
    assert_eq!(updated.track_ids, vec![a, b, c]);

    let updated = PlaylistRepo::remove_track(&db, playlist.id, b)
        .await
        .unwrap();
    assert_eq!(updated.track_ids, vec![a, c]);

    // Absent id: no-op.
    let updated = PlaylistRepo::remove_track(&db, playlist.id, b)
        .await
        .unwrap();
    assert_eq!(updated.track_ids, vec![a, c]);
}

#[tokio::test]
async fn unknown_playlist_is_not_found() {
    let db = seeded_pool();
    let id = new_id();
    assert!(PlaylistRepo::find_by_id(&db, id).await.is_none());
    assert_matches!(
        PlaylistRepo::add_tracks(&db, id, &[new_id()]).await,
        Err(CoreError::NotFound { entity: "playlist", .. })
    );
    assert_matches!(
        PlaylistRepo::tracks_for_playlist(&db, id).await,
        Err(CoreError::NotFound { entity: "playlist", .. })
    );
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assign_requires_a_selection() {
    let db = seeded_pool();
    let playlists = PlaylistRepo::list(&db).await;

    assert_matches!(
        PlaylistRepo::assign_tracks(&db, &[], &[playlists[0].id])
            .await,
        Err(CoreError::InvalidArgument(_))
    );
    assert_matches!(
        PlaylistRepo::assign_tracks(&db, &[new_id()], &[]).await,
        Err(CoreError::InvalidArgument(_))
    );
}

#[tokio::test]
async fn assign_rejects_unfinished_tracks() {
    let db = seeded_pool();
    let batch = create_batch(&db, 2).await;
    let playlist_id = PlaylistRepo::list(&db).await[0].id;

    assert_matches!(
        PlaylistRepo::assign_tracks(&db, &[batch.tracks[0].id], &[playlist_id])
            .await,
        Err(CoreError::PreconditionFailed(_))
    );
    assert_matches!(
        PlaylistRepo::assign_tracks(&db, &[new_id()], &[playlist_id]).await,
        Err(CoreError::NotFound { entity: "track", .. })
    );
    assert!(PlaylistRepo::get(&db, playlist_id).await.unwrap().track_ids.is_empty());
}

#[tokio::test]
async fn assign_reads_eligibility_when_called() {
    let db = seeded_pool();
    let batch = create_batch(&db, 1).await;
    let track_id = finalize_track(&db, &batch, 0).await;
    let playlist_id = PlaylistRepo::list(&db).await[0].id;

    TrackRepo::regenerate(&db, batch.id, track_id, Stage::Audio)
        .await
        .unwrap();
    assert_matches!(
        PlaylistRepo::assign_tracks(&db, &[track_id], &[playlist_id]).await,
        Err(CoreError::PreconditionFailed(_))
    );
    assert!(PlaylistRepo::get(&db, playlist_id).await.unwrap().track_ids.is_empty());
}

#[tokio::test]
async fn assign_to_several_playlists() {
    let db = seeded_pool();
    let batch = create_batch(&db, 3).await;
    let first = finalize_track(&db, &batch, 0).await;
    let third = finalize_track(&db, &batch, 2).await;

    let playlists = PlaylistRepo::list(&db).await;
    let targets = [playlists[0].id, playlists[2].id];
    let updated = PlaylistRepo::assign_tracks(&db, &[first, third], &targets)
        .await
        .unwrap();

    assert_eq!(updated.len(), 2);
    assert!(updated.iter().all(|p| p.track_ids == vec![first, third]));
    assert!(PlaylistRepo::get(&db, playlists[1].id)
        .await
        .unwrap()
        .track_ids
        .is_empty());

    let tracks = PlaylistRepo::tracks_for_playlist(&db, targets[0])
        .await
        .unwrap();
    let ids: Vec<_> = tracks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first, third]);
}

#[tokio::test]
async fn assign_fails_whole_when_a_playlist_is_missing() {
    let db = seeded_pool();
    let batch = create_batch(&db, 1).await;
    let track_id = finalize_track(&db, &batch, 0).await;
    let existing = PlaylistRepo::list(&db).await[0].id;

    assert_matches!(
        PlaylistRepo::assign_tracks(&db, &[track_id], &[existing, new_id()]).await,
        Err(CoreError::NotFound { entity: "playlist", .. })
    );
    assert!(PlaylistRepo::get(&db, existing).await.unwrap().track_ids.is_empty());
}

#[tokio::test]
async fn dangling_references_are_skipped() {
    let db = seeded_pool();
    let batch = create_batch(&db, 1).await;
    let track_id = finalize_track(&db, &batch, 0).await;
    let playlist_id = PlaylistRepo::list(&db).await[1].id;

    PlaylistRepo::add_tracks(&db, playlist_id, &[new_id(), track_id])
        .await
        .unwrap();
    let tracks = PlaylistRepo::tracks_for_playlist(&db, playlist_id)
        .await
        .unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].id, track_id);
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_counts_final_tracks() {
    let db = seeded_pool();
    let batch = create_batch(&db, 4).await;
    finalize_track(&db, &batch, 1).await;

    let csv = ExportRepo::batches_csv(&db).await;
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], BATCH_CSV_HEADER);
    assert!(lines[1].starts_with(&batch.id.to_string()));
    assert!(lines[1].ends_with(",4,1"));
}

#[tokio::test]
async fn export_lists_every_playlist() {
    let db = seeded_pool();
    let csv = ExportRepo::playlists_csv(&db).await;
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], PLAYLIST_CSV_HEADER);
    assert!(lines[1].contains(",Summer Vibes,"));
    assert!(lines[1].ends_with(",0"));
}
