//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&MemoryDb` as the first argument.

pub mod batch_repo;
pub mod export_repo;
pub mod playlist_repo;
pub mod track_repo;

pub use batch_repo::BatchRepo;
pub use export_repo::ExportRepo;
pub use playlist_repo::PlaylistRepo;
pub use track_repo::TrackRepo;
