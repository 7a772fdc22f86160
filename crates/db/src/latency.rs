//! Simulated backend latency.
//!
//! The review front end was built against a remote service. Enabling the
//! simulated latency reproduces its response times so callers can exercise
//! loading states against the in-memory store.

use std::time::Duration;

/// Store operations with a distinct simulated delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateBatch,
    ListBatches,
    GetBatch,
    UpdateTrackField,
    RegenerateTrack,
    RegenerateAll,
    ValidateAll,
    AudioDecision,
    ListPlaylists,
    GetPlaylist,
    CreatePlaylist,
    AddTracks,
    RemoveTrack,
    GetTracks,
    Export,
}

impl Operation {
    /// Delay applied when latency simulation is on.
    pub fn delay(self) -> Duration {
        let ms = match self {
            Self::CreateBatch | Self::RegenerateTrack => 1000,
            Self::RegenerateAll => 1500,
            Self::ValidateAll | Self::CreatePlaylist => 800,
            Self::AddTracks => 600,
            Self::ListBatches | Self::ListPlaylists | Self::Export => 500,
            Self::GetTracks => 400,
            Self::GetBatch
            | Self::UpdateTrackField
            | Self::AudioDecision
            | Self::GetPlaylist
            | Self::RemoveTrack => 300,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedLatency {
    enabled: bool,
}

impl SimulatedLatency {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Sleep for the operation's delay, or return immediately when disabled.
    pub async fn pause(&self, op: Operation) {
        if self.enabled {
            tokio::time::sleep(op.delay()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regeneration_is_slowest() {
        assert!(Operation::RegenerateAll.delay() > Operation::RegenerateTrack.delay());
        assert!(Operation::RegenerateTrack.delay() > Operation::GetBatch.delay());
    }

    #[tokio::test(start_paused = true)]
    async fn enabled_latency_sleeps() {
        let start = tokio::time::Instant::now();
        SimulatedLatency::enabled()
            .pause(Operation::ValidateAll)
            .await;
        assert!(start.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_latency_returns_immediately() {
        let start = tokio::time::Instant::now();
        SimulatedLatency::disabled()
            .pause(Operation::RegenerateAll)
            .await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
