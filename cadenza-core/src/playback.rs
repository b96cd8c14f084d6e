use crate::time::format_position;
use std::time::Instant;

/// Current playback state reported by the player UI
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Whether music is currently playing
    pub is_playing: bool,
    /// Position in seconds at the time of the last update
    pub position_secs: f64,
    /// Total track duration in seconds
    pub duration_secs: f64,
    /// When this state was last updated (for interpolation)
    pub updated_at: Instant,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            updated_at: Instant::now(),
        }
    }
}

impl PlaybackState {
    /// Create a new playback state
    #[must_use]
    pub fn new(is_playing: bool, position_secs: f64, duration_secs: f64) -> Self {
        Self {
            is_playing,
            position_secs,
            duration_secs,
            updated_at: Instant::now(),
        }
    }

    /// Get interpolated position based on time elapsed since last update
    #[must_use]
    pub fn interpolated_position(&self) -> f64 {
        if !self.is_playing {
            return self.position_secs;
        }

        let interpolated = self.position_secs + self.updated_at.elapsed().as_secs_f64();

        // Clamp to track duration
        interpolated.min(self.duration_secs)
    }

    /// Render the interpolated position for the playback bar
    #[must_use]
    pub fn display_position(&self) -> String {
        format_position(self.interpolated_position())
    }
}
