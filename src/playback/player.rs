use std::time::Instant;

use crate::types::playback_state::PlaybackState;

/// Whatever is playing the video. Sampled, never driven, by the sampler.
pub trait Player {
    /// Playhead position in seconds.
    fn current_time(&self) -> f64;
    fn is_playing(&self) -> bool;
}

/// A player without video: the playhead advances with wall-clock time.
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    pub playback_state: PlaybackState,
    pub duration: f64,
    last_update: Instant,
}

impl SimulatedPlayer {
    pub fn new(duration: f64, now: Instant) -> Self {
        Self {
            playback_state: PlaybackState::new(),
            duration,
            last_update: now,
        }
    }

    /// Advances the playhead to `now`. Playback stops at the end.
    pub fn update(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_update).as_secs_f64();
        self.playback_state.advance(elapsed);
        self.last_update = now;

        let max_time = self.duration.max(0.0);
        if self.playback_state.playhead >= max_time {
            self.playback_state.playhead = max_time;
            self.playback_state.is_playing = false;
        }
    }

    pub fn play(&mut self, now: Instant) {
        self.playback_state.is_playing = true;
        self.last_update = now;
    }

    pub fn pause(&mut self, now: Instant) {
        self.update(now);
        self.playback_state.is_playing = false;
    }

    pub fn seek(&mut self, time: f64) {
        self.playback_state.seek(time, self.duration);
    }
}

impl Player for SimulatedPlayer {
    fn current_time(&self) -> f64 {
        self.playback_state.playhead
    }

    fn is_playing(&self) -> bool {
        self.playback_state.is_playing
    }
}
