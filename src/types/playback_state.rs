#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Seconds from the start of the video.
    pub playhead: f64,
    pub is_playing: bool,
    pub playback_rate: f64,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            playhead: 0.0,
            is_playing: false,
            playback_rate: 1.0,
        }
    }

    /// Moves the playhead forward by `elapsed` wall-clock seconds if playing.
    pub fn advance(&mut self, elapsed: f64) {
        if self.is_playing {
            self.playhead += elapsed * self.playback_rate;
        }
    }

    pub fn seek(&mut self, time: f64, duration: f64) {
        self.playhead = time.clamp(0.0, duration.max(0.0));
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_only_while_playing() {
        let mut state = PlaybackState::new();
        state.advance(2.0);
        assert_eq!(state.playhead, 0.0);

        state.is_playing = true;
        state.playback_rate = 1.5;
        state.advance(2.0);
        assert_eq!(state.playhead, 3.0);
    }

    #[test]
    fn test_seek_clamps() {
        let mut state = PlaybackState::new();
        state.seek(-4.0, 60.0);
        assert_eq!(state.playhead, 0.0);
        state.seek(75.0, 60.0);
        assert_eq!(state.playhead, 60.0);
        state.seek(12.5, 60.0);
        assert_eq!(state.playhead, 12.5);
    }
}
