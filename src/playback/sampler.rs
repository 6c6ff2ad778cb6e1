use std::time::{Duration, Instant};

use tracing::trace;

use super::player::Player;
use crate::types::coverage::{CoverageStat, CoverageSummary};
use crate::types::timeline::Timeline;

pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const MAX_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Everything the viewer shows for one playhead position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackFrame {
    pub time: f64,
    pub is_playing: bool,
    pub active_performer: Option<String>,
    pub stats: Vec<CoverageStat>,
    pub summary: CoverageSummary,
}

impl PlaybackFrame {
    pub fn compute(timeline: &Timeline, time: f64, is_playing: bool, fallback_duration: f64) -> Self {
        let duration = timeline.effective_duration(fallback_duration);
        let stats = timeline.coverage_stats(duration, time);
        let summary = CoverageSummary::from_stats(&stats, duration);
        PlaybackFrame {
            time,
            is_playing,
            active_performer: timeline.active_performer_at(time).map(str::to_string),
            stats,
            summary,
        }
    }
}

/// Recomputes frames at most once per interval while playing, and on
/// demand after an edit.
#[derive(Debug, Clone)]
pub struct PlaybackSampler {
    interval: Duration,
    fallback_duration: f64,
    last_sample: Option<Instant>,
    latest: Option<PlaybackFrame>,
}

impl PlaybackSampler {
    /// `interval` is clamped to `MIN_POLL_INTERVAL..=MAX_POLL_INTERVAL`.
    pub fn new(interval: Duration, fallback_duration: f64) -> Self {
        Self {
            interval: interval.clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL),
            fallback_duration,
            last_sample: None,
            latest: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn latest(&self) -> Option<&PlaybackFrame> {
        self.latest.as_ref()
    }

    fn is_due(&self, now: Instant) -> bool {
        self.last_sample
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    fn sample(&mut self, timeline: &Timeline, time: f64, is_playing: bool, now: Instant) -> &PlaybackFrame {
        self.last_sample = Some(now);
        let frame = PlaybackFrame::compute(timeline, time, is_playing, self.fallback_duration);
        trace!(time, active = ?frame.active_performer, "sampled playback");
        self.latest.insert(frame)
    }

    /// Timer tick. Samples the player only while it is playing and the
    /// interval has elapsed.
    pub fn poll(&mut self, timeline: &Timeline, player: &impl Player, now: Instant) -> Option<&PlaybackFrame> {
        if !player.is_playing() || !self.is_due(now) {
            return None;
        }
        Some(self.sample(timeline, player.current_time(), true, now))
    }

    /// Player-pushed time update, subject to the same rate bound as `poll`.
    pub fn push(
        &mut self,
        timeline: &Timeline,
        time: f64,
        is_playing: bool,
        now: Instant,
    ) -> Option<&PlaybackFrame> {
        if !self.is_due(now) {
            return None;
        }
        Some(self.sample(timeline, time, is_playing, now))
    }

    /// Recomputes immediately, e.g. after the timeline was edited.
    pub fn refresh(&mut self, timeline: &Timeline, time: f64, is_playing: bool, now: Instant) -> &PlaybackFrame {
        self.sample(timeline, time, is_playing, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::player::SimulatedPlayer;
    use crate::types::performer::Performer;
    use crate::types::segment::Segment;

    fn timeline() -> Timeline {
        let mut timeline = Timeline::with_id("t");
        timeline.add_performer(Performer::new("a", "A", "#f00"));
        timeline.add_performer(Performer::new("b", "B", "#00f"));
        timeline.add_segment(Segment::new("s1", "a", 0.0, 10.0));
        timeline.add_segment(Segment::new("s2", "b", 10.0, 20.0));
        timeline
    }

    #[test]
    fn test_frame_compute() {
        let frame = PlaybackFrame::compute(&timeline(), 12.0, true, 180.0);
        assert_eq!(frame.active_performer.as_deref(), Some("b"));
        assert_eq!(frame.stats[0].elapsed, 10.0);
        assert_eq!(frame.stats[1].elapsed, 2.0);
        assert_eq!(frame.stats[1].percentage, 50.0);
        assert_eq!(frame.summary.total_assigned, 20.0);
        assert_eq!(frame.summary.percentage, 100.0);
    }

    #[test]
    fn test_poll_respects_interval() {
        let timeline = timeline();
        let start = Instant::now();
        let mut player = SimulatedPlayer::new(20.0, start);
        let mut sampler = PlaybackSampler::new(Duration::from_millis(100), 180.0);

        // Paused: nothing to do
        assert!(sampler.poll(&timeline, &player, start).is_none());

        player.play(start);
        assert!(sampler.poll(&timeline, &player, start).is_some());
        assert!(sampler.poll(&timeline, &player, start + Duration::from_millis(40)).is_none());
        assert!(sampler.poll(&timeline, &player, start + Duration::from_millis(99)).is_none());

        let later = start + Duration::from_millis(5000);
        player.update(later);
        let frame = sampler.poll(&timeline, &player, later).unwrap();
        assert_eq!(frame.time, 5.0);
        assert_eq!(frame.active_performer.as_deref(), Some("a"));
    }

    #[test]
    fn test_push_is_throttled_but_refresh_is_not() {
        let timeline = timeline();
        let start = Instant::now();
        let mut sampler = PlaybackSampler::new(Duration::from_millis(250), 180.0);

        assert!(sampler.push(&timeline, 1.0, true, start).is_some());
        assert!(sampler.push(&timeline, 1.1, true, start + Duration::from_millis(100)).is_none());
        assert_eq!(sampler.latest().unwrap().time, 1.0);

        let frame = sampler.refresh(&timeline, 15.0, false, start + Duration::from_millis(120));
        assert_eq!(frame.active_performer.as_deref(), Some("b"));
        assert!(sampler.push(&timeline, 15.1, true, start + Duration::from_millis(200)).is_none());
        assert!(sampler.push(&timeline, 15.4, true, start + Duration::from_millis(370)).is_some());
    }

    #[test]
    fn test_interval_is_clamped() {
        let fast = PlaybackSampler::new(Duration::from_millis(1), 180.0);
        assert_eq!(fast.interval(), MIN_POLL_INTERVAL);
        let slow = PlaybackSampler::new(Duration::from_secs(2), 180.0);
        assert_eq!(slow.interval(), MAX_POLL_INTERVAL);
    }
}
