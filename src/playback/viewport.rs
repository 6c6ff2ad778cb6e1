use crate::types::timeline::Timeline;

/// Default visible window, in seconds.
pub const DEFAULT_WINDOW: f64 = 60.0;

/// A segment clipped to the viewport, positioned in percent of its width.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSpan<'a> {
    pub segment_id: &'a str,
    pub performer_id: &'a str,
    pub left: f64,
    pub right: f64,
    pub is_active: bool,
}

/// The window of the timeline strip currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    start: f64,
    end: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_WINDOW)
    }
}

impl Viewport {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }

    fn move_to(&mut self, start: f64) {
        let width = self.width();
        self.start = start;
        self.end = start + width;
    }

    /// Jumps so the playhead sits just inside the left edge when it has
    /// left the window. Returns true if the window moved.
    pub fn follow(&mut self, time: f64) -> bool {
        if self.contains(time) {
            return false;
        }
        let start = (time - self.width() * 0.1).floor().max(0.0);
        self.move_to(start);
        true
    }

    pub fn scroll_left(&mut self) {
        let start = (self.start - self.width() / 2.0).max(0.0);
        self.move_to(start);
    }

    /// Never scrolls past `total_duration`, nor before zero.
    pub fn scroll_right(&mut self, total_duration: f64) {
        let width = self.width();
        let start = (self.start + width / 2.0).min(total_duration - width).max(0.0);
        self.move_to(start);
    }

    /// Time under a click at `fraction` (0..=1) of the strip width.
    pub fn time_at(&self, fraction: f64) -> f64 {
        self.start + fraction.clamp(0.0, 1.0) * self.width()
    }

    /// Playhead position in percent, or `None` when off screen or the
    /// window is empty.
    pub fn playhead_position(&self, time: f64) -> Option<f64> {
        let width = self.width();
        (width > 0.0 && self.contains(time)).then(|| (time - self.start) * 100.0 / width)
    }

    /// Segments intersecting the window, clipped to 0..=100 percent.
    pub fn visible_spans<'a>(&self, timeline: &'a Timeline, time: f64) -> Vec<VisibleSpan<'a>> {
        let width = self.width();
        if width <= 0.0 {
            return Vec::new();
        }
        timeline
            .segments()
            .iter()
            .filter(|s| timeline.performer(&s.performer_id).is_some())
            .filter(|s| s.end_time >= self.start && s.start_time <= self.end)
            .map(|s| VisibleSpan {
                segment_id: &s.id,
                performer_id: &s.performer_id,
                left: ((s.start_time - self.start) * 100.0 / width).max(0.0),
                right: ((s.end_time - self.start) * 100.0 / width).min(100.0),
                is_active: s.contains(time),
            })
            .collect()
    }
}
