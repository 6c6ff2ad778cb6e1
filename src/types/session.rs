use tracing::{info, warn};

use crate::ops::video_funcs::parse_video_id;
use crate::store::Library;
use crate::types::coverage::CoverageStat;
use crate::types::performer::Performer;
use crate::types::playback_state::PlaybackState;
use crate::types::segment::{Segment, SegmentPatch};
use crate::types::timeline::Timeline;

/// Authoring state for one timeline. Edits stay in memory until `save`
/// succeeds.
#[derive(Debug, Clone)]
pub struct EditorSession {
    timeline: Timeline,
    pub playback_state: PlaybackState,
    target_duration: f64,
    dirty: bool,
}

impl EditorSession {
    pub fn new(timeline: Timeline, fallback_duration: f64) -> Self {
        let target_duration = timeline.effective_duration(fallback_duration);
        EditorSession {
            timeline,
            playback_state: PlaybackState::new(),
            target_duration,
            dirty: false,
        }
    }

    /// Starts from a blank timeline if `id` cannot be loaded.
    pub fn open(library: &Library, id: &str, fallback_duration: f64) -> Self {
        let timeline = library.load(id).unwrap_or_else(|| {
            warn!(id, "starting a new timeline");
            Timeline::new()
        });
        Self::new(timeline, fallback_duration)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn target_duration(&self) -> f64 {
        self.target_duration
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn edit<R>(&mut self, f: impl FnOnce(&mut Timeline) -> R) -> R {
        self.dirty = true;
        f(&mut self.timeline)
    }

    /// Accepts a bare id or a video URL. Returns false if no id was found.
    pub fn set_video(&mut self, input: &str) -> bool {
        match parse_video_id(input) {
            Some(id) => {
                self.edit(|t| t.video_id = id);
                true
            }
            None => false,
        }
    }

    pub fn set_group_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.edit(|t| t.group_name = name);
    }

    pub fn set_song_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.edit(|t| t.song_title = title);
    }

    pub fn add_performer(&mut self, performer: Performer) {
        self.edit(|t| t.add_performer(performer));
    }

    pub fn update_performer(&mut self, performer: Performer) -> bool {
        self.edit(|t| t.update_performer(performer))
    }

    pub fn remove_performer(&mut self, id: &str) -> Option<Performer> {
        self.edit(|t| t.remove_performer(id))
    }

    pub fn add_segment(&mut self, segment: Segment) {
        self.edit(|t| t.add_segment(segment));
    }

    pub fn update_segment(&mut self, id: &str, patch: SegmentPatch) -> bool {
        self.edit(|t| t.update_segment(id, patch))
    }

    pub fn remove_segment(&mut self, id: &str) -> Option<Segment> {
        self.edit(|t| t.remove_segment(id))
    }

    /// Sets the song length used for stats and commits it to the timeline.
    pub fn set_target_duration(&mut self, duration: f64) {
        self.target_duration = duration;
        self.edit(|t| t.total_duration = Some(duration));
    }

    pub fn distribute_evenly(&mut self) {
        let duration = self.target_duration;
        self.edit(|t| t.distribute_evenly(duration));
    }

    pub fn adjust_performer_total(&mut self, performer_id: &str, target_total: f64) -> bool {
        let duration = self.target_duration;
        let changed = self.timeline.adjust_performer_total(performer_id, target_total);
        if changed {
            self.edit(|t| t.total_duration = Some(duration));
        }
        changed
    }

    pub fn active_performer_at(&self, time: f64) -> Option<&str> {
        self.timeline.active_performer_at(time)
    }

    pub fn coverage_stats(&self, time: f64) -> Vec<CoverageStat> {
        self.timeline.coverage_stats(self.target_duration, time)
    }

    pub fn can_save(&self) -> bool {
        self.timeline.is_complete()
    }

    /// Returns false, keeping the session dirty, if the timeline is
    /// incomplete or the store refused it.
    pub fn save(&mut self, library: &mut Library) -> bool {
        if !self.can_save() {
            warn!(id = %self.timeline.id, "timeline needs a group, a title and a performer");
            return false;
        }
        let saved = library.save(&self.timeline);
        if saved {
            self.dirty = false;
        }
        saved
    }
}

/// Duration a viewer reports for a timeline with no length and no segments.
pub const VIEWER_FALLBACK_DURATION: f64 = 0.0;

/// Read-only view of a timeline for playback.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    timeline: Timeline,
    loaded: bool,
}

impl ViewerSession {
    /// Shows an empty timeline if `id` cannot be loaded.
    pub fn open(library: &Library, id: &str) -> Self {
        let (timeline, loaded) = match library.load(id) {
            Some(timeline) => {
                info!(id, title = %timeline.song_title, "opened timeline");
                (timeline, true)
            }
            None => {
                warn!(id, "timeline not found");
                (Timeline::with_id(id), false)
            }
        };
        ViewerSession { timeline, loaded }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn duration(&self) -> f64 {
        self.timeline.effective_duration(VIEWER_FALLBACK_DURATION)
    }

    pub fn active_performer_at(&self, time: f64) -> Option<&str> {
        self.timeline.active_performer_at(time)
    }

    pub fn coverage_stats(&self, time: f64) -> Vec<CoverageStat> {
        self.timeline.coverage_stats(self.duration(), time)
    }
}
