use crate::ops::segment_ops::{ADJUST_DEADBAND, even_split, shifted_end};
use crate::types::coverage::CoverageStat;
use crate::types::performer::Performer;
use crate::types::segment::{Segment, SegmentPatch};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Duration assumed for a timeline with no segments and no explicit length.
pub const DEFAULT_FALLBACK_DURATION: f64 = 180.0;

/// The line distribution of one song: who sings what, and when.
///
/// Segments are kept sorted by start time after every mutation. Lookups by
/// unknown ids are no-ops rather than errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TimelineRecord")]
pub struct Timeline {
    pub id: String,
    pub video_id: String,
    pub group_name: String,
    pub song_title: String,
    performers: Vec<Performer>,
    segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<f64>,
}

/// Wire shape of [`Timeline`]; segments may arrive unsorted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRecord {
    id: String,
    #[serde(default)]
    video_id: String,
    #[serde(default)]
    group_name: String,
    #[serde(default)]
    song_title: String,
    #[serde(default)]
    performers: Vec<Performer>,
    #[serde(default)]
    segments: Vec<Segment>,
    #[serde(default)]
    total_duration: Option<f64>,
}

impl From<TimelineRecord> for Timeline {
    fn from(record: TimelineRecord) -> Self {
        let mut timeline = Timeline {
            id: record.id,
            video_id: record.video_id,
            group_name: record.group_name,
            song_title: record.song_title,
            performers: record.performers,
            segments: record.segments,
            total_duration: record.total_duration,
        };
        timeline.sort_segments();
        timeline
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// An empty timeline with a fresh id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Timeline {
            id: id.into(),
            video_id: String::new(),
            group_name: String::new(),
            song_title: String::new(),
            performers: Vec::new(),
            segments: Vec::new(),
            total_duration: None,
        }
    }

    pub fn performers(&self) -> &[Performer] {
        &self.performers
    }

    /// Sorted ascending by start time.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn performer(&self, id: &str) -> Option<&Performer> {
        self.performers.iter().find(|p| p.id == id)
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Segments of one performer, in start order.
    pub fn segments_of<'a>(&'a self, performer_id: &'a str) -> impl Iterator<Item = &'a Segment> {
        self.segments
            .iter()
            .filter(move |s| s.performer_id == performer_id)
    }

    /// The explicit duration if positive, else the latest segment end if
    /// positive, else `fallback`.
    pub fn effective_duration(&self, fallback: f64) -> f64 {
        self.total_duration
            .filter(|d| *d > 0.0)
            .or_else(|| {
                self.segments
                    .iter()
                    .map(|s| s.end_time)
                    .reduce(f64::max)
                    .filter(|end| *end > 0.0)
            })
            .unwrap_or(fallback)
    }

    fn sort_segments(&mut self) {
        // Stable, so equal starts keep insertion order.
        self.segments
            .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    }
}

// Editing
impl Timeline {
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
        self.sort_segments();
    }

    /// Returns false if no segment has this id.
    pub fn update_segment(&mut self, id: &str, patch: SegmentPatch) -> bool {
        let Some(segment) = self.segments.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        patch.apply(segment);
        self.sort_segments();
        true
    }

    pub fn remove_segment(&mut self, id: &str) -> Option<Segment> {
        let idx = self.segments.iter().position(|s| s.id == id)?;
        Some(self.segments.remove(idx))
    }

    pub fn add_performer(&mut self, performer: Performer) {
        self.performers.push(performer);
    }

    /// Replaces the performer with the same id. Returns false if unknown.
    pub fn update_performer(&mut self, performer: Performer) -> bool {
        match self.performers.iter_mut().find(|p| p.id == performer.id) {
            Some(existing) => {
                *existing = performer;
                true
            }
            None => false,
        }
    }

    /// Removes every segment assigned to `id`, then the performer itself if
    /// listed.
    pub fn remove_performer(&mut self, id: &str) -> Option<Performer> {
        self.segments.retain(|s| s.performer_id != id);
        let idx = self.performers.iter().position(|p| p.id == id)?;
        Some(self.performers.remove(idx))
    }

    /// Replaces all segments with one equal, contiguous share per performer.
    /// Does nothing when there are no performers.
    pub fn distribute_evenly(&mut self, total_duration: f64) {
        if self.performers.is_empty() {
            return;
        }
        self.segments = even_split(&self.performers, total_duration);
        self.total_duration = Some(total_duration);
        self.sort_segments();
    }

    /// Moves the end of the performer's last segment so their total becomes
    /// `target_total`. Returns true if a segment changed.
    pub fn adjust_performer_total(&mut self, performer_id: &str, target_total: f64) -> bool {
        let current: f64 = self.segments_of(performer_id).map(Segment::length).sum();
        let delta = target_total - current;
        if delta.abs() < ADJUST_DEADBAND {
            return false;
        }
        let Some(last) = self
            .segments
            .iter_mut()
            .rev()
            .find(|s| s.performer_id == performer_id)
        else {
            return false;
        };
        last.end_time = shifted_end(last, delta);
        true
    }
}

// Queries
impl Timeline {
    /// Id of the performer singing at `time`. With overlapping segments the
    /// earliest-starting one wins.
    pub fn active_performer_at(&self, time: f64) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.contains(time))
            .map(|s| s.performer_id.as_str())
    }

    /// Like [`Self::active_performer_at`] but resolves the performer. A
    /// segment pointing at an unknown performer yields `None`.
    pub fn active_performer(&self, time: f64) -> Option<&Performer> {
        self.active_performer_at(time)
            .and_then(|id| self.performer(id))
    }

    /// One entry per performer, in performer order. Overlapping segments are
    /// counted independently, so totals can exceed `total_duration`.
    pub fn coverage_stats(&self, total_duration: f64, time: f64) -> Vec<CoverageStat> {
        self.performers
            .iter()
            .map(|performer| {
                let (total_time, elapsed) = self
                    .segments_of(&performer.id)
                    .fold((0.0, 0.0), |(total, elapsed), s| {
                        (total + s.length(), elapsed + s.elapsed_at(time))
                    });
                let percentage = if total_duration > 0.0 {
                    total_time / total_duration * 100.0
                } else {
                    0.0
                };
                CoverageStat {
                    performer_id: performer.id.clone(),
                    total_time,
                    elapsed: elapsed.max(0.0),
                    percentage,
                }
            })
            .collect()
    }

    /// Metadata required before a timeline is worth persisting.
    pub fn is_complete(&self) -> bool {
        !self.group_name.trim().is_empty()
            && !self.song_title.trim().is_empty()
            && !self.performers.is_empty()
    }
}
