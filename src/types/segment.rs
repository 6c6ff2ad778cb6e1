use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A `[start_time, end_time]` interval assigned to one performer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub performer_id: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Segment {
    pub fn new(
        id: impl Into<String>,
        performer_id: impl Into<String>,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Segment {
            id: id.into(),
            performer_id: performer_id.into(),
            start_time,
            end_time,
            annotation: None,
        }
    }

    pub fn with_generated_id(performer_id: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self::new(Uuid::new_v4().to_string(), performer_id, start_time, end_time)
    }

    pub fn annotated(mut self, text: impl Into<String>) -> Self {
        self.annotation = Some(text.into());
        self
    }

    pub fn length(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Segments with `end_time <= start_time` are stored as given; callers
    /// that care can check here.
    pub fn is_valid(&self) -> bool {
        self.start_time >= 0.0 && self.start_time < self.end_time
    }

    /// Inclusive on both ends.
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time <= self.end_time
    }

    /// How much of this segment has been played by `time`.
    pub fn elapsed_at(&self, time: f64) -> f64 {
        if time > self.end_time {
            self.length()
        } else if time > self.start_time {
            time - self.start_time
        } else {
            0.0
        }
    }
}

/// Partial update for [`Segment`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPatch {
    pub performer_id: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    /// `Some(None)` clears the annotation.
    pub annotation: Option<Option<String>>,
}

impl SegmentPatch {
    pub fn apply(self, segment: &mut Segment) {
        if let Some(performer_id) = self.performer_id {
            segment.performer_id = performer_id;
        }
        if let Some(start_time) = self.start_time {
            segment.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            segment.end_time = end_time;
        }
        if let Some(annotation) = self.annotation {
            segment.annotation = annotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let segment = Segment::new("s1", "a", 10.0, 20.0);
        assert!(!segment.contains(9.99));
        assert!(segment.contains(10.0));
        assert!(segment.contains(15.0));
        assert!(segment.contains(20.0));
        assert!(!segment.contains(20.01));
    }

    #[test]
    fn test_elapsed_at() {
        let segment = Segment::new("s1", "a", 10.0, 20.0);
        assert_eq!(segment.elapsed_at(5.0), 0.0);
        // Exactly at the start nothing has been sung yet.
        assert_eq!(segment.elapsed_at(10.0), 0.0);
        assert_eq!(segment.elapsed_at(12.5), 2.5);
        assert_eq!(segment.elapsed_at(20.0), 10.0);
        assert_eq!(segment.elapsed_at(30.0), 10.0);
    }

    #[test]
    fn test_invalid_range_is_reported_not_rejected() {
        let segment = Segment::new("s1", "a", 5.0, 5.0);
        assert!(!segment.is_valid());
        assert_eq!(segment.length(), 0.0);
        assert!(Segment::new("s2", "a", 0.0, 1.0).is_valid());
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut segment = Segment::new("s1", "a", 0.0, 10.0).annotated("intro");
        SegmentPatch {
            end_time: Some(12.0),
            ..Default::default()
        }
        .apply(&mut segment);
        assert_eq!(segment.start_time, 0.0);
        assert_eq!(segment.end_time, 12.0);
        assert_eq!(segment.annotation.as_deref(), Some("intro"));

        SegmentPatch {
            performer_id: Some("b".to_string()),
            annotation: Some(None),
            ..Default::default()
        }
        .apply(&mut segment);
        assert_eq!(segment.performer_id, "b");
        assert!(segment.annotation.is_none());
    }
}
