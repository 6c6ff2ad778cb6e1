use crate::types::performer::Performer;
use crate::types::segment::Segment;

/// Shortest length a segment may be trimmed down to.
pub const MIN_SEGMENT_LENGTH: f64 = 1.0;

/// Total adjustments smaller than this are ignored.
pub const ADJUST_DEADBAND: f64 = 1.0;

/// Builds one contiguous segment per performer, in list order, splitting
/// `total_duration` evenly. Returns an empty list for no performers.
pub fn even_split(performers: &[Performer], total_duration: f64) -> Vec<Segment> {
    if performers.is_empty() {
        return Vec::new();
    }
    let share = total_duration / performers.len() as f64;
    performers
        .iter()
        .enumerate()
        .map(|(i, performer)| {
            Segment::with_generated_id(
                performer.id.clone(),
                i as f64 * share,
                (i + 1) as f64 * share,
            )
            .annotated(format!("{} part {}", performer.name, i + 1))
        })
        .collect()
}

/// New end time for `segment` after moving its end by `delta`.
/// Shortening never leaves the segment below [`MIN_SEGMENT_LENGTH`].
pub fn shifted_end(segment: &Segment, delta: f64) -> f64 {
    let end = segment.end_time + delta;
    if delta < 0.0 {
        end.max(segment.start_time + MIN_SEGMENT_LENGTH)
    } else {
        end
    }
}
