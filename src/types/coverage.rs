use serde::{Deserialize, Serialize};

/// Per-performer share of a song at a given playback position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageStat {
    pub performer_id: String,
    /// Sum of segment lengths.
    pub total_time: f64,
    /// Portion of `total_time` already played.
    pub elapsed: f64,
    /// `total_time` as a percentage of the song duration.
    pub percentage: f64,
}

impl CoverageStat {
    /// Elapsed as a percentage of this performer's own total.
    pub fn progress(&self) -> f64 {
        if self.total_time > 0.0 {
            self.elapsed / self.total_time * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageSummary {
    pub total_assigned: f64,
    pub duration: f64,
    /// May exceed 100 when segments overlap.
    pub percentage: f64,
}

impl CoverageSummary {
    pub fn from_stats(stats: &[CoverageStat], duration: f64) -> Self {
        let total_assigned: f64 = stats.iter().map(|s| s.total_time).sum();
        let percentage = if duration > 0.0 {
            total_assigned / duration * 100.0
        } else {
            0.0
        };
        CoverageSummary {
            total_assigned,
            duration,
            percentage,
        }
    }
}
