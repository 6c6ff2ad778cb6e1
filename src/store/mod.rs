//! Persistence boundary for timelines and the group catalog.
//!
//! Stores report failures through [`StoreError`]; [`Library`] sits on top
//! and turns them into the `Option`/`bool` results the sessions expect,
//! falling back to demo data where it can.

mod library;
mod local;
mod mock;

pub use library::Library;
pub use local::JsonFileStore;
pub use mock::MockStore;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ops::video_funcs::format_time;
use crate::types::catalog::{Group, Song};
use crate::types::timeline::{DEFAULT_FALLBACK_DURATION, Timeline};

/// Color given to groups that were created implicitly from a saved timeline.
pub const DEFAULT_GROUP_COLOR: &str = "#8d2de2";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed store document {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode timeline {id}: {source}")]
    Encode {
        id: String,
        source: serde_json::Error,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait TimelineStore {
    /// `Ok(None)` when no timeline has this id.
    fn load(&self, id: &str) -> StoreResult<Option<Timeline>>;

    /// Inserts or replaces the timeline with the same id.
    fn save(&mut self, timeline: &Timeline) -> StoreResult<()>;

    fn list(&self) -> StoreResult<Vec<Timeline>>;

    /// Groups and their songs. By default derived from the stored timelines.
    fn groups(&self) -> StoreResult<Vec<Group>> {
        Ok(groups_from_timelines(&self.list()?))
    }
}

/// Buckets timelines by group name. Groups and songs come back sorted by name.
pub fn groups_from_timelines(timelines: &[Timeline]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for timeline in timelines {
        let song = Song {
            id: timeline.id.clone(),
            title: timeline.song_title.clone(),
            release_year: String::new(),
            duration: format_time(timeline.effective_duration(DEFAULT_FALLBACK_DURATION)),
            video_id: timeline.video_id.clone(),
            distribution_id: timeline.id.clone(),
        };
        match groups.iter_mut().find(|g| g.name == timeline.group_name) {
            Some(group) => group.songs.push(song),
            None => groups.push(Group {
                id: timeline.group_name.clone(),
                name: timeline.group_name.clone(),
                color: DEFAULT_GROUP_COLOR.to_string(),
                songs: vec![song],
            }),
        }
    }
    for group in &mut groups {
        group.songs.sort_by(|a, b| a.title.cmp(&b.title));
    }
    groups.sort_by(|a, b| a.name.cmp(&b.name));
    groups
}
