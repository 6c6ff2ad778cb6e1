use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{StoreError, StoreResult, TimelineStore};
use crate::types::timeline::Timeline;

/// Keeps every saved timeline in one JSON array on disk.
///
/// A missing file reads as an empty store. Writes go to a temp file in the
/// same directory and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> StoreResult<Vec<Timeline>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&json).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, timelines: &[Timeline], id: &str) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(timelines).map_err(|source| StoreError::Encode {
            id: id.to_string(),
            source,
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(json.as_bytes()).map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl TimelineStore for JsonFileStore {
    fn load(&self, id: &str) -> StoreResult<Option<Timeline>> {
        Ok(self.read_all()?.into_iter().find(|t| t.id == id))
    }

    fn save(&mut self, timeline: &Timeline) -> StoreResult<()> {
        let mut timelines = self.read_all()?;
        timelines.retain(|t| t.id != timeline.id);
        timelines.push(timeline.clone());
        self.write_all(&timelines, &timeline.id)?;
        debug!(id = %timeline.id, path = %self.path.display(), "saved timeline");
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Timeline>> {
        self.read_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::performer::Performer;
    use crate::types::segment::Segment;

    fn sample(id: &str) -> Timeline {
        let mut timeline = Timeline::with_id(id);
        timeline.group_name = "BLACKPINK".to_string();
        timeline.song_title = "How You Like That".to_string();
        timeline.video_id = "ioNng23DkIM".to_string();
        timeline.total_duration = Some(181.0);
        timeline.add_performer(Performer::new("member-1", "Jisoo", "#FF5733"));
        timeline.add_segment(Segment::new("line-1", "member-1", 10.0, 15.0).annotated("verse"));
        timeline
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));
        assert!(store.list().unwrap().is_empty());
        assert!(store.load("x").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested/timelines.json"));
        let timeline = sample("dist-1");
        store.save(&timeline).unwrap();

        let loaded = store.load("dist-1").unwrap().unwrap();
        assert_eq!(loaded, timeline);
    }

    #[test]
    fn test_save_replaces_same_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("timelines.json"));
        let mut timeline = sample("dist-1");
        store.save(&timeline).unwrap();
        store.save(&sample("dist-2")).unwrap();

        timeline.song_title = "Pink Venom".to_string();
        store.save(&timeline).unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(store.load("dist-1").unwrap().unwrap().song_title, "Pink Venom");
    }

    #[test]
    fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timelines.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.load("x"), Err(StoreError::Malformed { .. })));
        // Refuses to overwrite what it cannot read
        assert!(store.save(&sample("dist-1")).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
