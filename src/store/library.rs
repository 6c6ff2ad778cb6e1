use tracing::{debug, error, info, warn};

use super::{JsonFileStore, MockStore, TimelineStore};
use crate::config::{StorageBackend, StorageConfig};
use crate::types::catalog::Group;
use crate::types::timeline::Timeline;

/// Front door to persistence. Failures are logged and reported as
/// `None`/`false`; nothing is retried.
pub struct Library {
    primary: Box<dyn TimelineStore>,
    fallback: Option<MockStore>,
}

impl Library {
    /// Reads fall back to the seeded demo data when `primary` fails or has
    /// no match.
    pub fn new(primary: impl TimelineStore + 'static) -> Self {
        Library {
            primary: Box::new(primary),
            fallback: Some(MockStore::seeded()),
        }
    }

    pub fn without_fallback(primary: impl TimelineStore + 'static) -> Self {
        Library {
            primary: Box::new(primary),
            fallback: None,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        match config.backend {
            StorageBackend::Local => {
                info!(path = %config.path.display(), "using local timeline store");
                Self::new(JsonFileStore::new(&config.path))
            }
            StorageBackend::Mock => {
                info!("using mock timeline store");
                Self::without_fallback(MockStore::seeded())
            }
        }
    }

    pub fn load(&self, id: &str) -> Option<Timeline> {
        match self.primary.load(id) {
            Ok(Some(timeline)) => return Some(timeline),
            Ok(None) => debug!(id, "timeline not in primary store"),
            Err(e) => error!(id, error = %e, "failed to load timeline"),
        }
        let fallback = self.fallback.as_ref()?;
        match fallback.load(id) {
            Ok(Some(timeline)) => {
                warn!(id, "serving demo timeline");
                Some(timeline)
            }
            _ => None,
        }
    }

    /// Returns false if the timeline was not persisted.
    pub fn save(&mut self, timeline: &Timeline) -> bool {
        match self.primary.save(timeline) {
            Ok(()) => {
                info!(id = %timeline.id, title = %timeline.song_title, "saved timeline");
                true
            }
            Err(e) => {
                error!(id = %timeline.id, error = %e, "failed to save timeline");
                false
            }
        }
    }

    /// A failing primary catalog is replaced by the demo catalog. An empty
    /// one is returned as is.
    pub fn groups(&self) -> Vec<Group> {
        match self.primary.groups() {
            Ok(groups) => groups,
            Err(e) => {
                error!(error = %e, "failed to load groups");
                self.fallback
                    .as_ref()
                    .and_then(|fallback| fallback.groups().ok())
                    .unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreError, StoreResult};
    use std::path::PathBuf;

    struct FailingStore;

    impl TimelineStore for FailingStore {
        fn load(&self, _id: &str) -> StoreResult<Option<Timeline>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        fn save(&mut self, _timeline: &Timeline) -> StoreResult<()> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        fn list(&self) -> StoreResult<Vec<Timeline>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn test_load_falls_back_to_demo_data() {
        let library = Library::new(FailingStore);
        let timeline = library.load("dist-3").unwrap();
        assert_eq!(timeline.song_title, "Dynamite");
        assert!(library.load("dist-404").is_none());
    }

    #[test]
    fn test_load_without_fallback() {
        let library = Library::without_fallback(FailingStore);
        assert!(library.load("dist-3").is_none());
        assert!(library.groups().is_empty());
    }

    #[test]
    fn test_failed_save_reports_false() {
        let mut library = Library::new(FailingStore);
        assert!(!library.save(&Timeline::with_id("x")));
    }

    #[test]
    fn test_primary_wins_over_fallback() {
        let mut store = MockStore::new();
        let mut mine = Timeline::with_id("dist-1");
        mine.song_title = "My Version".to_string();
        store.save(&mine).unwrap();

        let mut library = Library::new(store);
        assert_eq!(library.load("dist-1").unwrap().song_title, "My Version");
        assert!(library.save(&Timeline::with_id("other")));
        assert!(library.load("other").is_some());
    }

    #[test]
    fn test_groups_fall_back_only_on_error() {
        assert_eq!(Library::new(FailingStore).groups().len(), 3);

        let dir = tempfile::tempdir().unwrap();
        let mut library = Library::new(JsonFileStore::new(dir.path().join("t.json")));
        assert!(library.groups().is_empty());

        let mut timeline = Timeline::with_id("mine");
        timeline.group_name = "NewJeans".to_string();
        timeline.song_title = "Ditto".to_string();
        assert!(library.save(&timeline));
        let groups = library.groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "NewJeans");
    }

    #[test]
    fn test_from_config_mock_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Mock,
            path: PathBuf::from("unused.json"),
        };
        let mut library = Library::from_config(&config);
        assert!(library.load("dist-5").is_some());
        assert!(library.save(&Timeline::with_id("tmp")));
    }
}
