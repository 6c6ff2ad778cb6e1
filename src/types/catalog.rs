use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub color: String,
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub release_year: String,
    /// Display label such as "3:01".
    pub duration: String,
    pub video_id: String,
    pub distribution_id: String,
}

impl Group {
    pub fn song(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }
}

/// Which group the user is browsing. Owned by whoever renders the catalog
/// and handed down to the code that needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    group_id: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, group: &Group) {
        self.group_id = Some(group.id.clone());
    }

    pub fn clear(&mut self) {
        self.group_id = None;
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    /// Resolves the selection against a freshly loaded group list. A stale
    /// id resolves to `None`.
    pub fn group<'a>(&self, groups: &'a [Group]) -> Option<&'a Group> {
        let id = self.group_id.as_deref()?;
        groups.iter().find(|g| g.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str, songs: &[&str]) -> Group {
        Group {
            id: id.to_string(),
            name: id.to_uppercase(),
            color: "#8d2de2".to_string(),
            songs: songs
                .iter()
                .map(|s| Song {
                    id: s.to_string(),
                    title: s.to_string(),
                    release_year: "2020".to_string(),
                    duration: "3:00".to_string(),
                    video_id: format!("vid-{s}"),
                    distribution_id: format!("dist-{s}"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_selection_resolves_against_groups() {
        let groups = vec![group("g1", &["a"]), group("g2", &["b", "c"])];
        let mut selection = Selection::new();
        assert!(selection.group(&groups).is_none());

        selection.select(&groups[1]);
        assert_eq!(selection.group_id(), Some("g2"));
        let selected = selection.group(&groups).unwrap();
        assert_eq!(selected.song("c").map(|s| s.distribution_id.as_str()), Some("dist-c"));
        assert!(selected.song("a").is_none());

        // Stale selection after a reload
        assert!(selection.group(&groups[..1]).is_none());
        selection.clear();
        assert!(selection.group_id().is_none());
    }
}
