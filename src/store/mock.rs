use std::collections::HashMap;

use super::{StoreResult, TimelineStore, groups_from_timelines};
use crate::types::catalog::{Group, Song};
use crate::types::performer::Performer;
use crate::types::segment::Segment;
use crate::types::timeline::Timeline;

/// In-memory store, optionally seeded with demo groups and distributions.
/// Saves live only as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    groups: Vec<Group>,
    timelines: HashMap<String, Timeline>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let timelines = demo_timelines()
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();
        MockStore {
            groups: demo_groups(),
            timelines,
        }
    }
}

impl TimelineStore for MockStore {
    fn load(&self, id: &str) -> StoreResult<Option<Timeline>> {
        Ok(self.timelines.get(id).cloned())
    }

    fn save(&mut self, timeline: &Timeline) -> StoreResult<()> {
        self.timelines
            .insert(timeline.id.clone(), timeline.clone());
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Timeline>> {
        let mut timelines: Vec<_> = self.timelines.values().cloned().collect();
        timelines.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(timelines)
    }

    /// The seeded catalog, or one derived from saved timelines when unseeded.
    fn groups(&self) -> StoreResult<Vec<Group>> {
        if self.groups.is_empty() {
            return Ok(groups_from_timelines(&self.list()?));
        }
        Ok(self.groups.clone())
    }
}

fn song(id: &str, title: &str, year: &str, duration: &str, video_id: &str, dist: &str) -> Song {
    Song {
        id: id.to_string(),
        title: title.to_string(),
        release_year: year.to_string(),
        duration: duration.to_string(),
        video_id: video_id.to_string(),
        distribution_id: dist.to_string(),
    }
}

fn demo_groups() -> Vec<Group> {
    vec![
        Group {
            id: "group-1".to_string(),
            name: "BLACKPINK".to_string(),
            color: "#FF1493".to_string(),
            songs: vec![
                song("song-1", "How You Like That", "2020", "3:01", "ioNng23DkIM", "dist-1"),
                song("song-2", "DDU-DU DDU-DU", "2018", "3:29", "IHNzOHi8sJs", "dist-2"),
            ],
        },
        Group {
            id: "group-2".to_string(),
            name: "BTS".to_string(),
            color: "#9370DB".to_string(),
            songs: vec![
                song("song-3", "Dynamite", "2020", "3:19", "gdZLi9oWNZg", "dist-3"),
                song("song-4", "Butter", "2021", "2:44", "7tNtU5XFwrU", "dist-4"),
            ],
        },
        Group {
            id: "group-3".to_string(),
            name: "TWICE".to_string(),
            color: "#FF69B4".to_string(),
            songs: vec![
                song("song-5", "Fancy", "2019", "3:34", "kOHB85vDuow", "dist-5"),
                song("song-6", "Feel Special", "2019", "3:27", "3ymwOvzhwHs", "dist-6"),
            ],
        },
    ]
}

/// Builds a demo timeline where member `i` sings `spans[i]`.
fn demo_timeline(
    id: &str,
    video_id: &str,
    group: &str,
    title: &str,
    duration: f64,
    members: &[(&str, &str, &str)],
    spans: &[(&str, f64, f64)],
) -> Timeline {
    let mut timeline = Timeline::with_id(id);
    timeline.video_id = video_id.to_string();
    timeline.group_name = group.to_string();
    timeline.song_title = title.to_string();
    timeline.total_duration = Some(duration);
    for (member_id, name, color) in members {
        timeline.add_performer(Performer::new(*member_id, *name, *color));
    }
    for ((line_id, start, end), (member_id, _, _)) in spans.iter().zip(members) {
        timeline.add_segment(Segment::new(*line_id, *member_id, *start, *end));
    }
    timeline
}

fn demo_timelines() -> Vec<Timeline> {
    vec![
        demo_timeline(
            "dist-1",
            "ioNng23DkIM",
            "BLACKPINK",
            "How You Like That",
            181.0,
            &[
                ("member-1", "Jisoo", "#FF5733"),
                ("member-2", "Jennie", "#33FF57"),
                ("member-3", "Rosé", "#3357FF"),
                ("member-4", "Lisa", "#FF33A8"),
            ],
            &[
                ("line-1", 10.0, 15.0),
                ("line-2", 20.0, 30.0),
                ("line-3", 35.0, 45.0),
                ("line-4", 50.0, 65.0),
            ],
        ),
        demo_timeline(
            "dist-3",
            "gdZLi9oWNZg",
            "BTS",
            "Dynamite",
            199.0,
            &[
                ("member-5", "RM", "#5D3FD3"),
                ("member-6", "Jin", "#FF6B6B"),
                ("member-7", "Suga", "#4CAF50"),
                ("member-8", "J-Hope", "#FFC107"),
                ("member-9", "Jimin", "#03A9F4"),
                ("member-10", "V", "#9C27B0"),
                ("member-11", "Jungkook", "#E91E63"),
            ],
            &[
                ("line-5", 15.0, 25.0),
                ("line-6", 30.0, 40.0),
                ("line-7", 45.0, 55.0),
                ("line-8", 60.0, 70.0),
                ("line-9", 75.0, 85.0),
                ("line-10", 90.0, 100.0),
                ("line-11", 105.0, 120.0),
            ],
        ),
        demo_timeline(
            "dist-5",
            "kOHB85vDuow",
            "TWICE",
            "Fancy",
            214.0,
            &[
                ("member-12", "Nayeon", "#FF9800"),
                ("member-13", "Jeongyeon", "#8BC34A"),
                ("member-14", "Momo", "#F44336"),
                ("member-15", "Sana", "#FFEB3B"),
                ("member-16", "Jihyo", "#3F51B5"),
                ("member-17", "Mina", "#00BCD4"),
                ("member-18", "Dahyun", "#CDDC39"),
                ("member-19", "Chaeyoung", "#FF5722"),
                ("member-20", "Tzuyu", "#607D8B"),
            ],
            &[
                ("line-12", 10.0, 20.0),
                ("line-13", 25.0, 35.0),
                ("line-14", 40.0, 50.0),
                ("line-15", 55.0, 65.0),
                ("line-16", 70.0, 85.0),
                ("line-17", 90.0, 100.0),
                ("line-18", 105.0, 115.0),
                ("line-19", 120.0, 130.0),
                ("line-20", 135.0, 150.0),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_data() {
        let store = MockStore::seeded();
        assert_eq!(store.groups().unwrap().len(), 3);
        assert_eq!(store.list().unwrap().len(), 3);

        let dist = store.load("dist-1").unwrap().unwrap();
        assert_eq!(dist.performers().len(), 4);
        assert_eq!(dist.active_performer_at(25.0), Some("member-2"));
        assert_eq!(dist.active_performer_at(17.0), None);

        // Listed in the catalog but never authored
        assert!(store.load("dist-2").unwrap().is_none());
    }

    #[test]
    fn test_save_is_visible_to_later_loads() {
        let mut store = MockStore::new();
        assert!(store.groups().unwrap().is_empty());
        let mut timeline = Timeline::with_id("fresh");
        timeline.group_name = "IVE".to_string();
        timeline.song_title = "New Song".to_string();
        store.save(&timeline).unwrap();
        assert_eq!(store.load("fresh").unwrap(), Some(timeline));

        let groups = store.groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].songs[0].distribution_id, "fresh");
    }
}
