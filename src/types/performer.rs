use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Someone who can be assigned segments of a song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Role label such as "Main Vocal".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Performer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Performer {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            image_url: None,
            position: None,
        }
    }

    /// Creates a performer with a freshly minted id.
    pub fn with_generated_id(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, color)
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted_from_json() {
        let performer = Performer::new("member-1", "Jisoo", "#FF5733");
        let json = serde_json::to_string(&performer).unwrap();
        assert_eq!(json, r##"{"id":"member-1","name":"Jisoo","color":"#FF5733"}"##);
    }

    #[test]
    fn test_builder_sets_role_and_image() {
        let performer = Performer::with_generated_id("Lisa", "#FF33A8")
            .position("Main Dancer")
            .image_url("/img/lisa.png");
        assert!(!performer.id.is_empty());
        assert_eq!(performer.position.as_deref(), Some("Main Dancer"));
        assert_eq!(performer.image_url.as_deref(), Some("/img/lisa.png"));

        let json = serde_json::to_string(&performer).unwrap();
        assert!(json.contains(r#""imageUrl":"/img/lisa.png""#));
        let parsed: Performer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, performer);
    }
}
