//! Scene and character model shared with the surrounding application.
//!
//! The editor owns element editing only; scenes and characters are managed
//! elsewhere and cross the boundary as JSON, so the serde shapes here use
//! camelCase to match that wire format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::CanvasElement;

/// Unique identifier for scenes.
pub type SceneId = Uuid;

/// Unique identifier for characters.
pub type CharacterId = Uuid;

/// Visual style a scene or character was generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtStyle {
    #[default]
    Anime,
    Realistic,
    Cartoon,
    Pixel,
    Watercolor,
    Oil,
}

/// A cast member that can be dragged onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    pub art_style: ArtStyle,
    pub image_url: String,
}

/// A single scene of the comic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    pub description: String,
    /// Background image URL.
    pub image_url: String,
    pub art_style: ArtStyle,
    #[serde(default)]
    pub dialogues: Vec<String>,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub elements: Vec<CanvasElement>,
}

/// Parse a character drag-and-drop payload.
///
/// Drops can carry arbitrary data; anything that does not deserialize as a
/// character is logged and discarded.
pub fn parse_character_payload(payload: &str) -> Option<Character> {
    match serde_json::from_str(payload) {
        Ok(character) => Some(character),
        Err(err) => {
            log::warn!("ignoring malformed character drop payload: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_character_payload() {
        let id = Uuid::new_v4();
        let payload = format!(
            r#"{{"id":"{id}","name":"Mira","description":"The lead","artStyle":"watercolor","imageUrl":"https://img.example/mira.png"}}"#
        );
        let character = parse_character_payload(&payload).unwrap();
        assert_eq!(character.id, id);
        assert_eq!(character.name, "Mira");
        assert_eq!(character.art_style, ArtStyle::Watercolor);
    }

    #[test]
    fn test_parse_malformed_payload() {
        assert!(parse_character_payload("not json").is_none());
        assert!(parse_character_payload(r#"{"id":"nope"}"#).is_none());
    }

    #[test]
    fn test_scene_optional_collections_default() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"id":"{id}","name":"Intro","description":"","imageUrl":"","artStyle":"anime"}}"#
        );
        let scene: Scene = serde_json::from_str(&json).unwrap();
        assert!(scene.elements.is_empty());
        assert!(scene.characters.is_empty());
    }
}
