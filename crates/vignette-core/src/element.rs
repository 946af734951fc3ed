//! Canvas element definitions for the scene editor.

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scene::{CharacterId, SceneId};

/// Unique identifier for canvas elements.
pub type ElementId = Uuid;

/// Minimum element width and height in pixels.
pub const MIN_ELEMENT_SIZE: f64 = 50.0;

/// Minimum font size in pixels.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Radius of the bottom-right resize handle hit area.
pub const RESIZE_HANDLE_RADIUS: f64 = 12.0;

/// Serializable color representation (RGBA8).
///
/// Serialized as a CSS hex string (`#rrggbb`, or `#rrggbbaa` when not
/// fully opaque) so element JSON stays readable and interoperable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse a CSS hex color: `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        // Slicing below is by byte offset; multi-byte input must bail here.
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::new(r * 17, g * 17, b * 17, 255))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b, 255))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Format as a CSS hex string.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for SerializableColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SerializableColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s}")))
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Outline silhouette of a text bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BubbleShape {
    /// Plain rectangular text box.
    #[default]
    Rectangle,
    /// Rounded bubble with a tail pointing at the speaker.
    SpeechBubble,
    /// Cloud bubble with trailing thought circles.
    ThoughtBubble,
    /// Spiky star burst for shouting.
    ShoutBubble,
}

impl BubbleShape {
    /// Get all bubble shapes in menu order.
    pub fn all() -> &'static [BubbleShape] {
        &[
            BubbleShape::SpeechBubble,
            BubbleShape::ThoughtBubble,
            BubbleShape::ShoutBubble,
            BubbleShape::Rectangle,
        ]
    }

    /// Display name for menus.
    pub fn display_name(&self) -> &'static str {
        match self {
            BubbleShape::Rectangle => "Text Box",
            BubbleShape::SpeechBubble => "Speech Bubble",
            BubbleShape::ThoughtBubble => "Thought Bubble",
            BubbleShape::ShoutBubble => "Shout Bubble",
        }
    }
}

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Toggle between normal and bold.
    pub fn toggled(self) -> Self {
        match self {
            FontWeight::Normal => FontWeight::Bold,
            FontWeight::Bold => FontWeight::Normal,
        }
    }
}

/// Font style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn toggled(self) -> Self {
        match self {
            FontStyle::Normal => FontStyle::Italic,
            FontStyle::Italic => FontStyle::Normal,
        }
    }
}

/// Text decoration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

impl TextDecoration {
    pub fn toggled(self) -> Self {
        match self {
            TextDecoration::None => TextDecoration::Underline,
            TextDecoration::Underline => TextDecoration::None,
        }
    }
}

/// Visual style of a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Text color.
    pub color: SerializableColor,
    /// Bubble fill color.
    pub background_color: SerializableColor,
    /// Font size in pixels (floor of 8).
    pub font_size: f64,
    /// Font family name as understood by the text stack.
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            background_color: SerializableColor::white(),
            font_size: 16.0,
            font_family: "Arial".to_string(),
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            text_decoration: TextDecoration::default(),
        }
    }
}

/// A text bubble on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: ElementId,
    pub shape: BubbleShape,
    pub content: String,
    /// Top-left corner in scene coordinates.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub style: TextStyle,
    /// Scene this element links to when clicked (weak reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_scene_id: Option<SceneId>,
}

impl TextElement {
    /// Default content for a freshly added bubble.
    pub const DEFAULT_CONTENT: &'static str = "Double-click to edit...";

    /// Create a new text bubble with the default size and style.
    pub fn new(shape: BubbleShape, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape,
            content: Self::DEFAULT_CONTENT.to_string(),
            position,
            width: 250.0,
            height: 100.0,
            style: TextStyle::default(),
            next_scene_id: None,
        }
    }

    /// Set the initial content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// A character image placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: ElementId,
    /// Character this image came from (weak reference).
    pub character_id: CharacterId,
    pub image_url: String,
    /// Top-left corner in scene coordinates.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_scene_id: Option<SceneId>,
}

impl ImageElement {
    /// Default side length of a dropped character image.
    pub const DROP_SIZE: f64 = 150.0;

    /// Create a character image centered on a drop point.
    pub fn dropped_at(character_id: CharacterId, image_url: String, drop: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            character_id,
            image_url,
            position: Point::new(
                drop.x - Self::DROP_SIZE / 2.0,
                drop.y - Self::DROP_SIZE / 2.0,
            ),
            width: Self::DROP_SIZE,
            height: Self::DROP_SIZE,
            next_scene_id: None,
        }
    }
}

/// Enum wrapper for all element types (for serialization and dispatch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CanvasElement {
    Text(TextElement),
    Image(ImageElement),
}

impl CanvasElement {
    pub fn id(&self) -> ElementId {
        match self {
            CanvasElement::Text(e) => e.id,
            CanvasElement::Image(e) => e.id,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            CanvasElement::Text(e) => e.position,
            CanvasElement::Image(e) => e.position,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            CanvasElement::Text(e) => e.position = position,
            CanvasElement::Image(e) => e.position = position,
        }
    }

    pub fn size(&self) -> (f64, f64) {
        match self {
            CanvasElement::Text(e) => (e.width, e.height),
            CanvasElement::Image(e) => (e.width, e.height),
        }
    }

    /// Set the element size, clamped to the minimum.
    pub fn set_size(&mut self, width: f64, height: f64) {
        let width = width.max(MIN_ELEMENT_SIZE);
        let height = height.max(MIN_ELEMENT_SIZE);
        match self {
            CanvasElement::Text(e) => {
                e.width = width;
                e.height = height;
            }
            CanvasElement::Image(e) => {
                e.width = width;
                e.height = height;
            }
        }
    }

    /// Get the bounding box in scene coordinates.
    pub fn bounds(&self) -> Rect {
        let pos = self.position();
        let (w, h) = self.size();
        Rect::new(pos.x, pos.y, pos.x + w, pos.y + h)
    }

    /// Check if a point (in scene coordinates) hits this element.
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Center of the bottom-right resize handle.
    pub fn resize_handle_center(&self) -> Point {
        let bounds = self.bounds();
        Point::new(bounds.x1, bounds.y1)
    }

    /// Check if a point hits the resize handle.
    pub fn hit_resize_handle(&self, point: Point) -> bool {
        let center = self.resize_handle_center();
        let dx = point.x - center.x;
        let dy = point.y - center.y;
        dx * dx + dy * dy <= RESIZE_HANDLE_RADIUS * RESIZE_HANDLE_RADIUS
    }

    /// Regenerate the element's ID with a new unique identifier.
    /// Used when pasting or duplicating so copies stay independent.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            CanvasElement::Text(e) => e.id = new_id,
            CanvasElement::Image(e) => e.id = new_id,
        }
    }

    pub fn next_scene_id(&self) -> Option<SceneId> {
        match self {
            CanvasElement::Text(e) => e.next_scene_id,
            CanvasElement::Image(e) => e.next_scene_id,
        }
    }

    pub fn set_next_scene_id(&mut self, scene_id: Option<SceneId>) {
        match self {
            CanvasElement::Text(e) => e.next_scene_id = scene_id,
            CanvasElement::Image(e) => e.next_scene_id = scene_id,
        }
    }

    /// Get the text element if this is a text bubble.
    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            CanvasElement::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextElement> {
        match self {
            CanvasElement::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Check if this element is a character image.
    pub fn is_image(&self) -> bool {
        matches!(self, CanvasElement::Image(_))
    }
}
