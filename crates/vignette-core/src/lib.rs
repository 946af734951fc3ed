//! Vignette Core Library
//!
//! Platform-agnostic data structures and editing logic for the Vignette
//! scene canvas: elements, bubble geometry, history, clipboard, and the
//! pointer/keyboard interaction controller.

pub mod clipboard;
pub mod editor;
pub mod element;
pub mod events;
pub mod geometry;
pub mod history;
pub mod input;
pub mod menu;
pub mod scene;
pub mod shortcuts;
pub mod store;

pub use clipboard::Clipboard;
pub use editor::{EditorAction, Gesture, SceneEditor};
pub use element::{
    BubbleShape, CanvasElement, ElementId, FontStyle, FontWeight, ImageElement,
    SerializableColor, TextDecoration, TextElement, TextStyle, MIN_ELEMENT_SIZE, MIN_FONT_SIZE,
};
pub use events::EventRouter;
pub use history::History;
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use menu::{ContextMenu, MenuAction, MenuEntry, MenuTarget};
pub use scene::{ArtStyle, Character, CharacterId, Scene, SceneId};
pub use store::ElementStore;
