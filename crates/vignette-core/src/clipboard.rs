//! Single-slot element clipboard.

use kurbo::Point;

use crate::element::CanvasElement;

/// Fallback paste position when no pointer location is available
/// (keyboard paste).
pub const PASTE_FALLBACK: Point = Point::new(10.0, 10.0);

/// Holds at most one copied element.
///
/// Copying overwrites the slot. Pasting clones the stored element with a
/// fresh id, so repeated pastes yield independent elements and the slot
/// itself is never aliased by the scene.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Option<CanvasElement>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self { slot: None }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Store a copy of an element.
    pub fn copy(&mut self, element: &CanvasElement) {
        self.slot = Some(element.clone());
    }

    /// Produce a pasteable element at the given position, or None when
    /// the clipboard is empty.
    pub fn paste_at(&self, position: Point) -> Option<CanvasElement> {
        let mut element = self.slot.clone()?;
        element.regenerate_id();
        element.set_position(position);
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BubbleShape, TextElement};

    #[test]
    fn test_empty_clipboard_pastes_nothing() {
        let clipboard = Clipboard::new();
        assert!(clipboard.paste_at(PASTE_FALLBACK).is_none());
    }

    #[test]
    fn test_paste_gets_fresh_id_and_position() {
        let original = CanvasElement::Text(TextElement::new(
            BubbleShape::SpeechBubble,
            Point::new(100.0, 100.0),
        ));
        let mut clipboard = Clipboard::new();
        clipboard.copy(&original);

        let pasted = clipboard.paste_at(Point::new(10.0, 10.0)).unwrap();
        assert_ne!(pasted.id(), original.id());
        assert_eq!(pasted.position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_repeated_pastes_are_independent() {
        let original = CanvasElement::Text(TextElement::new(
            BubbleShape::Rectangle,
            Point::new(0.0, 0.0),
        ));
        let mut clipboard = Clipboard::new();
        clipboard.copy(&original);

        let mut first = clipboard.paste_at(Point::new(10.0, 10.0)).unwrap();
        let second = clipboard.paste_at(Point::new(20.0, 20.0)).unwrap();
        assert_ne!(first.id(), second.id());

        // Mutating one copy leaves the other alone.
        first.set_position(Point::new(500.0, 500.0));
        assert_eq!(second.position(), Point::new(20.0, 20.0));
    }
}
