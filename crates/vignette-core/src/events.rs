//! Routing from raw input events to editor calls.
//!
//! Hosts feed raw pointer and keyboard events here. The router tracks
//! button, modifier, and double-click state through [`InputState`] and
//! dispatches the matching [`SceneEditor`] entry point, so hosts never
//! re-implement click counting or button bookkeeping.

use crate::editor::SceneEditor;
use crate::input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};

/// Translates raw input events into editor calls.
#[derive(Debug, Clone, Default)]
pub struct EventRouter {
    input: InputState,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input state, for hosts that draw cursors or chrome.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    /// Feed a raw pointer event.
    ///
    /// The second press of a double-click dispatches as `double_click`
    /// instead of a fresh `pointer_down`; moves are forwarded only while
    /// the left button is held, since hover never affects a gesture.
    pub fn pointer_event(&mut self, editor: &mut SceneEditor, event: &PointerEvent) {
        self.input.begin_frame();
        self.input.handle_pointer_event(event);
        match *event {
            PointerEvent::Down { position, button } => {
                if button == MouseButton::Left && self.input.is_double_click() {
                    editor.double_click(position);
                } else {
                    editor.pointer_down(position, button);
                }
            }
            PointerEvent::Move { position } => {
                if self.input.is_button_pressed(MouseButton::Left) {
                    editor.pointer_move(position);
                }
            }
            PointerEvent::Up { button, .. } => {
                if button == MouseButton::Left {
                    editor.pointer_up();
                }
            }
        }
    }

    /// Feed a raw keyboard event. Only presses map to actions; the editor
    /// suppresses the whole layer while a text field has focus.
    pub fn key_event(
        &mut self,
        editor: &mut SceneEditor,
        event: &KeyEvent,
        text_input_focused: bool,
    ) {
        if let KeyEvent::Pressed(key) = event {
            editor.handle_key(key, self.input.modifiers, text_input_focused);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BubbleShape, CanvasElement, ElementId, TextElement};
    use crate::scene::{ArtStyle, Scene};
    use kurbo::Point;
    use uuid::Uuid;

    fn editor_with_text_at(x: f64, y: f64) -> (SceneEditor, ElementId) {
        let element = CanvasElement::Text(TextElement::new(
            BubbleShape::Rectangle,
            Point::new(x, y),
        ));
        let id = element.id();
        let mut editor = SceneEditor::new();
        editor.load_scene(&Scene {
            id: Uuid::new_v4(),
            name: "Test".into(),
            description: String::new(),
            image_url: String::new(),
            art_style: ArtStyle::Anime,
            dialogues: Vec::new(),
            characters: Vec::new(),
            elements: vec![element],
        });
        (editor, id)
    }

    fn click(router: &mut EventRouter, editor: &mut SceneEditor, pos: Point, button: MouseButton) {
        router.pointer_event(editor, &PointerEvent::Down {
            position: pos,
            button,
        });
        router.pointer_event(editor, &PointerEvent::Up {
            position: pos,
            button,
        });
    }

    #[test]
    fn test_routed_drag_moves_element() {
        let (mut editor, id) = editor_with_text_at(100.0, 100.0);
        let mut router = EventRouter::new();

        router.pointer_event(&mut editor, &PointerEvent::Down {
            position: Point::new(110.0, 110.0),
            button: MouseButton::Left,
        });
        router.pointer_event(&mut editor, &PointerEvent::Move {
            position: Point::new(210.0, 160.0),
        });
        router.pointer_event(&mut editor, &PointerEvent::Up {
            position: Point::new(210.0, 160.0),
            button: MouseButton::Left,
        });

        assert_eq!(
            editor.elements().iter().find(|e| e.id() == id).map(|e| e.position()),
            Some(Point::new(200.0, 150.0))
        );
        editor.undo();
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_hover_moves_are_not_forwarded() {
        let (mut editor, id) = editor_with_text_at(100.0, 100.0);
        let mut router = EventRouter::new();

        // Select, release, then move without any button held.
        click(&mut router, &mut editor, Point::new(110.0, 110.0), MouseButton::Left);
        router.pointer_event(&mut editor, &PointerEvent::Move {
            position: Point::new(500.0, 500.0),
        });
        assert_eq!(editor.elements()[0].position(), Point::new(100.0, 100.0));
        assert_eq!(editor.selected_id(), Some(id));
    }

    #[test]
    fn test_second_press_routes_as_double_click() {
        let (mut editor, id) = editor_with_text_at(100.0, 100.0);
        let mut router = EventRouter::new();
        let pos = Point::new(110.0, 110.0);

        click(&mut router, &mut editor, pos, MouseButton::Left);
        assert_eq!(editor.editing_id(), None);

        router.pointer_event(&mut editor, &PointerEvent::Down {
            position: pos,
            button: MouseButton::Left,
        });
        assert_eq!(editor.editing_id(), Some(id));
    }

    #[test]
    fn test_right_press_opens_context_menu() {
        let (mut editor, _) = editor_with_text_at(100.0, 100.0);
        let mut router = EventRouter::new();

        router.pointer_event(&mut editor, &PointerEvent::Down {
            position: Point::new(110.0, 110.0),
            button: MouseButton::Right,
        });
        assert!(editor.context_menu().is_some());
    }

    #[test]
    fn test_routed_undo_shortcut() {
        let (mut editor, _) = editor_with_text_at(100.0, 100.0);
        let mut router = EventRouter::new();
        editor.add_bubble(BubbleShape::SpeechBubble, None, None);
        assert_eq!(editor.elements().len(), 2);

        router.set_modifiers(Modifiers {
            ctrl: true,
            ..Modifiers::default()
        });
        router.key_event(&mut editor, &KeyEvent::Pressed("z".into()), false);
        assert_eq!(editor.elements().len(), 1);

        // Releases and focused inputs do nothing.
        router.key_event(&mut editor, &KeyEvent::Released("z".into()), false);
        router.key_event(&mut editor, &KeyEvent::Pressed("y".into()), true);
        assert_eq!(editor.elements().len(), 1);
    }
}
