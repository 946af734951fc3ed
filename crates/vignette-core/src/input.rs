//! Raw input events and the state tracked across them.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Platform command modifier: Ctrl, or Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

/// Keyboard event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks pointer state across events: position, held buttons, modifiers,
/// and double-click detection. Fed by [`crate::events::EventRouter`].
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position in scene coordinates.
    pub pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    /// Last click time for double-click detection.
    last_click_time: Option<Instant>,
    /// Last click position for double-click detection.
    last_click_position: Option<Point>,
    /// Whether the most recent press completed a double-click.
    double_click_detected: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            pressed_buttons: HashSet::new(),
            modifiers: Modifiers::default(),
            last_click_time: None,
            last_click_position: None,
            double_click_detected: false,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-event state before processing the next event.
    pub fn begin_frame(&mut self) {
        self.double_click_detected = false;
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.insert(button);
                if button == MouseButton::Left {
                    self.detect_double_click(position);
                }
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
            }
        }
    }

    fn detect_double_click(&mut self, position: Point) {
        let now = Instant::now();
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position)
        {
            let elapsed = now.duration_since(last_time).as_millis();
            let distance = (position - last_pos).hypot();
            if elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE {
                self.double_click_detected = true;
                // Reset so a triple-click is not counted as another double.
                self.last_click_time = None;
                self.last_click_position = None;
                return;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Check if the most recent press completed a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_press_and_release() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(input.is_button_pressed(MouseButton::Left));
        assert!(!input.is_button_pressed(MouseButton::Right));

        input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(!input.is_button_pressed(MouseButton::Left));
    }

    #[test]
    fn test_double_click_detection() {
        let mut input = InputState::new();
        let pos = Point::new(100.0, 100.0);

        input.handle_pointer_event(&PointerEvent::Down {
            position: pos,
            button: MouseButton::Left,
        });
        assert!(!input.is_double_click());
        input.handle_pointer_event(&PointerEvent::Up {
            position: pos,
            button: MouseButton::Left,
        });
        input.begin_frame();

        input.handle_pointer_event(&PointerEvent::Down {
            position: pos,
            button: MouseButton::Left,
        });
        assert!(input.is_double_click());

        input.begin_frame();
        assert!(!input.is_double_click());
    }

    #[test]
    fn test_double_click_too_far() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        input.begin_frame();

        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(200.0, 200.0),
            button: MouseButton::Left,
        });
        assert!(!input.is_double_click());
    }

    #[test]
    fn test_right_button_never_double_clicks() {
        let mut input = InputState::new();
        let pos = Point::new(100.0, 100.0);
        for _ in 0..3 {
            input.begin_frame();
            input.handle_pointer_event(&PointerEvent::Down {
                position: pos,
                button: MouseButton::Right,
            });
            input.handle_pointer_event(&PointerEvent::Up {
                position: pos,
                button: MouseButton::Right,
            });
        }
        assert!(!input.is_double_click());
    }

    #[test]
    fn test_command_modifier() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert!(ctrl.command());
        assert!(meta.command());
        assert!(!Modifiers::default().command());
    }
}
