//! Keyboard shortcut registry and key-to-action mapping.

use crate::editor::EditorAction;
use crate::input::Modifiers;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    /// Requires Ctrl (or Cmd on macOS).
    pub command: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        command: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            command,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("C", true, false, "Copy selected element"),
            Shortcut::new("V", true, false, "Paste"),
            Shortcut::new("Delete", false, false, "Delete selected element"),
            Shortcut::new("Backspace", false, false, "Delete selected element"),
        ]
    }
}

/// Map a key press to an editor action.
///
/// Keys are matched case-insensitively. Returns None for unbound
/// combinations; callers suppress the whole layer while a text field has
/// focus.
pub fn action_for(key: &str, modifiers: Modifiers) -> Option<EditorAction> {
    let command = modifiers.command();
    match key.to_ascii_lowercase().as_str() {
        "z" if command && modifiers.shift => Some(EditorAction::Redo),
        "z" if command => Some(EditorAction::Undo),
        "y" if command => Some(EditorAction::Redo),
        "c" if command => Some(EditorAction::CopySelected),
        "v" if command => Some(EditorAction::Paste),
        "delete" | "backspace" if !command => Some(EditorAction::DeleteSelected),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods(ctrl: bool, shift: bool, meta: bool) -> Modifiers {
        Modifiers {
            ctrl,
            shift,
            meta,
            ..Modifiers::default()
        }
    }

    #[test]
    fn test_undo_redo_bindings() {
        assert_eq!(
            action_for("z", mods(true, false, false)),
            Some(EditorAction::Undo)
        );
        assert_eq!(
            action_for("Z", mods(true, true, false)),
            Some(EditorAction::Redo)
        );
        assert_eq!(
            action_for("y", mods(true, false, false)),
            Some(EditorAction::Redo)
        );
        // Cmd works in place of Ctrl.
        assert_eq!(
            action_for("z", mods(false, false, true)),
            Some(EditorAction::Undo)
        );
    }

    #[test]
    fn test_clipboard_and_delete_bindings() {
        assert_eq!(
            action_for("c", mods(true, false, false)),
            Some(EditorAction::CopySelected)
        );
        assert_eq!(
            action_for("v", mods(true, false, false)),
            Some(EditorAction::Paste)
        );
        assert_eq!(
            action_for("Delete", mods(false, false, false)),
            Some(EditorAction::DeleteSelected)
        );
        assert_eq!(
            action_for("Backspace", mods(false, false, false)),
            Some(EditorAction::DeleteSelected)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(action_for("z", mods(false, false, false)), None);
        assert_eq!(action_for("a", mods(true, false, false)), None);
        assert_eq!(action_for("Delete", mods(true, false, false)), None);
    }

    #[test]
    fn test_registry_formats() {
        let all = ShortcutRegistry::all();
        assert!(all.iter().any(|s| s.format() == "Ctrl+Z"));
        assert!(all.iter().any(|s| s.format() == "Ctrl+Shift+Z"));
    }
}
