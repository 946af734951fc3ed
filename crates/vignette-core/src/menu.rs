//! Context menu model.
//!
//! The menu is pure data; the host draws it and reports which entry was
//! picked. It lives on the editor and is closed by any pointer-down that
//! lands outside it, or as soon as an entry fires.

use kurbo::Point;

use crate::element::{BubbleShape, CanvasElement, ElementId};

/// What the menu was opened on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuTarget {
    /// Bare canvas at a scene position.
    Canvas(Point),
    /// A specific element.
    Element(ElementId),
}

/// An action a menu entry triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    EditText,
    Copy,
    Delete,
    BringToFront,
    SendToBack,
    Paste,
    AddBubble(BubbleShape),
}

/// A single menu row.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Action {
        label: &'static str,
        action: MenuAction,
        enabled: bool,
    },
    Divider,
}

impl MenuEntry {
    fn action(label: &'static str, action: MenuAction) -> Self {
        MenuEntry::Action {
            label,
            action,
            enabled: true,
        }
    }

    fn disabled(label: &'static str, action: MenuAction) -> Self {
        MenuEntry::Action {
            label,
            action,
            enabled: false,
        }
    }
}

/// An open context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    /// Where the menu is anchored, in scene coordinates.
    pub position: Point,
    pub target: MenuTarget,
    pub entries: Vec<MenuEntry>,
}

impl ContextMenu {
    /// Menu for a right-click on empty canvas.
    pub fn for_canvas(position: Point, clipboard_empty: bool) -> Self {
        let paste = if clipboard_empty {
            MenuEntry::disabled("Paste", MenuAction::Paste)
        } else {
            MenuEntry::action("Paste", MenuAction::Paste)
        };
        let mut entries = vec![paste, MenuEntry::Divider];
        for shape in BubbleShape::all() {
            entries.push(MenuEntry::action(
                shape.display_name(),
                MenuAction::AddBubble(*shape),
            ));
        }
        Self {
            position,
            target: MenuTarget::Canvas(position),
            entries,
        }
    }

    /// Menu for a right-click on an element.
    pub fn for_element(position: Point, element: &CanvasElement) -> Self {
        let mut entries = Vec::new();
        if element.as_text().is_some() {
            entries.push(MenuEntry::action("Edit Text", MenuAction::EditText));
        }
        entries.push(MenuEntry::action("Copy", MenuAction::Copy));
        entries.push(MenuEntry::action("Delete", MenuAction::Delete));
        entries.push(MenuEntry::Divider);
        entries.push(MenuEntry::action("Bring to Front", MenuAction::BringToFront));
        entries.push(MenuEntry::action("Send to Back", MenuAction::SendToBack));
        Self {
            position,
            target: MenuTarget::Element(element.id()),
            entries,
        }
    }

    /// Find an enabled entry by its action.
    pub fn entry(&self, action: MenuAction) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| match e {
            MenuEntry::Action { action: a, .. } => *a == action,
            MenuEntry::Divider => false,
        })
    }
}
