//! Scene editor: the pointer/keyboard interaction controller.
//!
//! Owns the element store, history, clipboard, selection, and the active
//! gesture. Transient gesture updates mutate the store directly; history
//! records exactly one snapshot per finalized action (pointer-up, text
//! commit, or a one-shot command), so undo steps match user intent.

use kurbo::{Point, Size, Vec2};
use log::debug;

use crate::clipboard::{Clipboard, PASTE_FALLBACK};
use crate::element::{
    BubbleShape, CanvasElement, ElementId, ImageElement, SerializableColor, TextElement,
    MIN_FONT_SIZE,
};
use crate::history::History;
use crate::input::{Modifiers, MouseButton};
use crate::menu::{ContextMenu, MenuAction, MenuTarget};
use crate::scene::{parse_character_payload, Scene, SceneId};
use crate::shortcuts;
use crate::store::ElementStore;

/// Actions reachable from the keyboard layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    DeleteSelected,
    CopySelected,
    Paste,
}

/// The active pointer gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    /// Moving an element; `grab_offset` keeps the grab point under the
    /// pointer.
    Dragging {
        id: ElementId,
        grab_offset: Vec2,
    },
    /// Resizing from the bottom-right handle, tracking the last pointer
    /// position for incremental deltas.
    Resizing {
        id: ElementId,
        last_pointer: Point,
    },
    /// Inline text editing with an uncommitted draft.
    EditingText {
        id: ElementId,
        draft: String,
    },
}

/// Interaction controller for the active scene.
#[derive(Debug, Clone)]
pub struct SceneEditor {
    scene_id: Option<SceneId>,
    store: ElementStore,
    history: History<Vec<CanvasElement>>,
    clipboard: Clipboard,
    selected: Option<ElementId>,
    gesture: Gesture,
    context_menu: Option<ContextMenu>,
    /// Canvas surface size; elements are kept inside it while dragging.
    surface_size: Size,
    /// Set after every finalized change, drained by the host to sync the
    /// scene.
    dirty: bool,
}

impl Default for SceneEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneEditor {
    pub fn new() -> Self {
        Self {
            scene_id: None,
            store: ElementStore::default(),
            history: History::new(Vec::new()),
            clipboard: Clipboard::new(),
            selected: None,
            gesture: Gesture::Idle,
            context_menu: None,
            surface_size: Size::new(1280.0, 720.0),
            dirty: false,
        }
    }

    /// Switch to a scene, discarding all history and selection.
    pub fn load_scene(&mut self, scene: &Scene) {
        self.scene_id = Some(scene.id);
        self.store.replace(scene.elements.clone());
        self.history.reset(scene.elements.clone());
        self.selected = None;
        self.gesture = Gesture::Idle;
        self.context_menu = None;
        self.dirty = false;
    }

    pub fn set_surface_size(&mut self, size: Size) {
        self.surface_size = size;
    }

    /// The loaded scene, if any.
    pub fn scene_id(&self) -> Option<SceneId> {
        self.scene_id
    }

    pub fn elements(&self) -> &[CanvasElement] {
        self.store.elements()
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, or None when the selection went stale.
    pub fn selected_element(&self) -> Option<&CanvasElement> {
        self.selected.and_then(|id| self.store.get(id))
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The element currently being text-edited, if any.
    pub fn editing_id(&self) -> Option<ElementId> {
        match &self.gesture {
            Gesture::EditingText { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Scene linked from the selected element, for host navigation.
    pub fn link_target(&self) -> Option<SceneId> {
        self.selected_element().and_then(|e| e.next_scene_id())
    }

    /// Drain the pending scene sync, if any change was finalized.
    pub fn take_dirty(&mut self) -> Option<Vec<CanvasElement>> {
        if self.dirty {
            self.dirty = false;
            Some(self.store.elements().to_vec())
        } else {
            None
        }
    }

    /// Commit a new element sequence as one undoable action.
    fn apply(&mut self, elements: Vec<CanvasElement>) {
        if *self.history.present() == elements {
            return;
        }
        self.history.push(elements.clone());
        self.store.replace(elements);
        self.dirty = true;
    }

    // ---- Pointer gestures ----

    /// Handle a pointer-down in scene coordinates.
    pub fn pointer_down(&mut self, position: Point, button: MouseButton) {
        // Any press closes an open context menu.
        self.context_menu = None;

        // A press outside the element being edited commits the draft.
        if let Gesture::EditingText { id, .. } = &self.gesture {
            let inside = self.store.get(*id).is_some_and(|e| e.hit_test(position));
            if inside {
                return;
            }
            self.commit_text_edit();
        }

        if button == MouseButton::Right {
            self.open_context_menu(position);
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        // Resize handle of the selected element wins over element bodies.
        let handle_hit = self
            .selected_element()
            .filter(|e| e.hit_resize_handle(position))
            .map(|e| e.id());
        if let Some(id) = handle_hit {
            self.gesture = Gesture::Resizing {
                id,
                last_pointer: position,
            };
            return;
        }

        match self.store.top_hit(position) {
            Some(element) => {
                let id = element.id();
                let grab_offset = position - element.position();
                self.selected = Some(id);
                self.gesture = Gesture::Dragging { id, grab_offset };
            }
            None => {
                self.selected = None;
            }
        }
    }

    /// Handle a pointer-move in scene coordinates.
    pub fn pointer_move(&mut self, position: Point) {
        match self.gesture.clone() {
            Gesture::Dragging { id, grab_offset } => {
                let Some(element) = self.store.get(id) else {
                    self.gesture = Gesture::Idle;
                    return;
                };
                let (w, h) = element.size();
                let target = position - grab_offset;
                let clamped = Point::new(
                    target.x.min(self.surface_size.width - w).max(0.0),
                    target.y.min(self.surface_size.height - h).max(0.0),
                );
                let mut moved = element.clone();
                moved.set_position(clamped);
                let next = self.store.with_updated(moved);
                self.store.replace(next);
            }
            Gesture::Resizing { id, last_pointer } => {
                let Some(element) = self.store.get(id) else {
                    self.gesture = Gesture::Idle;
                    return;
                };
                let delta = position - last_pointer;
                let (w, h) = element.size();
                let mut resized = element.clone();
                resized.set_size(w + delta.x, h + delta.y);
                let next = self.store.with_updated(resized);
                self.store.replace(next);
                self.gesture = Gesture::Resizing {
                    id,
                    last_pointer: position,
                };
            }
            Gesture::Idle | Gesture::EditingText { .. } => {}
        }
    }

    /// Handle a pointer-up, finalizing any drag or resize.
    pub fn pointer_up(&mut self) {
        match self.gesture {
            Gesture::Dragging { .. } | Gesture::Resizing { .. } => {
                self.gesture = Gesture::Idle;
                self.finalize_gesture();
            }
            Gesture::Idle | Gesture::EditingText { .. } => {}
        }
    }

    /// Abort the current drag or resize, restoring the last committed
    /// state. Used when the pointer is lost mid-gesture.
    pub fn cancel_gesture(&mut self) {
        match self.gesture {
            Gesture::Dragging { .. } | Gesture::Resizing { .. } => {
                self.store.replace(self.history.present().clone());
                self.gesture = Gesture::Idle;
            }
            Gesture::Idle | Gesture::EditingText { .. } => {}
        }
    }

    fn finalize_gesture(&mut self) {
        let elements = self.store.elements().to_vec();
        if *self.history.present() != elements {
            self.history.push(elements);
            self.dirty = true;
        }
    }

    /// Handle a double-click; starts text editing on text bubbles.
    pub fn double_click(&mut self, position: Point) {
        if self.editing_id().is_some() {
            return;
        }
        if let Some(element) = self.store.top_hit(position) {
            let id = element.id();
            if let Some(text) = element.as_text() {
                let draft = text.content.clone();
                self.selected = Some(id);
                self.gesture = Gesture::EditingText { id, draft };
            }
        }
    }

    // ---- Text editing ----

    /// Update the in-flight text draft.
    pub fn edit_draft(&mut self, text: impl Into<String>) {
        if let Gesture::EditingText { draft, .. } = &mut self.gesture {
            *draft = text.into();
        }
    }

    /// Commit the text draft (blur). One undo step, suppressed when the
    /// content did not change.
    pub fn commit_text_edit(&mut self) {
        let Gesture::EditingText { id, draft } =
            std::mem::replace(&mut self.gesture, Gesture::Idle)
        else {
            return;
        };
        let Some(element) = self.store.get(id) else {
            return;
        };
        let mut updated = element.clone();
        if let Some(text) = updated.as_text_mut() {
            text.content = draft;
        }
        let next = self.store.with_updated(updated);
        self.apply(next);
    }

    // ---- One-shot commands ----

    /// Add an element and select it.
    pub fn add_element(&mut self, element: CanvasElement) {
        let id = element.id();
        let next = self.store.with_appended(element);
        self.apply(next);
        self.selected = Some(id);
    }

    /// Add a text bubble. Position defaults to (50,50), content to the
    /// edit placeholder.
    pub fn add_bubble(
        &mut self,
        shape: BubbleShape,
        position: Option<Point>,
        content: Option<&str>,
    ) {
        let mut bubble = TextElement::new(shape, position.unwrap_or(Point::new(50.0, 50.0)));
        if let Some(content) = content {
            bubble = bubble.with_content(content);
        }
        self.add_element(CanvasElement::Text(bubble));
    }

    pub fn delete(&mut self, id: ElementId) {
        if !self.store.contains(id) {
            return;
        }
        let next = self.store.without(id);
        self.apply(next);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_element().map(|e| e.id()) {
            self.delete(id);
        }
    }

    pub fn bring_to_front(&mut self, id: ElementId) {
        if !self.store.contains(id) {
            return;
        }
        let next = self.store.brought_to_front(id);
        self.apply(next);
        self.selected = Some(id);
    }

    pub fn send_to_back(&mut self, id: ElementId) {
        if !self.store.contains(id) {
            return;
        }
        let next = self.store.sent_to_back(id);
        self.apply(next);
        self.selected = Some(id);
    }

    /// Copy the selected element to the clipboard.
    pub fn copy(&mut self) {
        if let Some(element) = self.selected_element().cloned() {
            self.clipboard.copy(&element);
        }
    }

    /// Paste the clipboard at a position and select the new element.
    pub fn paste(&mut self, position: Point) {
        if let Some(element) = self.clipboard.paste_at(position) {
            self.add_element(element);
        }
    }

    /// Remove every element as one undoable action.
    pub fn clear(&mut self) {
        self.apply(Vec::new());
        self.selected = None;
    }

    /// Handle a character dragged from the cast panel onto the canvas.
    /// Malformed payloads are logged and ignored.
    pub fn drop_character(&mut self, payload: &str, position: Point) {
        let Some(character) = parse_character_payload(payload) else {
            return;
        };
        debug!("dropping character {} at {position:?}", character.name);
        let element = ImageElement::dropped_at(character.id, character.image_url, position);
        self.add_element(CanvasElement::Image(element));
    }

    pub fn set_link(&mut self, id: ElementId, scene_id: Option<SceneId>) {
        let Some(element) = self.store.get(id) else {
            return;
        };
        let mut updated = element.clone();
        updated.set_next_scene_id(scene_id);
        let next = self.store.with_updated(updated);
        self.apply(next);
    }

    // ---- Restyle commands (toolbar) ----

    fn restyle(&mut self, f: impl FnOnce(&mut crate::element::TextStyle)) {
        let Some(element) = self.selected_element() else {
            return;
        };
        let mut updated = element.clone();
        let Some(text) = updated.as_text_mut() else {
            return;
        };
        f(&mut text.style);
        let next = self.store.with_updated(updated);
        self.apply(next);
    }

    pub fn set_text_color(&mut self, color: SerializableColor) {
        self.restyle(|style| style.color = color);
    }

    pub fn set_background_color(&mut self, color: SerializableColor) {
        self.restyle(|style| style.background_color = color);
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        let family = family.into();
        self.restyle(|style| style.font_family = family);
    }

    /// Set the font size, floored at the minimum.
    pub fn set_font_size(&mut self, size: f64) {
        self.restyle(|style| style.font_size = size.max(MIN_FONT_SIZE));
    }

    pub fn toggle_bold(&mut self) {
        self.restyle(|style| style.font_weight = style.font_weight.toggled());
    }

    pub fn toggle_italic(&mut self) {
        self.restyle(|style| style.font_style = style.font_style.toggled());
    }

    pub fn toggle_underline(&mut self) {
        self.restyle(|style| style.text_decoration = style.text_decoration.toggled());
    }

    // ---- History ----

    pub fn undo(&mut self) {
        if self.history.undo() {
            self.store.replace(self.history.present().clone());
            self.selected = None;
            self.dirty = true;
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo() {
            self.store.replace(self.history.present().clone());
            self.selected = None;
            self.dirty = true;
        }
    }

    // ---- Keyboard layer ----

    /// Handle a key press. The whole layer is suppressed while any text
    /// field has focus (inline editing or a host input).
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers, text_input_focused: bool) {
        if text_input_focused || self.editing_id().is_some() {
            return;
        }
        if let Some(action) = shortcuts::action_for(key, modifiers) {
            self.perform(action);
        }
    }

    pub fn perform(&mut self, action: EditorAction) {
        match action {
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::DeleteSelected => self.delete_selected(),
            EditorAction::CopySelected => self.copy(),
            EditorAction::Paste => self.paste(PASTE_FALLBACK),
        }
    }

    // ---- Context menu ----

    fn open_context_menu(&mut self, position: Point) {
        match self.store.top_hit(position) {
            Some(element) => {
                self.selected = Some(element.id());
                self.context_menu = Some(ContextMenu::for_element(position, element));
            }
            None => {
                self.context_menu = Some(ContextMenu::for_canvas(
                    position,
                    self.clipboard.is_empty(),
                ));
            }
        }
    }

    /// Close the context menu without firing anything.
    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Fire a context menu entry. The menu closes regardless of whether
    /// the action did anything.
    pub fn menu_action(&mut self, action: MenuAction) {
        let Some(menu) = self.context_menu.take() else {
            return;
        };
        match (action, menu.target) {
            (MenuAction::Paste, MenuTarget::Canvas(position)) => self.paste(position),
            (MenuAction::AddBubble(shape), MenuTarget::Canvas(position)) => {
                self.add_bubble(shape, Some(position), None)
            }
            (MenuAction::EditText, MenuTarget::Element(id)) => {
                if let Some(text) = self.store.get(id).and_then(|e| e.as_text()) {
                    let draft = text.content.clone();
                    self.selected = Some(id);
                    self.gesture = Gesture::EditingText { id, draft };
                }
            }
            (MenuAction::Copy, MenuTarget::Element(id)) => {
                self.selected = Some(id);
                self.copy();
            }
            (MenuAction::Delete, MenuTarget::Element(id)) => self.delete(id),
            (MenuAction::BringToFront, MenuTarget::Element(id)) => self.bring_to_front(id),
            (MenuAction::SendToBack, MenuTarget::Element(id)) => self.send_to_back(id),
            _ => {}
        }
    }
}
