//! Ordered element storage for a scene.

use kurbo::Point;

use crate::element::{CanvasElement, ElementId};

/// The element sequence of the active scene.
///
/// Sequence order is paint order: later elements draw on top. Every
/// mutation goes through [`ElementStore::replace`] with a complete new
/// sequence, so snapshots handed to the history stay valid as-is. The
/// builder methods produce those new sequences without touching the store.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<CanvasElement>,
}

impl ElementStore {
    pub fn new(elements: Vec<CanvasElement>) -> Self {
        Self { elements }
    }

    /// Current sequence in paint order.
    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    /// Atomically swap in a new sequence.
    pub fn replace(&mut self, elements: Vec<CanvasElement>) {
        self.elements = elements;
    }

    pub fn get(&self, id: ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Topmost element under a point, scanning front to back.
    pub fn top_hit(&self, point: Point) -> Option<&CanvasElement> {
        self.elements.iter().rev().find(|e| e.hit_test(point))
    }

    /// New sequence with one element replaced in place (matched by id).
    pub fn with_updated(&self, element: CanvasElement) -> Vec<CanvasElement> {
        self.elements
            .iter()
            .map(|e| {
                if e.id() == element.id() {
                    element.clone()
                } else {
                    e.clone()
                }
            })
            .collect()
    }

    /// New sequence with one element removed.
    pub fn without(&self, id: ElementId) -> Vec<CanvasElement> {
        self.elements
            .iter()
            .filter(|e| e.id() != id)
            .cloned()
            .collect()
    }

    /// New sequence with one element appended on top.
    pub fn with_appended(&self, element: CanvasElement) -> Vec<CanvasElement> {
        let mut elements = self.elements.clone();
        elements.push(element);
        elements
    }

    /// New sequence with an element moved to the end (topmost).
    /// Relative order of the others is preserved.
    pub fn brought_to_front(&self, id: ElementId) -> Vec<CanvasElement> {
        let mut elements = self.elements.clone();
        if let Some(idx) = elements.iter().position(|e| e.id() == id) {
            let element = elements.remove(idx);
            elements.push(element);
        }
        elements
    }

    /// New sequence with an element moved to the start (bottommost).
    /// Relative order of the others is preserved.
    pub fn sent_to_back(&self, id: ElementId) -> Vec<CanvasElement> {
        let mut elements = self.elements.clone();
        if let Some(idx) = elements.iter().position(|e| e.id() == id) {
            let element = elements.remove(idx);
            elements.insert(0, element);
        }
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BubbleShape, TextElement};

    fn text_at(x: f64, y: f64) -> CanvasElement {
        CanvasElement::Text(TextElement::new(BubbleShape::Rectangle, Point::new(x, y)))
    }

    fn ids(elements: &[CanvasElement]) -> Vec<ElementId> {
        elements.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_top_hit_prefers_front() {
        // Two overlapping elements; the later one wins.
        let a = text_at(0.0, 0.0);
        let b = text_at(0.0, 0.0);
        let top = b.id();
        let store = ElementStore::new(vec![a, b]);
        assert_eq!(store.top_hit(Point::new(10.0, 10.0)).map(|e| e.id()), Some(top));
        assert!(store.top_hit(Point::new(900.0, 900.0)).is_none());
    }

    #[test]
    fn test_bring_to_front_preserves_relative_order() {
        let (a, b, c) = (text_at(0.0, 0.0), text_at(10.0, 0.0), text_at(20.0, 0.0));
        let (ia, ib, ic) = (a.id(), b.id(), c.id());
        let store = ElementStore::new(vec![a, b, c]);
        assert_eq!(ids(&store.brought_to_front(ia)), vec![ib, ic, ia]);
    }

    #[test]
    fn test_send_to_back_preserves_relative_order() {
        let (a, b, c) = (text_at(0.0, 0.0), text_at(10.0, 0.0), text_at(20.0, 0.0));
        let (ia, ib, ic) = (a.id(), b.id(), c.id());
        let store = ElementStore::new(vec![a, b, c]);
        assert_eq!(ids(&store.sent_to_back(ic)), vec![ic, ia, ib]);
    }

    #[test]
    fn test_reorder_missing_id_is_identity() {
        let a = text_at(0.0, 0.0);
        let ia = a.id();
        let store = ElementStore::new(vec![a]);
        let ghost = uuid::Uuid::new_v4();
        assert_eq!(ids(&store.brought_to_front(ghost)), vec![ia]);
        assert_eq!(ids(&store.sent_to_back(ghost)), vec![ia]);
    }

    #[test]
    fn test_with_updated_replaces_by_id() {
        let a = text_at(0.0, 0.0);
        let ia = a.id();
        let store = ElementStore::new(vec![a.clone()]);
        let mut moved = a;
        moved.set_position(Point::new(99.0, 99.0));
        let updated = store.with_updated(moved);
        assert_eq!(updated[0].id(), ia);
        assert_eq!(updated[0].position(), Point::new(99.0, 99.0));
        // Original store is untouched.
        assert_eq!(store.get(ia).map(|e| e.position()), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_without_removes_element() {
        let (a, b) = (text_at(0.0, 0.0), text_at(10.0, 0.0));
        let (ia, ib) = (a.id(), b.id());
        let store = ElementStore::new(vec![a, b]);
        assert_eq!(ids(&store.without(ia)), vec![ib]);
    }
}
