//! Bubble outline geometry.
//!
//! Pure path construction for the four bubble silhouettes. Paths are built
//! in element-local coordinates with the body occupying `(0,0)..(w,h)`;
//! speech tails and thought trails extend below the body.

use kurbo::{BezPath, Circle, Point, Shape as _};

use crate::element::BubbleShape;

/// Corner radius of rounded bubble bodies.
const CORNER_RADIUS: f64 = 10.0;

/// How far the speech tail apex extends below the body.
const TAIL_DROP: f64 = 20.0;

/// Flattening tolerance for circular trail segments.
const ARC_TOLERANCE: f64 = 0.1;

/// Build the outline path for a bubble of the given size.
///
/// Total for any finite size; degenerate dimensions produce a degenerate
/// path rather than panicking. Size floors are enforced by the editor.
pub fn outline_path(shape: BubbleShape, width: f64, height: f64) -> BezPath {
    match shape {
        BubbleShape::Rectangle => rectangle_path(width, height),
        BubbleShape::SpeechBubble => speech_path(width, height),
        BubbleShape::ThoughtBubble => thought_path(width, height),
        BubbleShape::ShoutBubble => shout_path(width, height),
    }
}

fn rectangle_path(w: f64, h: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(Point::new(0.0, 0.0));
    path.line_to(Point::new(w, 0.0));
    path.line_to(Point::new(w, h));
    path.line_to(Point::new(0.0, h));
    path.close_path();
    path
}

/// Rounded body with corner radius `r`, open at the bottom edge where the
/// tail is spliced in. Callers provide the bottom-edge x anchors.
fn rounded_body_with_bottom_gap(
    w: f64,
    h: f64,
    r: f64,
    gap_right: f64,
    gap_left: f64,
    apex: Point,
) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(Point::new(r, 0.0));
    path.line_to(Point::new(w - r, 0.0));
    path.curve_to(Point::new(w, 0.0), Point::new(w, 0.0), Point::new(w, r));
    path.line_to(Point::new(w, h - r));
    path.curve_to(Point::new(w, h), Point::new(w, h), Point::new(w - r, h));
    // Bottom edge runs right to left, detouring through the tail apex.
    path.line_to(Point::new(gap_right, h));
    path.line_to(apex);
    path.line_to(Point::new(gap_left, h));
    path.line_to(Point::new(r, h));
    path.curve_to(Point::new(0.0, h), Point::new(0.0, h), Point::new(0.0, h - r));
    path.line_to(Point::new(0.0, r));
    path.curve_to(Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(r, 0.0));
    path.close_path();
    path
}

fn speech_path(w: f64, h: f64) -> BezPath {
    let r = CORNER_RADIUS.min(w.max(0.0) / 2.0).min(h.max(0.0) / 2.0);
    // Tail anchors sit near the left end of the bottom edge; scale them
    // down for bodies narrower than the reference 50px.
    let scale = (w / 50.0).clamp(0.0, 1.0);
    let gap_right = 40.0 * scale;
    let gap_left = 30.0 * scale;
    let apex = Point::new(25.0 * scale, h + TAIL_DROP * scale);
    rounded_body_with_bottom_gap(w, h, r, gap_right, gap_left, apex)
}

fn thought_path(w: f64, h: f64) -> BezPath {
    let r = 20.0_f64.min(w.max(0.0) / 2.0).min(h.max(0.0) / 2.0);
    let mut path = BezPath::new();
    path.move_to(Point::new(r, 0.0));
    path.line_to(Point::new(w - r, 0.0));
    path.curve_to(Point::new(w, 0.0), Point::new(w, 0.0), Point::new(w, r));
    path.line_to(Point::new(w, h - r));
    path.curve_to(Point::new(w, h), Point::new(w, h), Point::new(w - r, h));
    path.line_to(Point::new(r, h));
    path.curve_to(Point::new(0.0, h), Point::new(0.0, h), Point::new(0.0, h - r));
    path.line_to(Point::new(0.0, r));
    path.curve_to(Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(r, 0.0));
    path.close_path();

    // Thought trail: two circles shrinking toward the bottom-left.
    let trail = [
        Circle::new(Point::new(22.0, h + 6.0), 8.0),
        Circle::new(Point::new(8.0, h + 18.0), 5.0),
    ];
    for circle in trail {
        for el in circle.path_elements(ARC_TOLERANCE) {
            path.push(el);
        }
    }
    path
}

fn shout_path(w: f64, h: f64) -> BezPath {
    const POINTS: usize = 16;
    let outer = w.min(h) / 2.0;
    let inner = w.min(h) / 2.2;
    let center = Point::new(w / 2.0, h / 2.0);

    let mut path = BezPath::new();
    for i in 0..POINTS {
        let angle = (i as f64 / POINTS as f64) * std::f64::consts::TAU;
        let radius = if i % 2 == 0 { outer } else { inner };
        let p = Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        );
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape as _;

    #[test]
    fn test_rectangle_matches_bounds() {
        let path = outline_path(BubbleShape::Rectangle, 250.0, 100.0);
        let bbox = path.bounding_box();
        assert_eq!(bbox.width(), 250.0);
        assert_eq!(bbox.height(), 100.0);
    }

    #[test]
    fn test_speech_tail_extends_below_body() {
        let path = outline_path(BubbleShape::SpeechBubble, 250.0, 100.0);
        let bbox = path.bounding_box();
        assert!(bbox.y1 > 100.0 + 19.0);
        assert!(bbox.y1 <= 100.0 + 21.0);
    }

    #[test]
    fn test_thought_trail_extends_below_body() {
        let path = outline_path(BubbleShape::ThoughtBubble, 250.0, 100.0);
        let bbox = path.bounding_box();
        assert!(bbox.y1 > 100.0);
    }

    #[test]
    fn test_shout_star_fits_min_dimension() {
        let path = outline_path(BubbleShape::ShoutBubble, 250.0, 100.0);
        let bbox = path.bounding_box();
        // Star diameter follows the shorter axis.
        assert!(bbox.width() <= 100.0 + 1e-9);
        assert!(bbox.height() <= 100.0 + 1e-9);
    }

    #[test]
    fn test_shout_star_has_sixteen_vertices() {
        let path = outline_path(BubbleShape::ShoutBubble, 100.0, 100.0);
        // MoveTo + 15 LineTo + ClosePath.
        assert_eq!(path.elements().len(), 17);
    }

    #[test]
    fn test_degenerate_sizes_do_not_panic() {
        for shape in BubbleShape::all() {
            let _ = outline_path(*shape, 0.0, 0.0);
            let _ = outline_path(*shape, -10.0, 5.0);
        }
    }
}
