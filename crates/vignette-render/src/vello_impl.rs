//! Vello-based renderer implementation.

use std::collections::HashMap;
use std::sync::Arc;

use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape as KurboShape, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

use vignette_core::element::{CanvasElement, ImageElement, TextElement};
use vignette_core::geometry::outline_path;

use crate::renderer::{RenderContext, Renderer, RendererError, RenderResult};

/// Inner padding between the bubble outline and its text.
const TEXT_PADDING: f64 = 8.0;

/// Radius of the drawn resize handle disc.
const HANDLE_RADIUS: f64 = 8.0;

/// Radius of the scene-link badge disc.
const LINK_BADGE_RADIUS: f64 = 11.0;

/// Vello-based renderer for the scene canvas.
pub struct VelloSceneRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Selection highlight color.
    selection_color: Color,
    /// Font context for text rendering (cached across frames).
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
    /// Decoded images keyed by URL, fed by the host as downloads finish.
    image_cache: HashMap<String, peniko::ImageData>,
}

impl Default for VelloSceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloSceneRenderer {
    /// Create a new renderer using system font discovery.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            image_cache: HashMap::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Decode downloaded image bytes and cache them under their URL.
    ///
    /// Elements whose URL is not cached yet render as placeholders until
    /// the host calls this.
    pub fn load_image(&mut self, url: &str, bytes: &[u8]) -> RenderResult<()> {
        let decoded = ::image::load_from_memory(bytes)
            .map_err(|e| RendererError::ImageDecode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let blob = peniko::Blob::new(Arc::new(rgba.into_vec()));
        let data = peniko::ImageData {
            data: blob,
            format: peniko::ImageFormat::Rgba8,
            width,
            height,
            alpha_type: peniko::ImageAlphaType::Alpha,
        };
        log::debug!("cached decoded image {url} ({width}x{height})");
        self.image_cache.insert(url.to_string(), data);
        Ok(())
    }

    /// Check whether an image URL has been decoded and cached.
    pub fn has_image(&self, url: &str) -> bool {
        self.image_cache.contains_key(url)
    }

    /// Drop a cached image (e.g. when a character is regenerated).
    pub fn evict_image(&mut self, url: &str) {
        self.image_cache.remove(url);
    }

    fn dark_stroke() -> Color {
        Color::from_rgba8(31, 41, 55, 255)
    }

    /// Render a text bubble: outline fill/stroke, then the content.
    fn render_bubble(
        &mut self,
        text: &TextElement,
        transform: Affine,
        selected: bool,
        skip_content: bool,
    ) {
        let path = outline_path(text.shape, text.width, text.height);
        let local = transform * Affine::translate((text.position.x, text.position.y));

        self.scene.fill(
            Fill::NonZero,
            local,
            Color::from(text.style.background_color),
            None,
            &path,
        );
        let stroke_color = if selected {
            self.selection_color
        } else {
            Self::dark_stroke()
        };
        self.scene
            .stroke(&Stroke::new(2.0), local, stroke_color, None, &path);

        if !skip_content && !text.content.is_empty() {
            self.render_text_content(text, transform);
        }
    }

    /// Render bubble text with Parley, clipped to the bubble interior.
    fn render_text_content(&mut self, text: &TextElement, transform: Affine) {
        use vignette_core::element::{FontStyle, FontWeight, TextDecoration};

        let style = &text.style;
        let brush = Brush::Solid(Color::from(style.color));
        let font_size = style.font_size as f32;
        let weight = match style.font_weight {
            FontWeight::Normal => parley::FontWeight::NORMAL,
            FontWeight::Bold => parley::FontWeight::BOLD,
        };
        let slant = match style.font_style {
            FontStyle::Normal => parley::FontStyle::Normal,
            FontStyle::Italic => parley::FontStyle::Italic,
        };
        let underline = style.text_decoration == TextDecoration::Underline;

        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, &text.content, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontWeight(weight));
        builder.push_default(StyleProperty::FontStyle(slant));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Single(
            parley::FontFamily::Named(style.font_family.as_str().into()),
        )));
        let mut layout = builder.build(&text.content);

        let max_width = (text.width - 2.0 * TEXT_PADDING).max(0.0) as f32;
        layout.break_all_lines(Some(max_width));
        layout.align(
            Some(max_width),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        // Clip to the bubble interior so overflow never spills outside.
        let interior = Rect::new(
            text.position.x,
            text.position.y,
            text.position.x + text.width,
            text.position.y + text.height,
        );
        self.scene
            .push_layer(peniko::Mix::Clip, 1.0, transform, &interior);

        let text_transform = transform
            * Affine::translate((
                text.position.x + TEXT_PADDING,
                text.position.y + TEXT_PADDING,
            ));

        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let run_start = glyph_run.offset();
                let mut x = run_start;
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let run_font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(run_font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }

                if underline && x > run_start {
                    let offset = (run_font_size as f64 * 0.12).max(2.0);
                    let thickness = (run_font_size as f64 * 0.06).max(1.0);
                    let line = kurbo::Line::new(
                        Point::new(run_start as f64, y as f64 + offset),
                        Point::new(x as f64, y as f64 + offset),
                    );
                    self.scene.stroke(
                        &Stroke::new(thickness),
                        text_transform,
                        Color::from(style.color),
                        None,
                        &line,
                    );
                }
            }
        }

        self.scene.pop_layer();
    }

    /// Render a character image, contained and centered in its bounds.
    fn render_image_element(&mut self, image: &ImageElement, transform: Affine, selected: bool) {
        let bounds = Rect::new(
            image.position.x,
            image.position.y,
            image.position.x + image.width,
            image.position.y + image.height,
        );

        match self.image_cache.get(&image.image_url).cloned() {
            Some(data) => {
                let scale = (bounds.width() / data.width as f64)
                    .min(bounds.height() / data.height as f64);
                let drawn_w = data.width as f64 * scale;
                let drawn_h = data.height as f64 * scale;
                let image_transform = transform
                    * Affine::translate((
                        bounds.x0 + (bounds.width() - drawn_w) / 2.0,
                        bounds.y0 + (bounds.height() - drawn_h) / 2.0,
                    ))
                    * Affine::scale(scale);
                self.scene.draw_image(&data.into(), image_transform);
            }
            None => self.render_image_placeholder(bounds, transform),
        }

        if selected {
            self.scene.stroke(
                &Stroke::new(2.0),
                transform,
                self.selection_color,
                None,
                &bounds.to_path(0.1),
            );
        }
    }

    /// Render a placeholder for images that are not decoded yet.
    fn render_image_placeholder(&mut self, bounds: Rect, transform: Affine) {
        let rect_path = bounds.to_path(0.1);
        self.scene.fill(
            Fill::NonZero,
            transform,
            Color::from_rgba8(200, 200, 200, 255),
            None,
            &rect_path,
        );

        let stroke = Stroke::new(2.0);
        let mut x_path = BezPath::new();
        x_path.move_to(Point::new(bounds.x0, bounds.y0));
        x_path.line_to(Point::new(bounds.x1, bounds.y1));
        x_path.move_to(Point::new(bounds.x1, bounds.y0));
        x_path.line_to(Point::new(bounds.x0, bounds.y1));
        self.scene.stroke(
            &stroke,
            transform,
            Color::from_rgba8(150, 150, 150, 255),
            None,
            &x_path,
        );
        self.scene.stroke(
            &stroke,
            transform,
            Color::from_rgba8(100, 100, 100, 255),
            None,
            &rect_path,
        );
    }

    /// Selection affordances: resize handle and, when the element links to
    /// another scene, a badge at the top-right.
    fn render_selection_overlay(&mut self, element: &CanvasElement, transform: Affine) {
        let bounds = element.bounds();

        let handle = Circle::new(Point::new(bounds.x1, bounds.y1), HANDLE_RADIUS);
        self.scene.fill(
            Fill::NonZero,
            transform,
            self.selection_color,
            None,
            &handle.to_path(0.1),
        );
        self.scene.stroke(
            &Stroke::new(2.0),
            transform,
            Color::WHITE,
            None,
            &handle.to_path(0.1),
        );

        if element.next_scene_id().is_some() {
            let badge = Circle::new(Point::new(bounds.x1, bounds.y0), LINK_BADGE_RADIUS);
            self.scene.fill(
                Fill::NonZero,
                transform,
                self.selection_color,
                None,
                &badge.to_path(0.1),
            );
            self.scene.stroke(
                &Stroke::new(2.0),
                transform,
                Color::WHITE,
                None,
                &badge.to_path(0.1),
            );
            // Diagonal tick hinting at a link.
            let tick = kurbo::Line::new(
                Point::new(bounds.x1 - 4.0, bounds.y0 + 4.0),
                Point::new(bounds.x1 + 4.0, bounds.y0 - 4.0),
            );
            self.scene
                .stroke(&Stroke::new(2.0), transform, Color::WHITE, None, &tick);
        }
    }

    fn render_background(&mut self, ctx: &RenderContext) {
        let viewport = Rect::new(0.0, 0.0, ctx.viewport_size.width, ctx.viewport_size.height);
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            ctx.background_color,
            None,
            &viewport,
        );

        let Some(data) = ctx
            .background_url
            .and_then(|url| self.image_cache.get(url))
            .cloned()
        else {
            return;
        };
        let bg_transform = Affine::scale_non_uniform(
            viewport.width() / data.width as f64,
            viewport.height() / data.height as f64,
        );
        self.scene.draw_image(&data.into(), bg_transform);
    }
}

impl Renderer for VelloSceneRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.selection_color = ctx.selection_color;

        let transform = Affine::scale(ctx.scale_factor);

        self.render_background(ctx);

        // Paint elements in sequence order; the edited element's text is
        // skipped so the host can overlay its editing widget.
        for element in ctx.elements {
            let selected = ctx.selected_id == Some(element.id());
            match element {
                CanvasElement::Text(text) => {
                    let skip_content = ctx.editing_id == Some(text.id);
                    self.render_bubble(text, transform, selected, skip_content);
                }
                CanvasElement::Image(image) => {
                    self.render_image_element(image, transform, selected);
                }
            }
        }

        for element in ctx.elements {
            if ctx.selected_id == Some(element.id()) {
                self.render_selection_overlay(element, transform);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use vignette_core::element::BubbleShape;

    fn sample_elements() -> Vec<CanvasElement> {
        let text = TextElement::new(BubbleShape::SpeechBubble, Point::new(50.0, 50.0))
            .with_content("Hi there");
        let image = ImageElement::dropped_at(
            uuid::Uuid::new_v4(),
            "https://img.example/char.png".into(),
            Point::new(300.0, 300.0),
        );
        vec![CanvasElement::Text(text), CanvasElement::Image(image)]
    }

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = VelloSceneRenderer::new();
        let ctx = RenderContext::new(&[], Size::new(800.0, 600.0));
        renderer.build_scene(&ctx);
    }

    #[test]
    fn test_build_scene_with_elements() {
        let mut renderer = VelloSceneRenderer::new();
        let elements = sample_elements();
        let selected = elements[0].id();
        let ctx = RenderContext::new(&elements, Size::new(800.0, 600.0))
            .with_selected(Some(selected));
        // Image bytes never arrived; the image renders as a placeholder.
        renderer.build_scene(&ctx);
    }

    #[test]
    fn test_editing_element_skips_content_only() {
        let mut renderer = VelloSceneRenderer::new();
        let elements = sample_elements();
        let editing = elements[0].id();
        let ctx = RenderContext::new(&elements, Size::new(800.0, 600.0))
            .with_editing(Some(editing));
        renderer.build_scene(&ctx);
    }

    #[test]
    fn test_load_image_rejects_garbage() {
        let mut renderer = VelloSceneRenderer::new();
        let err = renderer.load_image("bad.png", b"not an image");
        assert!(matches!(err, Err(RendererError::ImageDecode(_))));
        assert!(!renderer.has_image("bad.png"));
    }

    #[test]
    fn test_load_image_caches_decoded_png() {
        use image::{ImageFormat, RgbaImage};
        use std::io::Cursor;

        let mut bytes = Vec::new();
        RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let mut renderer = VelloSceneRenderer::new();
        renderer.load_image("red.png", &bytes).unwrap();
        assert!(renderer.has_image("red.png"));

        renderer.evict_image("red.png");
        assert!(!renderer.has_image("red.png"));
    }
}
