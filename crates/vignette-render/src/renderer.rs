//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use thiserror::Error;
use vignette_core::element::{CanvasElement, ElementId};

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Image decode failed: {0}")]
    ImageDecode(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Elements to paint, in paint order.
    pub elements: &'a [CanvasElement],
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color used when no scene background is cached.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// The selected element, drawn with handles and highlight.
    pub selected_id: Option<ElementId>,
    /// Element currently being text-edited (skipped in build_scene so the
    /// host can overlay its editing widget).
    pub editing_id: Option<ElementId>,
    /// URL of the scene background image, looked up in the image cache.
    pub background_url: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(elements: &'a [CanvasElement], viewport_size: Size) -> Self {
        Self {
            elements,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::WHITE,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            selected_id: None,
            editing_id: None,
            background_url: None,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selected element.
    pub fn with_selected(mut self, id: Option<ElementId>) -> Self {
        self.selected_id = id;
        self
    }

    /// Set the element being edited (will be skipped in build_scene).
    pub fn with_editing(mut self, id: Option<ElementId>) -> Self {
        self.editing_id = id;
        self
    }

    /// Set the scene background image URL.
    pub fn with_background_url(mut self, url: Option<&'a str>) -> Self {
        self.background_url = url;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// Called once per frame; prepares all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
