//! Vignette Render Library
//!
//! Renderer abstraction and the vello implementation for compositing the
//! scene canvas: bubbles, character images, text, and selection overlays.

pub mod renderer;
pub mod vello_impl;

pub use renderer::{RenderContext, Renderer, RendererError, RenderResult};
pub use vello_impl::VelloSceneRenderer;
