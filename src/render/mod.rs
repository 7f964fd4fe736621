mod cache;
mod frame;
mod null_renderer;
mod primitives;

pub use cache::{RebuildOutcome, RenderCache, RenderCacheStats};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from mapping and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()>;
}

/// Renderer that rasterizes into an off-screen image the host can blit.
///
/// `render` must be all-or-nothing: when it returns an error, `bitmap` still
/// holds the previously completed image.
pub trait BitmapTarget: Renderer {
    type Bitmap: ?Sized;

    fn bitmap(&self) -> &Self::Bitmap;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
