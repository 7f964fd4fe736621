use crate::core::Viewport;
use crate::error::PlotResult;
use crate::render::{BitmapTarget, Color, RenderFrame, Renderer};

/// Headless renderer used by tests and hosts without a raster backend.
///
/// It validates every frame and keeps the last accepted one as its "bitmap",
/// so callers can inspect exactly what a paint would show.
#[derive(Debug)]
pub struct NullRenderer {
    pub last_segment_count: usize,
    pub last_marker_count: usize,
    pub last_text_count: usize,
    pub render_count: usize,
    bitmap: RenderFrame,
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self {
            last_segment_count: 0,
            last_marker_count: 0,
            last_text_count: 0,
            render_count: 0,
            bitmap: RenderFrame::new(Viewport::default(), Color::rgb(1.0, 1.0, 1.0)),
        }
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        self.last_segment_count = frame.segments.len();
        self.last_marker_count = frame.markers.len();
        self.last_text_count = frame.texts.len();
        self.render_count += 1;
        self.bitmap = frame.clone();
        Ok(())
    }
}

impl BitmapTarget for NullRenderer {
    type Bitmap = RenderFrame;

    fn bitmap(&self) -> &RenderFrame {
        &self.bitmap
    }
}
