use crate::core::Viewport;
use crate::error::{PlotError, PlotResult};
use crate::render::{CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one full panel draw pass.
///
/// Backends paint it bottom-up: background, `rects`, `lines`, `texts`,
/// `segments`, `markers`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    /// Plot border and other filled/outlined boxes.
    pub rects: Vec<RectPrimitive>,
    /// Static decoration lines (axis ticks).
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
    /// Polyline through consecutive samples.
    pub segments: Vec<LinePrimitive>,
    /// One handle per sample when the panel is editable.
    pub markers: Vec<CirclePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, background: Color) -> Self {
        Self {
            viewport,
            background,
            rects: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            segments: Vec::new(),
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_segment(mut self, segment: LinePrimitive) -> Self {
        self.segments.push(segment);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: CirclePrimitive) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.background.validate()?;
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in self.lines.iter().chain(&self.segments) {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for marker in &self.markers {
            marker.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
            && self.segments.is_empty()
            && self.markers.is_empty()
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.rects.len() + self.lines.len() + self.texts.len() + self.segments.len() + self.markers.len()
    }
}
