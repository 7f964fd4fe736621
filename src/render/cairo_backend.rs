use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;
use std::io::Write;

use crate::core::Viewport;
use crate::error::{PlotError, PlotResult};
use crate::render::{BitmapTarget, Color, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
    pub segments_drawn: usize,
    pub markers_drawn: usize,
}

/// Double-buffered Cairo + Pango renderer.
///
/// Frames are rasterized into a back `ImageSurface`; only a completed pass is
/// swapped to the front, which is what [`BitmapTarget::bitmap`] exposes.
/// The back buffer is reused while the viewport size stays the same.
#[derive(Debug)]
pub struct CairoRenderer {
    front: ImageSurface,
    back: Option<ImageSurface>,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> PlotResult<Self> {
        Ok(Self {
            front: create_surface(width, height)?,
            back: None,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.front
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the front buffer as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> PlotResult<()> {
        self.front
            .write_to_png(writer)
            .map_err(|err| PlotError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn take_back_buffer(&mut self, viewport: Viewport) -> PlotResult<ImageSurface> {
        let (width, height) = surface_size(viewport)?;
        match self.back.take() {
            Some(surface) if surface.width() == width && surface.height() == height => {
                Ok(surface)
            }
            _ => create_surface(width, height),
        }
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        let back = self.take_back_buffer(frame.viewport)?;
        let stats = {
            let context = Context::new(&back)
                .map_err(|err| map_backend_error("failed to create cairo context", err))?;
            draw_frame(&context, frame)?
        };
        back.flush();

        let previous_front = std::mem::replace(&mut self.front, back);
        self.back = Some(previous_front);
        self.last_stats = stats;
        Ok(())
    }
}

impl BitmapTarget for CairoRenderer {
    type Bitmap = ImageSurface;

    fn bitmap(&self) -> &ImageSurface {
        &self.front
    }
}

fn draw_frame(context: &Context, frame: &RenderFrame) -> PlotResult<CairoRenderStats> {
    let mut stats = CairoRenderStats::default();

    apply_color(context, frame.background);
    context
        .paint()
        .map_err(|err| map_backend_error("failed to clear surface", err))?;

    for rect in &frame.rects {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        if let Some(fill) = rect.fill_color {
            apply_color(context, fill);
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        }
        if rect.border_width > 0.0 {
            apply_color(context, rect.border_color);
            context.set_line_width(rect.border_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
        } else {
            context.new_path();
        }
        stats.rects_drawn += 1;
    }

    for line in &frame.lines {
        stroke_line(context, line)?;
        stats.lines_drawn += 1;
    }

    for text in &frame.texts {
        let layout = pangocairo::functions::create_layout(context);
        let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, _text_height) = layout.pixel_size();
        let offset_x = match text.h_align {
            TextHAlign::Left => 0.0,
            TextHAlign::Center => -f64::from(text_width) / 2.0,
            TextHAlign::Right => -f64::from(text_width),
        };

        context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        apply_color(context, text.color);
        context.translate(text.x, text.y);
        if text.rotation_rad != 0.0 {
            context.rotate(-text.rotation_rad);
        }
        context.move_to(offset_x, 0.0);
        pangocairo::functions::show_layout(context, &layout);
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
        stats.texts_drawn += 1;
    }

    for segment in &frame.segments {
        stroke_line(context, segment)?;
        stats.segments_drawn += 1;
    }

    for marker in &frame.markers {
        context.new_sub_path();
        context.arc(marker.center.x, marker.center.y, marker.radius, 0.0, TAU);
        apply_color(context, marker.color);
        let result = if marker.filled {
            context.fill()
        } else {
            context.stroke()
        };
        result.map_err(|err| map_backend_error("failed to draw marker", err))?;
        stats.markers_drawn += 1;
    }

    Ok(stats)
}

fn stroke_line(context: &Context, line: &crate::render::LinePrimitive) -> PlotResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn surface_size(viewport: Viewport) -> PlotResult<(i32, i32)> {
    let invalid = || PlotError::InvalidViewport {
        width: viewport.width,
        height: viewport.height,
    };
    if !viewport.is_valid() {
        return Err(invalid());
    }
    let width = i32::try_from(viewport.width).map_err(|_| invalid())?;
    let height = i32::try_from(viewport.height).map_err(|_| invalid())?;
    Ok((width, height))
}

fn create_surface(width: i32, height: i32) -> PlotResult<ImageSurface> {
    if width <= 0 || height <= 0 {
        return Err(PlotError::InvalidData(
            "cairo surface size must be > 0".to_owned(),
        ));
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::InvalidData(format!("{prefix}: {err}"))
}
