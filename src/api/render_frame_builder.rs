use std::f64::consts::FRAC_PI_2;

use crate::core::{CoordinateMapper, Viewport, index_ticks, value_ticks};
use crate::error::PlotResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::{AxisTitles, PanelConfig};

/// Slack for treating a tick as inside the plot area despite rounding.
const PLOT_EDGE_EPSILON_PX: f64 = 1e-6;
const LABEL_GAP_PX: f64 = 2.0;

/// Materializes every primitive of one panel pass.
///
/// Fails with `PlotError::InvalidViewport` when the surface or the plot area
/// inside the padding is empty.
pub fn build_render_frame(
    config: &PanelConfig,
    values: &[f64],
    viewport: Viewport,
) -> PlotResult<RenderFrame> {
    let mapper = CoordinateMapper::resolve(config.mapping(), viewport, values)?;
    let style = config.style;
    let mut frame = RenderFrame::new(viewport, style.background);

    if config.show_axes {
        push_axes(&mut frame, config, mapper, values);
    }
    if let Some(titles) = &config.axis_titles {
        push_axis_titles(&mut frame, config, mapper, titles);
    }

    let centers: Vec<_> = mapper.marker_centers(values).collect();
    for pair in centers.windows(2) {
        frame.segments.push(LinePrimitive::between(
            pair[0],
            pair[1],
            style.line_width,
            style.line_color,
        ));
    }

    if config.draggable {
        frame.markers.extend(
            centers
                .iter()
                .map(|center| CirclePrimitive::filled(*center, style.marker_radius, style.marker_color)),
        );
    }

    Ok(frame)
}

fn push_axes(frame: &mut RenderFrame, config: &PanelConfig, mapper: CoordinateMapper, values: &[f64]) {
    let style = config.style;
    let layout = mapper.layout();
    let left = layout.padding;
    let top = layout.padding;
    let right = left + layout.graph_width();
    let bottom = mapper.plot_bottom();

    if style.border_width > 0.0 {
        frame.rects.push(RectPrimitive::outline(
            left,
            top,
            layout.graph_width(),
            layout.graph_height(),
            style.border_width,
            style.border_color,
        ));
    }

    let tick_width = style.border_width.max(1.0);
    if let Some(range) = config.value_bounds.resolve(values) {
        for tick in value_ticks(range, mapper) {
            if !within(tick.y, top, bottom) {
                continue;
            }
            if style.tick_length_px > 0.0 {
                frame.lines.push(LinePrimitive::new(
                    left - style.tick_length_px,
                    tick.y,
                    left,
                    tick.y,
                    tick_width,
                    style.tick_color,
                ));
            }
            frame.texts.push(TextPrimitive::new(
                format_value_label(tick.value),
                left - style.tick_length_px - LABEL_GAP_PX,
                tick.y - style.font_size_px / 2.0,
                style.font_size_px,
                style.text_color,
                TextHAlign::Right,
            ));
        }
    }

    for tick in index_ticks(values.len(), mapper) {
        if !within(tick.x, left, right) {
            continue;
        }
        if style.tick_length_px > 0.0 {
            frame.lines.push(LinePrimitive::new(
                tick.x,
                bottom,
                tick.x,
                bottom + style.tick_length_px,
                tick_width,
                style.tick_color,
            ));
        }
        frame.texts.push(TextPrimitive::new(
            tick.index.to_string(),
            tick.x,
            bottom + style.tick_length_px + LABEL_GAP_PX,
            style.font_size_px,
            style.text_color,
            TextHAlign::Center,
        ));
    }
}

fn push_axis_titles(
    frame: &mut RenderFrame,
    config: &PanelConfig,
    mapper: CoordinateMapper,
    titles: &AxisTitles,
) {
    let style = config.style;
    let layout = mapper.layout();
    let font = style.font_size_px;

    if !titles.x.is_empty() {
        frame.texts.push(TextPrimitive::new(
            titles.x.clone(),
            layout.padding + layout.graph_width() / 2.0,
            f64::from(layout.viewport.height) - font - 2.0 * LABEL_GAP_PX,
            font,
            style.text_color,
            TextHAlign::Center,
        ));
    }
    if !titles.y.is_empty() {
        frame.texts.push(
            TextPrimitive::new(
                titles.y.clone(),
                LABEL_GAP_PX,
                layout.padding + layout.graph_height() / 2.0,
                font,
                style.text_color,
                TextHAlign::Center,
            )
            .rotated(FRAC_PI_2),
        );
    }
}

fn within(position: f64, start: f64, end: f64) -> bool {
    position >= start - PLOT_EDGE_EPSILON_PX && position <= end + PLOT_EDGE_EPSILON_PX
}

fn format_value_label(value: f64) -> String {
    // Avoid "-0.00" for ticks that land on zero after rounding.
    let rounded = (value * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.2}")
}
