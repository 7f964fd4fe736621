use serde::{Deserialize, Serialize};

use crate::core::{PixelPoint, ValueRange, Viewport};
use crate::error::{PlotError, PlotResult};

/// Vertical orientation of the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisConvention {
    /// Larger values are drawn higher; `y` grows upward from the plot bottom.
    #[default]
    BottomUp,
    /// Larger values are drawn lower; `y` grows downward from the top padding.
    TopDown,
}

/// Externally supplied pixel scales that replace the data-driven ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedScale {
    /// Pixels per index step.
    pub scale_x: f64,
    /// Pixels per unit value.
    pub scale_y: f64,
    /// Value drawn at the padding edge of the value axis.
    #[serde(default)]
    pub value_origin: f64,
}

impl FixedScale {
    #[must_use]
    pub const fn new(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            value_origin: 0.0,
        }
    }

    #[must_use]
    pub const fn with_value_origin(mut self, value_origin: f64) -> Self {
        self.value_origin = value_origin;
        self
    }

    pub fn validate(self) -> PlotResult<()> {
        if !self.scale_x.is_finite() || self.scale_x <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "fixed scale_x must be finite and > 0".to_owned(),
            ));
        }
        if !self.scale_y.is_finite() || self.scale_y <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "fixed scale_y must be finite and > 0".to_owned(),
            ));
        }
        if !self.value_origin.is_finite() {
            return Err(PlotError::InvalidConfig(
                "fixed value_origin must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Configuration subset consumed by [`CoordinateMapper::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    pub padding: f64,
    pub axis_convention: AxisConvention,
    pub fixed_scale: Option<FixedScale>,
}

/// Immutable layout snapshot for one render pass or one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub viewport: Viewport,
    pub padding: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl LayoutParams {
    #[must_use]
    pub fn graph_width(self) -> f64 {
        f64::from(self.viewport.width) - 2.0 * self.padding
    }

    #[must_use]
    pub fn graph_height(self) -> f64 {
        f64::from(self.viewport.height) - 2.0 * self.padding
    }
}

/// Bidirectional mapping between data space `(index, value)` and pixel space.
///
/// Built per pass from the current samples; holds no reference to them.
/// The inverse functions are the exact algebraic inverses of the forward ones
/// for the active [`AxisConvention`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    layout: LayoutParams,
    convention: AxisConvention,
    value_origin: f64,
}

impl CoordinateMapper {
    /// Resolves scales for `values` inside `viewport`.
    ///
    /// Data-driven mode uses `graph_width / (n - 1)` horizontally and
    /// `graph_height / span` vertically, anchored at the range minimum.
    /// Single-point and empty inputs collapse `scale_x` to zero so every
    /// sample lands on the left padding boundary.
    pub fn resolve(config: MappingConfig, viewport: Viewport, values: &[f64]) -> PlotResult<Self> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !config.padding.is_finite() || config.padding < 0.0 {
            return Err(PlotError::InvalidConfig(
                "padding must be finite and >= 0".to_owned(),
            ));
        }

        let mut layout = LayoutParams {
            viewport,
            padding: config.padding,
            scale_x: 0.0,
            scale_y: 0.0,
        };
        if layout.graph_width() <= 0.0 || layout.graph_height() <= 0.0 {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let value_origin = match config.fixed_scale {
            Some(fixed) => {
                fixed.validate()?;
                layout.scale_x = fixed.scale_x;
                layout.scale_y = fixed.scale_y;
                fixed.value_origin
            }
            None => {
                let range = ValueRange::from_values(values);
                layout.scale_x = if values.len() >= 2 {
                    layout.graph_width() / (values.len() - 1) as f64
                } else {
                    0.0
                };
                let span = range.map_or(1.0, ValueRange::span);
                layout.scale_y = layout.graph_height() / span;
                range.map_or(0.0, |range| range.min)
            }
        };

        Ok(Self {
            layout,
            convention: config.axis_convention,
            value_origin,
        })
    }

    #[must_use]
    pub fn layout(self) -> LayoutParams {
        self.layout
    }

    #[must_use]
    pub fn convention(self) -> AxisConvention {
        self.convention
    }

    #[must_use]
    pub fn value_origin(self) -> f64 {
        self.value_origin
    }

    #[must_use]
    pub fn index_to_x(self, index: usize) -> f64 {
        self.layout.padding + index as f64 * self.layout.scale_x
    }

    #[must_use]
    pub fn value_to_y(self, value: f64) -> f64 {
        let offset = (value - self.value_origin) * self.layout.scale_y;
        match self.convention {
            AxisConvention::BottomUp => self.plot_bottom() - offset,
            AxisConvention::TopDown => self.layout.padding + offset,
        }
    }

    #[must_use]
    pub fn map(self, index: usize, value: f64) -> PixelPoint {
        PixelPoint::new(self.index_to_x(index), self.value_to_y(value))
    }

    /// Inverse of [`Self::value_to_y`].
    #[must_use]
    pub fn y_to_value(self, y: f64) -> f64 {
        let offset = match self.convention {
            AxisConvention::BottomUp => self.plot_bottom() - y,
            AxisConvention::TopDown => y - self.layout.padding,
        };
        self.value_origin + offset / self.layout.scale_y
    }

    /// Fractional index under `x`; `0.0` when the horizontal scale is collapsed.
    #[must_use]
    pub fn x_to_index(self, x: f64) -> f64 {
        if self.layout.scale_x == 0.0 {
            return 0.0;
        }
        (x - self.layout.padding) / self.layout.scale_x
    }

    #[must_use]
    pub fn plot_bottom(self) -> f64 {
        self.layout.padding + self.layout.graph_height()
    }

    /// Mapped marker centers, in index order.
    pub fn marker_centers(self, values: &[f64]) -> impl Iterator<Item = PixelPoint> + '_ {
        values
            .iter()
            .enumerate()
            .map(move |(index, value)| self.map(index, *value))
    }
}
