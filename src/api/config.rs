use serde::{Deserialize, Serialize};

use crate::core::{AxisConvention, FixedScale, MappingConfig, ValueBounds};
use crate::error::{PlotError, PlotResult};
use crate::interaction::DEFAULT_HIT_RADIUS_PX;
use crate::render::Color;

pub const PANEL_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Visual styling for every primitive a panel emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    pub background: Color,
    pub line_color: Color,
    pub line_width: f64,
    pub marker_color: Color,
    pub marker_radius: f64,
    pub border_color: Color,
    pub border_width: f64,
    pub tick_color: Color,
    pub tick_length_px: f64,
    pub text_color: Color,
    pub font_size_px: f64,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            line_color: Color::rgb(0.16, 0.38, 1.0),
            line_width: 1.5,
            marker_color: Color::rgb(0.85, 0.2, 0.2),
            marker_radius: 5.0,
            border_color: Color::rgb(0.2, 0.2, 0.2),
            border_width: 1.0,
            tick_color: Color::rgb(0.35, 0.35, 0.35),
            tick_length_px: 5.0,
            text_color: Color::rgb(0.1, 0.1, 0.1),
            font_size_px: 10.0,
        }
    }
}

impl PanelStyle {
    pub fn validate(self) -> PlotResult<()> {
        for color in [
            self.background,
            self.line_color,
            self.marker_color,
            self.border_color,
            self.tick_color,
            self.text_color,
        ] {
            color
                .validate()
                .map_err(|err| PlotError::InvalidConfig(err.to_string()))?;
        }
        for (name, value) in [
            ("line_width", self.line_width),
            ("marker_radius", self.marker_radius),
            ("font_size_px", self.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidConfig(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("border_width", self.border_width),
            ("tick_length_px", self.tick_length_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlotError::InvalidConfig(format!(
                    "style `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Optional axis captions; the value-axis title is drawn rotated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisTitles {
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
}

/// Capabilities and layout of one panel.
///
/// Serializable so hosts can keep panel setup next to their own settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Editable panels draw markers and accept drags.
    #[serde(default = "default_draggable")]
    pub draggable: bool,
    #[serde(default)]
    pub axis_convention: AxisConvention,
    /// `None` derives scales from the data and client size.
    #[serde(default)]
    pub fixed_scale: Option<FixedScale>,
    /// Interval dragged values are clamped into.
    #[serde(default)]
    pub value_bounds: ValueBounds,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f64,
    /// Plot border, value ticks and index ticks.
    #[serde(default = "default_show_axes")]
    pub show_axes: bool,
    #[serde(default)]
    pub axis_titles: Option<AxisTitles>,
    #[serde(default)]
    pub style: PanelStyle,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            draggable: default_draggable(),
            axis_convention: AxisConvention::default(),
            fixed_scale: None,
            value_bounds: ValueBounds::default(),
            padding: default_padding(),
            hit_radius: default_hit_radius(),
            show_axes: default_show_axes(),
            axis_titles: None,
            style: PanelStyle::default(),
        }
    }
}

impl PanelConfig {
    /// Display-only plot: bottom-up axis, data-driven scales, ticks on.
    #[must_use]
    pub fn labeled() -> Self {
        Self {
            draggable: false,
            ..Self::default()
        }
    }

    /// Free-drag canvas: top-down axis, fixed scales, values kept in `[0, 1]`.
    #[must_use]
    pub fn free_drag(scale_x: f64, scale_y: f64) -> Self {
        Self {
            draggable: true,
            axis_convention: AxisConvention::TopDown,
            fixed_scale: Some(FixedScale::new(scale_x, scale_y)),
            value_bounds: ValueBounds::Fixed { min: 0.0, max: 1.0 },
            show_axes: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_value_bounds(mut self, value_bounds: ValueBounds) -> Self {
        self.value_bounds = value_bounds;
        self
    }

    #[must_use]
    pub fn with_axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.axis_titles = Some(AxisTitles {
            x: x.into(),
            y: y.into(),
        });
        self
    }

    #[must_use]
    pub fn mapping(&self) -> MappingConfig {
        MappingConfig {
            padding: self.padding,
            axis_convention: self.axis_convention,
            fixed_scale: self.fixed_scale,
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(PlotError::InvalidConfig(
                "padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.hit_radius.is_finite() || self.hit_radius < 0.0 {
            return Err(PlotError::InvalidConfig(
                "hit radius must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(fixed) = self.fixed_scale {
            fixed.validate()?;
        }
        self.value_bounds.validate()?;
        self.style.validate()
    }

    pub fn to_json_contract_v1_pretty(&self) -> PlotResult<String> {
        let payload = PanelConfigJsonContractV1 {
            schema_version: PANEL_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize panel config contract v1: {e}"))
        })
    }

    /// Parses either a bare config object or a versioned contract envelope.
    pub fn from_json_compat_str(input: &str) -> PlotResult<Self> {
        let config = match serde_json::from_str::<PanelConfigJsonContractV1>(input) {
            Ok(payload) => {
                if payload.schema_version != PANEL_CONFIG_JSON_SCHEMA_V1 {
                    return Err(PlotError::InvalidData(format!(
                        "unsupported panel config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
            Err(_) => serde_json::from_str::<Self>(input).map_err(|e| {
                PlotError::InvalidData(format!("failed to parse panel config json: {e}"))
            })?,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: PanelConfig,
}

fn default_draggable() -> bool {
    true
}

fn default_padding() -> f64 {
    50.0
}

fn default_hit_radius() -> f64 {
    DEFAULT_HIT_RADIUS_PX
}

fn default_show_axes() -> bool {
    true
}
