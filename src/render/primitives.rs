use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::error::{PlotError, PlotResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> PlotResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn ensure_finite(values: &[f64], what: &str) -> PlotResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(PlotError::InvalidData(format!("{what} must be finite")))
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    #[must_use]
    pub const fn between(from: PixelPoint, to: PixelPoint, stroke_width: f64, color: Color) -> Self {
        Self::new(from.x, from.y, to.x, to.y, stroke_width, color)
    }

    pub fn validate(self) -> PlotResult<()> {
        ensure_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(PlotError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one circle; markers use the filled variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center: PixelPoint,
    pub radius: f64,
    pub filled: bool,
    pub color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn filled(center: PixelPoint, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            filled: true,
            color,
        }
    }

    #[must_use]
    pub const fn stroked(center: PixelPoint, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            filled: false,
            color,
        }
    }

    pub fn validate(self) -> PlotResult<()> {
        ensure_finite(&[self.center.x, self.center.y], "circle center")?;
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(PlotError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Option<Color>,
    pub border_color: Color,
    pub border_width: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn outline(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        border_width: f64,
        border_color: Color,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color: None,
            border_color,
            border_width,
        }
    }

    #[must_use]
    pub const fn with_fill(mut self, fill_color: Color) -> Self {
        self.fill_color = Some(fill_color);
        self
    }

    pub fn validate(self) -> PlotResult<()> {
        ensure_finite(
            &[self.x, self.y, self.width, self.height],
            "rectangle geometry",
        )?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(PlotError::InvalidData(
                "rectangle size must be >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(PlotError::InvalidData(
                "rectangle border width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill_color {
            fill.validate()?;
        }
        self.border_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    /// Counter-clockwise rotation around `(x, y)` in radians.
    pub rotation_rad: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            rotation_rad: 0.0,
        }
    }

    #[must_use]
    pub fn rotated(mut self, rotation_rad: f64) -> Self {
        self.rotation_rad = rotation_rad;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.text.is_empty() {
            return Err(PlotError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        ensure_finite(&[self.x, self.y, self.rotation_rad], "text placement")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(PlotError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{CirclePrimitive, Color, RectPrimitive};
    use crate::core::PixelPoint;

    #[test]
    fn stroked_circle_keeps_outline_only() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let circle = CirclePrimitive::stroked(PixelPoint::new(4.0, 4.0), 3.0, black);
        assert!(!circle.filled);
        circle.validate().expect("valid circle");
        assert!(CirclePrimitive::filled(PixelPoint::new(4.0, 4.0), 3.0, black).filled);
    }

    #[test]
    fn rect_fill_is_validated() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let rect = RectPrimitive::outline(0.0, 0.0, 10.0, 5.0, 1.0, black)
            .with_fill(Color::rgba(0.5, 0.5, 0.5, 0.25));
        assert_eq!(rect.fill_color, Some(Color::rgba(0.5, 0.5, 0.5, 0.25)));
        rect.validate().expect("valid rect");

        let bad = RectPrimitive::outline(0.0, 0.0, 10.0, 5.0, 1.0, black)
            .with_fill(Color::rgb(2.0, 0.0, 0.0));
        assert!(bad.validate().is_err());
    }
}
