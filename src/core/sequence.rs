use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Ordered, editable list of samples shown by one panel.
///
/// Every stored value is finite. The only in-place mutation path is
/// [`Sequence::set`], which the drag controller uses while a gesture is active.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sequence {
    values: Vec<f64>,
}

impl Sequence {
    pub fn new(values: Vec<f64>) -> PlotResult<Self> {
        if let Some(position) = values.iter().position(|value| !value.is_finite()) {
            return Err(PlotError::InvalidData(format!(
                "sequence value at index {position} must be finite"
            )));
        }
        if let Some(range) = ValueRange::from_values(&values) {
            ensure_finite_span(range.min, range.max)?;
        }
        Ok(Self { values })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: f64) -> PlotResult<()> {
        if !value.is_finite() {
            return Err(PlotError::InvalidData(
                "sequence value must be finite".to_owned(),
            ));
        }
        let len = self.values.len();
        if index >= len {
            return Err(PlotError::InvalidData(format!(
                "index {index} out of range for length {len}"
            )));
        }
        let (min, max) = self
            .values
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != index)
            .fold((value, value), |(min, max), (_, other)| {
                (min.min(*other), max.max(*other))
            });
        ensure_finite_span(min, max)?;
        self.values[index] = value;
        Ok(())
    }

    /// Current `(min, max)` of the samples, `None` when empty.
    #[must_use]
    pub fn value_range(&self) -> Option<ValueRange> {
        ValueRange::from_values(&self.values)
    }

    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Rejects ranges whose width overflows `f64`, which no scale can map.
fn ensure_finite_span(min: f64, max: f64) -> PlotResult<()> {
    if (max - min).is_finite() {
        Ok(())
    } else {
        Err(PlotError::InvalidData(format!(
            "value span between {min} and {max} overflows"
        )))
    }
}

/// Derived `(min, max)` pair of a sequence or of a configured bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> PlotResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(PlotError::InvalidData(
                "value range must be finite with min <= max".to_owned(),
            ));
        }
        ensure_finite_span(min, max)?;
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), value| {
                (min.min(*value), max.max(*value))
            });
        Some(Self { min, max })
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }

    /// Width of the range, with a unit fallback for degenerate ranges.
    #[must_use]
    pub fn span(self) -> f64 {
        if self.is_degenerate() {
            1.0
        } else {
            self.max - self.min
        }
    }

    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Policy for the legal value interval used when clamping dragged samples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ValueBounds {
    /// Bounds follow the current sequence's min/max, recomputed on every move.
    #[default]
    DataDriven,
    /// Bounds are a fixed interval independent of the data.
    Fixed { min: f64, max: f64 },
}

impl ValueBounds {
    pub fn validate(self) -> PlotResult<()> {
        match self {
            Self::DataDriven => Ok(()),
            Self::Fixed { min, max } => ValueRange::new(min, max)
                .map(|_| ())
                .map_err(|_| {
                    PlotError::InvalidConfig(
                        "fixed value bounds must be finite with min <= max".to_owned(),
                    )
                }),
        }
    }

    /// Resolves the interval against the current samples.
    ///
    /// Returns `None` only for data-driven bounds over an empty sequence.
    #[must_use]
    pub fn resolve(self, values: &[f64]) -> Option<ValueRange> {
        match self {
            Self::DataDriven => ValueRange::from_values(values),
            Self::Fixed { min, max } => Some(ValueRange { min, max }),
        }
    }
}
