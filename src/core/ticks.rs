use smallvec::SmallVec;

use crate::core::{CoordinateMapper, ValueRange};

/// Number of value-axis ticks, including both range endpoints.
pub const VALUE_TICK_COUNT: usize = 6;

/// Target number of index-axis ticks before striding kicks in.
pub const INDEX_TICK_TARGET: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueTick {
    pub value: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexTick {
    pub index: usize,
    pub x: f64,
}

/// Value ticks at `min + i * span / 5` for `i` in `0..6`.
#[must_use]
pub fn value_ticks(range: ValueRange, mapper: CoordinateMapper) -> SmallVec<[ValueTick; 8]> {
    let step = range.span() / (VALUE_TICK_COUNT - 1) as f64;
    (0..VALUE_TICK_COUNT)
        .map(|i| {
            let value = range.min + i as f64 * step;
            ValueTick {
                value,
                y: mapper.value_to_y(value),
            }
        })
        .collect()
}

/// Stride between labelled indices: `max(1, len / 10)`.
#[must_use]
pub fn index_tick_stride(len: usize) -> usize {
    (len / INDEX_TICK_TARGET).max(1)
}

#[must_use]
pub fn index_ticks(len: usize, mapper: CoordinateMapper) -> SmallVec<[IndexTick; 16]> {
    (0..len)
        .step_by(index_tick_stride(len))
        .map(|index| IndexTick {
            index,
            x: mapper.index_to_x(index),
        })
        .collect()
}
