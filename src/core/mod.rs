pub mod mapper;
pub mod sequence;
pub mod ticks;
pub mod types;

pub use mapper::{AxisConvention, CoordinateMapper, FixedScale, LayoutParams, MappingConfig};
pub use sequence::{Sequence, ValueBounds, ValueRange};
pub use ticks::{IndexTick, ValueTick, index_tick_stride, index_ticks, value_ticks};
pub use types::{PixelPoint, Viewport};
