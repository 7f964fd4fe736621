//! Pointer interaction: marker hit-testing and the drag state machine.

mod drag;
mod hit_test;

pub use drag::{DragContext, DragController, DragEffect, DragState, PointerInput};
pub use hit_test::{DEFAULT_HIT_RADIUS_PX, HitTester};
