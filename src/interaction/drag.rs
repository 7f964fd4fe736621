use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{CoordinateMapper, PixelPoint, Sequence, ValueBounds};
use crate::interaction::HitTester;

/// Drag lifecycle of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { index: usize },
}

impl DragState {
    #[must_use]
    pub fn selected_index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Dragging { index } => Some(index),
        }
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Pointer input in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(PixelPoint),
    Move {
        position: PixelPoint,
        primary_down: bool,
    },
    Up(PixelPoint),
    /// The host revoked pointer capture; handled exactly like `Up`.
    CaptureLost,
}

/// Side effect requested by a transition; the panel applies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    None,
    /// Entered `Dragging`; acquire pointer capture.
    Started { index: usize },
    /// A sample changed; invalidate the render cache and repaint.
    ValueChanged { index: usize, value: f64 },
    /// Gesture finished; release capture and commit a final rebuild.
    Committed { index: usize },
    /// The selected index went stale; release capture without writing.
    Aborted { index: usize },
}

impl DragEffect {
    #[must_use]
    pub fn captures_pointer(self) -> bool {
        matches!(self, Self::Started { .. })
    }

    #[must_use]
    pub fn releases_pointer(self) -> bool {
        matches!(self, Self::Committed { .. } | Self::Aborted { .. })
    }

    #[must_use]
    pub fn changes_content(self) -> bool {
        matches!(self, Self::ValueChanged { .. } | Self::Aborted { .. })
    }
}

/// Everything a transition may read or write besides the controller state.
///
/// `mapper` is `None` while the surface has no drawable area.
pub struct DragContext<'a> {
    pub mapper: Option<CoordinateMapper>,
    pub hit_tester: HitTester,
    pub bounds: ValueBounds,
    pub sequence: &'a mut Sequence,
}

/// `Idle` / `Dragging` state machine that edits one sample at a time.
///
/// The controller never draws; every transition reports a [`DragEffect`] and
/// the only direct write it performs is to the sequence in the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn handle(&mut self, input: PointerInput, ctx: DragContext<'_>) -> DragEffect {
        match (self.state, input) {
            (DragState::Idle, PointerInput::Down(position)) => self.begin(position, ctx),
            (DragState::Idle, _) => DragEffect::None,
            (DragState::Dragging { index }, PointerInput::Down(_)) => {
                trace!(index, "ignoring pointer down while dragging");
                DragEffect::None
            }
            (
                DragState::Dragging { index },
                PointerInput::Move {
                    position,
                    primary_down,
                },
            ) => {
                if !primary_down {
                    return DragEffect::None;
                }
                self.drag_to(index, position, ctx)
            }
            (DragState::Dragging { index }, PointerInput::Up(_) | PointerInput::CaptureLost) => {
                self.state = DragState::Idle;
                debug!(index, "drag committed");
                DragEffect::Committed { index }
            }
        }
    }

    fn begin(&mut self, position: PixelPoint, ctx: DragContext<'_>) -> DragEffect {
        let Some(mapper) = ctx.mapper else {
            return DragEffect::None;
        };
        match ctx
            .hit_tester
            .locate(mapper, ctx.sequence.values(), position)
        {
            Some(index) => {
                self.state = DragState::Dragging { index };
                debug!(index, x = position.x, y = position.y, "drag started");
                DragEffect::Started { index }
            }
            None => DragEffect::None,
        }
    }

    fn drag_to(&mut self, index: usize, position: PixelPoint, ctx: DragContext<'_>) -> DragEffect {
        if index >= ctx.sequence.len() {
            warn!(
                index,
                len = ctx.sequence.len(),
                "selected index no longer valid; aborting drag"
            );
            self.state = DragState::Idle;
            return DragEffect::Aborted { index };
        }
        let Some(mapper) = ctx.mapper else {
            return DragEffect::None;
        };
        if !position.y.is_finite() {
            return DragEffect::None;
        }
        let Some(range) = ctx.bounds.resolve(ctx.sequence.values()) else {
            return DragEffect::None;
        };

        let value = range.clamp(mapper.y_to_value(position.y));
        if ctx.sequence.get(index) == Some(value) {
            return DragEffect::None;
        }
        if let Err(err) = ctx.sequence.set(index, value) {
            warn!(index, error = %err, "rejected dragged value");
            return DragEffect::None;
        }
        trace!(index, value, "dragged sample");
        DragEffect::ValueChanged { index, value }
    }
}
