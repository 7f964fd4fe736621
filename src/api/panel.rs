use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{CoordinateMapper, PixelPoint, Sequence, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{DragContext, DragController, DragEffect, DragState, HitTester, PointerInput};
use crate::render::{BitmapTarget, RebuildOutcome, RenderCache, RenderCacheStats, RenderFrame};

use super::render_frame_builder::build_render_frame;
use super::{PanelConfig, PanelHost};

/// Host events a panel reacts to, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64, primary_down: bool },
    PointerUp { x: f64, y: f64 },
    CaptureLost,
    /// Size changed; the panel re-queries `PanelHost::client_size`.
    Resize,
}

/// Serializable diagnostics view of a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub values: Vec<f64>,
    pub drag_state: DragState,
    pub viewport: Viewport,
    pub cache_generation: u64,
    pub cache_invalidated: bool,
    pub cache_stats: RenderCacheStats,
}

impl PanelSnapshot {
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize panel snapshot: {e}")))
    }
}

/// Editable sequence plot bound to one host surface.
///
/// The panel privately owns its samples and its render cache. Every handler
/// takes the host explicitly, runs to completion on the caller's thread and
/// never returns an error: degenerate geometry falls back to a no-op.
pub struct SequencePanel<R: BitmapTarget> {
    config: PanelConfig,
    sequence: Sequence,
    viewport: Viewport,
    hit_tester: HitTester,
    drag: DragController,
    cache: RenderCache<R>,
}

impl<R: BitmapTarget> SequencePanel<R> {
    pub fn new(
        target: R,
        config: PanelConfig,
        values: Vec<f64>,
        viewport: Viewport,
    ) -> PlotResult<Self> {
        config.validate()?;
        let hit_tester = HitTester::new(config.hit_radius)?;
        let sequence = Sequence::new(values)?;
        debug!(
            len = sequence.len(),
            width = viewport.width,
            height = viewport.height,
            draggable = config.draggable,
            "sequence panel created"
        );
        Ok(Self {
            config,
            sequence,
            viewport,
            hit_tester,
            drag: DragController::new(),
            cache: RenderCache::new(target),
        })
    }

    /// Creates the panel sized to the host and schedules the mount paint.
    pub fn mount<H>(target: R, config: PanelConfig, values: Vec<f64>, host: &mut H) -> PlotResult<Self>
    where
        H: PanelHost<R::Bitmap>,
    {
        let panel = Self::new(target, config, values, host.client_size())?;
        host.request_repaint();
        Ok(panel)
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    #[must_use]
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.sequence.values()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    #[must_use]
    pub fn cache(&self) -> &RenderCache<R> {
        &self.cache
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        self.cache.target()
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.cache.into_target()
    }

    /// Mapper for the current samples and size, `None` for an empty plot area.
    #[must_use]
    pub fn mapper(&self) -> Option<CoordinateMapper> {
        CoordinateMapper::resolve(self.config.mapping(), self.viewport, self.sequence.values()).ok()
    }

    /// Marker under `(x, y)`, using the same geometry as the last rebuild would.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        let mapper = self.mapper()?;
        self.hit_tester
            .locate(mapper, self.sequence.values(), PixelPoint::new(x, y))
    }

    pub fn build_render_frame(&self) -> PlotResult<RenderFrame> {
        build_render_frame(&self.config, self.sequence.values(), self.viewport)
    }

    /// Replaces the samples supplied by the surrounding application.
    ///
    /// An active drag keeps its index; the next move re-checks it against the
    /// new length.
    pub fn replace_values(&mut self, values: Vec<f64>) -> PlotResult<()> {
        self.sequence = Sequence::new(values)?;
        debug!(len = self.sequence.len(), "sequence replaced");
        self.cache.invalidate();
        Ok(())
    }

    pub fn handle_event<H>(&mut self, host: &mut H, event: PanelEvent) -> DragEffect
    where
        H: PanelHost<R::Bitmap>,
    {
        match event {
            PanelEvent::PointerDown { x, y } => self.on_pointer_down(host, x, y),
            PanelEvent::PointerMove { x, y, primary_down } => {
                self.on_pointer_move(host, x, y, primary_down)
            }
            PanelEvent::PointerUp { x, y } => self.on_pointer_up(host, x, y),
            PanelEvent::CaptureLost => self.on_capture_lost(host),
            PanelEvent::Resize => {
                self.on_resize(host);
                DragEffect::None
            }
        }
    }

    pub fn on_resize<H>(&mut self, host: &mut H)
    where
        H: PanelHost<R::Bitmap>,
    {
        let viewport = host.client_size();
        trace!(
            width = viewport.width,
            height = viewport.height,
            "panel resized"
        );
        self.viewport = viewport;
        self.cache.invalidate();
        host.request_repaint();
    }

    pub fn on_pointer_down<H>(&mut self, host: &mut H, x: f64, y: f64) -> DragEffect
    where
        H: PanelHost<R::Bitmap>,
    {
        if !self.config.draggable {
            return DragEffect::None;
        }
        self.dispatch(host, PointerInput::Down(PixelPoint::new(x, y)))
    }

    pub fn on_pointer_move<H>(&mut self, host: &mut H, x: f64, y: f64, primary_down: bool) -> DragEffect
    where
        H: PanelHost<R::Bitmap>,
    {
        self.dispatch(
            host,
            PointerInput::Move {
                position: PixelPoint::new(x, y),
                primary_down,
            },
        )
    }

    pub fn on_pointer_up<H>(&mut self, host: &mut H, x: f64, y: f64) -> DragEffect
    where
        H: PanelHost<R::Bitmap>,
    {
        self.dispatch(host, PointerInput::Up(PixelPoint::new(x, y)))
    }

    pub fn on_capture_lost<H>(&mut self, host: &mut H) -> DragEffect
    where
        H: PanelHost<R::Bitmap>,
    {
        self.dispatch(host, PointerInput::CaptureLost)
    }

    /// Rebuilds the bitmap if needed, then blits it at the client origin.
    ///
    /// Returns `true` when a bitmap was handed to the host.
    pub fn paint<H>(&mut self, host: &mut H) -> bool
    where
        H: PanelHost<R::Bitmap>,
    {
        self.rebuild_if_invalidated();
        self.cache
            .blit(|bitmap| host.blit(bitmap, PixelPoint::origin()))
    }

    pub fn rebuild_if_invalidated(&mut self) -> RebuildOutcome {
        let (config, sequence, viewport) = (&self.config, &self.sequence, self.viewport);
        self.cache
            .rebuild_if_invalidated(|| build_render_frame(config, sequence.values(), viewport))
    }

    #[must_use]
    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            values: self.sequence.values().to_vec(),
            drag_state: self.drag.state(),
            viewport: self.viewport,
            cache_generation: self.cache.generation(),
            cache_invalidated: self.cache.is_invalidated(),
            cache_stats: self.cache.stats(),
        }
    }

    fn dispatch<H>(&mut self, host: &mut H, input: PointerInput) -> DragEffect
    where
        H: PanelHost<R::Bitmap>,
    {
        let mapper = self.mapper();
        let effect = self.drag.handle(
            input,
            DragContext {
                mapper,
                hit_tester: self.hit_tester,
                bounds: self.config.value_bounds,
                sequence: &mut self.sequence,
            },
        );
        self.apply_effect(host, effect);
        effect
    }

    fn apply_effect<H>(&mut self, host: &mut H, effect: DragEffect)
    where
        H: PanelHost<R::Bitmap>,
    {
        if effect.captures_pointer() {
            host.capture_pointer();
        }
        if effect.releases_pointer() {
            host.release_pointer();
        }
        if effect.changes_content() {
            self.cache.invalidate();
            host.request_repaint();
        }
        if let DragEffect::Committed { .. } = effect {
            let (config, sequence, viewport) = (&self.config, &self.sequence, self.viewport);
            self.cache
                .rebuild(|| build_render_frame(config, sequence.values(), viewport));
            host.request_repaint();
        }
    }
}
