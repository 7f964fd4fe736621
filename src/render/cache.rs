use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{PlotError, PlotResult};
use crate::render::{BitmapTarget, RenderFrame};

/// Result of one rebuild attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// Nothing was invalidated; the current bitmap is still valid.
    Clean,
    /// A new bitmap replaced the previous one.
    Rebuilt { generation: u64 },
    /// The surface has no drawable area; the previous bitmap is retained and
    /// the cache stays invalidated until the next resize.
    SkippedZeroSize,
    /// Frame building or rasterization failed; the previous bitmap is retained.
    Failed,
}

impl RebuildOutcome {
    #[must_use]
    pub fn is_rebuilt(self) -> bool {
        matches!(self, Self::Rebuilt { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderCacheStats {
    pub rebuilds: u64,
    pub skipped: u64,
    pub failures: u64,
    pub blits: u64,
}

/// Owns the single off-screen bitmap of a panel.
///
/// Content is rasterized only on rebuild; paint just hands the committed
/// bitmap to the host. A rebuild builds the whole frame first and lets the
/// target swap it in atomically, so a paint never observes a half-drawn image.
#[derive(Debug)]
pub struct RenderCache<R: BitmapTarget> {
    target: R,
    invalidated: bool,
    generation: u64,
    committed: Option<RenderFrame>,
    stats: RenderCacheStats,
}

impl<R: BitmapTarget> RenderCache<R> {
    /// Creates an invalidated cache so the first paint performs the mount rebuild.
    #[must_use]
    pub fn new(target: R) -> Self {
        Self {
            target,
            invalidated: true,
            generation: 0,
            committed: None,
            stats: RenderCacheStats::default(),
        }
    }

    pub fn invalidate(&mut self) {
        if !self.invalidated {
            trace!(generation = self.generation, "render cache invalidated");
        }
        self.invalidated = true;
    }

    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Number of bitmaps committed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn stats(&self) -> RenderCacheStats {
        self.stats
    }

    /// Scene currently rasterized into the bitmap.
    #[must_use]
    pub fn committed_frame(&self) -> Option<&RenderFrame> {
        self.committed.as_ref()
    }

    #[must_use]
    pub fn target(&self) -> &R {
        &self.target
    }

    #[must_use]
    pub fn into_target(self) -> R {
        self.target
    }

    pub fn rebuild_if_invalidated<F>(&mut self, build: F) -> RebuildOutcome
    where
        F: FnOnce() -> PlotResult<RenderFrame>,
    {
        if !self.invalidated {
            return RebuildOutcome::Clean;
        }
        self.rebuild(build)
    }

    /// Rebuilds regardless of the invalidation flag.
    pub fn rebuild<F>(&mut self, build: F) -> RebuildOutcome
    where
        F: FnOnce() -> PlotResult<RenderFrame>,
    {
        let frame = match build() {
            Ok(frame) => frame,
            Err(PlotError::InvalidViewport { width, height }) => {
                debug!(width, height, "skipping rebuild for zero-sized surface");
                self.invalidated = true;
                self.stats.skipped += 1;
                return RebuildOutcome::SkippedZeroSize;
            }
            Err(err) => {
                warn!(error = %err, "failed to build render frame; keeping previous bitmap");
                self.stats.failures += 1;
                return RebuildOutcome::Failed;
            }
        };

        if let Err(err) = self.target.render(&frame) {
            warn!(error = %err, "failed to rasterize render frame; keeping previous bitmap");
            self.stats.failures += 1;
            return RebuildOutcome::Failed;
        }

        self.generation += 1;
        self.stats.rebuilds += 1;
        self.invalidated = false;
        debug!(
            generation = self.generation,
            segments = frame.segments.len(),
            markers = frame.markers.len(),
            "render cache rebuilt"
        );
        self.committed = Some(frame);
        RebuildOutcome::Rebuilt {
            generation: self.generation,
        }
    }

    /// Hands the committed bitmap to `blit`.
    ///
    /// Returns `false` when nothing has been committed yet.
    pub fn blit<F>(&mut self, blit: F) -> bool
    where
        F: FnOnce(&R::Bitmap),
    {
        if self.committed.is_none() {
            return false;
        }
        blit(self.target.bitmap());
        self.stats.blits += 1;
        true
    }
}
