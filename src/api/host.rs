use crate::core::{PixelPoint, Viewport};

/// Services a host UI surface provides to a [`super::SequencePanel`].
///
/// `B` is the bitmap type of the panel's render target. The panel calls these
/// synchronously from inside its event handlers and paint routine.
pub trait PanelHost<B: ?Sized> {
    /// Current client size in pixels.
    fn client_size(&self) -> Viewport;

    /// Copies the cached bitmap onto the visible surface.
    fn blit(&mut self, bitmap: &B, origin: PixelPoint);

    /// Routes all further pointer events to this panel until released.
    fn capture_pointer(&mut self);

    fn release_pointer(&mut self);

    /// Schedules a paint on the host's next frame.
    fn request_repaint(&mut self);
}

/// In-memory host for tests and headless embedding.
///
/// Records every interaction and keeps a copy of the last blitted bitmap.
#[derive(Debug, Clone)]
pub struct HeadlessHost<B> {
    client_size: Viewport,
    captured: bool,
    pub capture_count: usize,
    pub release_count: usize,
    pub repaint_requests: usize,
    pub blit_count: usize,
    last_blit: Option<(B, PixelPoint)>,
}

impl<B> HeadlessHost<B> {
    #[must_use]
    pub fn new(client_size: Viewport) -> Self {
        Self {
            client_size,
            captured: false,
            capture_count: 0,
            release_count: 0,
            repaint_requests: 0,
            blit_count: 0,
            last_blit: None,
        }
    }

    pub fn set_client_size(&mut self, client_size: Viewport) {
        self.client_size = client_size;
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    #[must_use]
    pub fn last_blit(&self) -> Option<&B> {
        self.last_blit.as_ref().map(|(bitmap, _)| bitmap)
    }

    #[must_use]
    pub fn last_blit_origin(&self) -> Option<PixelPoint> {
        self.last_blit.as_ref().map(|(_, origin)| *origin)
    }

    /// Returns and resets the pending repaint counter.
    pub fn take_repaint_requests(&mut self) -> usize {
        std::mem::take(&mut self.repaint_requests)
    }
}

impl<B: Clone> PanelHost<B> for HeadlessHost<B> {
    fn client_size(&self) -> Viewport {
        self.client_size
    }

    fn blit(&mut self, bitmap: &B, origin: PixelPoint) {
        self.blit_count += 1;
        self.last_blit = Some((bitmap.clone(), origin));
    }

    fn capture_pointer(&mut self) {
        self.captured = true;
        self.capture_count += 1;
    }

    fn release_pointer(&mut self) {
        self.captured = false;
        self.release_count += 1;
    }

    fn request_repaint(&mut self) {
        self.repaint_requests += 1;
    }
}
