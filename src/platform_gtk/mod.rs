use std::cell::RefCell;
use std::rc::Rc;

use gtk::prelude::*;
use gtk4 as gtk;
use tracing::warn;

use crate::api::{PanelConfig, PanelHost, SequencePanel};
use crate::core::{PixelPoint, Viewport};
use crate::error::PlotResult;
use crate::render::CairoRenderer;

type SharedPanel = Rc<RefCell<SequencePanel<CairoRenderer>>>;

/// `DrawingArea` wrapper that feeds GTK input into a [`SequencePanel`].
///
/// The panel lives on the GTK main thread behind `Rc<RefCell<_>>`; the drag
/// gesture's implicit grab plays the role of pointer capture.
pub struct GtkSequencePanel {
    area: gtk::DrawingArea,
    panel: SharedPanel,
}

impl GtkSequencePanel {
    pub fn new(config: PanelConfig, values: Vec<f64>, width: i32, height: i32) -> PlotResult<Self> {
        let area = gtk::DrawingArea::new();
        area.set_content_width(width);
        area.set_content_height(height);

        let renderer = CairoRenderer::new(width.max(1), height.max(1))?;
        let panel = SequencePanel::new(renderer, config, values, viewport_from(width, height))?;
        let panel = Rc::new(RefCell::new(panel));
        wire_area(&area, &panel);

        Ok(Self { area, panel })
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    #[must_use]
    pub fn panel(&self) -> SharedPanel {
        Rc::clone(&self.panel)
    }

    pub fn replace_values(&self, values: Vec<f64>) -> PlotResult<()> {
        self.panel.borrow_mut().replace_values(values)?;
        self.area.queue_draw();
        Ok(())
    }
}

struct AreaHost<'a> {
    area: &'a gtk::DrawingArea,
    context: Option<&'a cairo::Context>,
    gesture: Option<&'a gtk::GestureDrag>,
}

impl<'a> AreaHost<'a> {
    fn input(area: &'a gtk::DrawingArea, gesture: &'a gtk::GestureDrag) -> Self {
        Self {
            area,
            context: None,
            gesture: Some(gesture),
        }
    }
}

impl PanelHost<cairo::ImageSurface> for AreaHost<'_> {
    fn client_size(&self) -> Viewport {
        viewport_from(self.area.width(), self.area.height())
    }

    fn blit(&mut self, bitmap: &cairo::ImageSurface, origin: PixelPoint) {
        let Some(context) = self.context else {
            return;
        };
        let result = context
            .set_source_surface(bitmap, origin.x, origin.y)
            .and_then(|()| context.paint());
        if let Err(err) = result {
            warn!(error = %err, "failed to blit panel bitmap");
        }
    }

    fn capture_pointer(&mut self) {
        if let Some(gesture) = self.gesture {
            gesture.set_state(gtk::EventSequenceState::Claimed);
        }
    }

    // GTK drops the implicit grab when the button is released.
    fn release_pointer(&mut self) {}

    fn request_repaint(&mut self) {
        self.area.queue_draw();
    }
}

fn wire_area(area: &gtk::DrawingArea, panel: &SharedPanel) {
    let draw_panel = Rc::clone(panel);
    area.set_draw_func(move |area, context, _width, _height| {
        let Ok(mut panel) = draw_panel.try_borrow_mut() else {
            warn!("panel busy during draw; skipping frame");
            return;
        };
        let mut host = AreaHost {
            area,
            context: Some(context),
            gesture: None,
        };
        panel.paint(&mut host);
    });

    let resize_panel = Rc::clone(panel);
    area.connect_resize(move |area, _width, _height| {
        if let Ok(mut panel) = resize_panel.try_borrow_mut() {
            let mut host = AreaHost {
                area,
                context: None,
                gesture: None,
            };
            panel.on_resize(&mut host);
        }
    });

    let gesture = gtk::GestureDrag::new();
    gesture.set_button(gtk::gdk::BUTTON_PRIMARY);

    let begin_panel = Rc::clone(panel);
    let begin_area = area.clone();
    gesture.connect_drag_begin(move |gesture, x, y| {
        if let Ok(mut panel) = begin_panel.try_borrow_mut() {
            panel.on_pointer_down(&mut AreaHost::input(&begin_area, gesture), x, y);
        }
    });

    let update_panel = Rc::clone(panel);
    let update_area = area.clone();
    gesture.connect_drag_update(move |gesture, offset_x, offset_y| {
        let Some((start_x, start_y)) = gesture.start_point() else {
            return;
        };
        if let Ok(mut panel) = update_panel.try_borrow_mut() {
            panel.on_pointer_move(
                &mut AreaHost::input(&update_area, gesture),
                start_x + offset_x,
                start_y + offset_y,
                true,
            );
        }
    });

    let end_panel = Rc::clone(panel);
    let end_area = area.clone();
    gesture.connect_drag_end(move |gesture, offset_x, offset_y| {
        let (start_x, start_y) = gesture.start_point().unwrap_or_default();
        if let Ok(mut panel) = end_panel.try_borrow_mut() {
            panel.on_pointer_up(
                &mut AreaHost::input(&end_area, gesture),
                start_x + offset_x,
                start_y + offset_y,
            );
        }
    });

    let cancel_panel = Rc::clone(panel);
    let cancel_area = area.clone();
    gesture.connect_cancel(move |gesture, _sequence| {
        if let Ok(mut panel) = cancel_panel.try_borrow_mut() {
            panel.on_capture_lost(&mut AreaHost::input(&cancel_area, gesture));
        }
    });

    area.add_controller(gesture);
}

fn viewport_from(width: i32, height: i32) -> Viewport {
    Viewport::new(
        u32::try_from(width).unwrap_or(0),
        u32::try_from(height).unwrap_or(0),
    )
}
