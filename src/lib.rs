//! seqplot: editable point-sequence plot.
//!
//! The crate maps a 1-D sequence onto a 2-D plot, keeps one cached
//! off-screen bitmap of it, and lets a pointer drag individual samples to new
//! values. Windowing, event loops and text shaping stay with the host; the
//! host plugs in through [`api::PanelHost`] and a [`render::BitmapTarget`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{PanelConfig, PanelEvent, PanelHost, SequencePanel};
pub use error::{PlotError, PlotResult};
