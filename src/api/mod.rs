//! Host-facing surface: panel configuration, the host contract and the
//! `SequencePanel` composition root.

mod config;
mod host;
mod panel;
mod render_frame_builder;

pub use config::{
    AxisTitles, PANEL_CONFIG_JSON_SCHEMA_V1, PanelConfig, PanelConfigJsonContractV1, PanelStyle,
};
pub use host::{HeadlessHost, PanelHost};
pub use panel::{PanelEvent, PanelSnapshot, SequencePanel};
pub use render_frame_builder::build_render_frame;
