pub mod app;
pub mod detail_panel;
pub mod legend_panel;
pub mod map_controls;
pub mod map_view;
pub mod marker_pin;
