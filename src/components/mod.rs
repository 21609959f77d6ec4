pub mod app;
pub mod map_controls;
pub mod map_view;
pub mod sidebar;
pub mod status_update_panel;

pub use app::App;
