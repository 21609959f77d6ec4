pub mod campus;
pub mod drag;

pub use campus::{CampusAction, CampusState, SidebarEntry};
pub use drag::Drag;
