pub mod projection;
pub mod view;

pub use view::{MapAction, MapView, Marker};
