//! Reusable widgets
//!
//! The drawer and its overlay, plus the demo content they are shown over.

pub mod drawer;
pub mod home;
pub mod menu;
pub mod overlay;

pub use drawer::DrawerWidget;
pub use home::HomeWidget;
pub use menu::MenuWidget;
pub use overlay::OverlayWidget;
