//! UI layer for the desktop client: the form window and its theme.

pub mod app;
pub mod theme;

pub use app::CropAdvisorApp;
