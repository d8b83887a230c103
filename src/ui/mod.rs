//! HUD presentation model
//!
//! Holds what the HUD should show; the frontend copies it into the page.

pub mod hud;

pub use hud::Hud;
