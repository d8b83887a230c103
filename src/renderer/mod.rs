//! WebGPU rendering module
//!
//! The scene is drawn as plain colored triangles: filled circles for the
//! player, stroked circles for the rings.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use frame::build_frame;
pub use pipeline::RenderState;
pub use viewport::Viewport;
