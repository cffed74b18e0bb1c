//! Rendering module
//!
//! `frame` composes a draw list from the game state, `shapes` tessellates it
//! into triangles and `pipeline` draws those with WebGPU. Anything that can
//! show a `DrawList` implements `RenderSurface`.

pub mod frame;
pub mod headless;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::{DrawCmd, DrawList, compose};
pub use headless::HeadlessSurface;
pub use pipeline::RenderState;

/// Destination for composed frames
pub trait RenderSurface {
    /// Draw one frame. Surface errors are handled internally.
    fn present(&mut self, frame: &DrawList);
}
