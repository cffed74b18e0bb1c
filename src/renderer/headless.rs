//! Windowless render surface
//!
//! Tessellates every frame without touching a GPU and keeps counters, for the
//! native binary and tests.

use super::frame::DrawList;
use super::shapes::tessellate;
use super::RenderSurface;

#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    /// Frames presented so far
    pub frames: u64,
    /// Vertices produced by the last frame
    pub last_vertex_count: usize,
    /// Draw commands in the last frame
    pub last_command_count: usize,
    /// Largest vertex count seen
    pub peak_vertex_count: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for HeadlessSurface {
    fn present(&mut self, frame: &DrawList) {
        let vertices = tessellate(frame);
        self.frames += 1;
        self.last_command_count = frame.commands.len();
        self.last_vertex_count = vertices.len();
        self.peak_vertex_count = self.peak_vertex_count.max(vertices.len());
    }
}
