//! Shape tessellation for 2D primitives
//!
//! Everything becomes a triangle list in logical coordinates. Radial gradients
//! are approximated by interpolating vertex colours from centre to rim.

use glam::Vec2;
use std::f32::consts::PI;

use super::frame::{DrawCmd, DrawList};
use super::vertex::Vertex;
use crate::color::Rgba;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    radial_disk(center, radius, color, color, segments)
}

/// Generate vertices for a disk whose colour runs from `inner` to `outer`
pub fn radial_disk(center: Vec2, radius: f32, inner: Rgba, outer: Rgba, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, inner));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, outer));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, outer));
    }

    vertices
}

/// Generate vertices for a rotated square filled with a radial gradient.
///
/// The gradient radius equals the half extent, so edge midpoints reach the
/// outer colour and corners stay there.
pub fn gradient_square(center: Vec2, half_extent: f32, rotation: f32, inner: Rgba, outer: Rgba) -> Vec<Vertex> {
    let rot = Vec2::from_angle(rotation);
    let h = half_extent;
    // Corners and edge midpoints, walking around the square
    let ring = [
        Vec2::new(-h, -h),
        Vec2::new(0.0, -h),
        Vec2::new(h, -h),
        Vec2::new(h, 0.0),
        Vec2::new(h, h),
        Vec2::new(0.0, h),
        Vec2::new(-h, h),
        Vec2::new(-h, 0.0),
    ];

    let mut vertices = Vec::with_capacity(ring.len() * 3);
    for i in 0..ring.len() {
        let a = center + rot.rotate(ring[i]);
        let b = center + rot.rotate(ring[(i + 1) % ring.len()]);
        vertices.push(Vertex::at(center, inner));
        vertices.push(Vertex::at(a, outer));
        vertices.push(Vertex::at(b, outer));
    }

    vertices
}

/// Two triangles covering the whole viewport
pub fn fullscreen_quad(viewport: Vec2, color: Rgba) -> Vec<Vertex> {
    let (w, h) = (viewport.x, viewport.y);
    vec![
        Vertex::new(0.0, 0.0, color),
        Vertex::new(w, 0.0, color),
        Vertex::new(0.0, h, color),
        Vertex::new(0.0, h, color),
        Vertex::new(w, 0.0, color),
        Vertex::new(w, h, color),
    ]
}

/// Flatten a draw list into one triangle list, preserving draw order
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let segments = list.circle_segments;
    let mut vertices = Vec::new();

    for cmd in &list.commands {
        match *cmd {
            DrawCmd::Fade { color } => vertices.extend(fullscreen_quad(list.viewport, color)),
            DrawCmd::Circle { center, radius, color } => {
                vertices.extend(circle(center, radius, color, segments))
            }
            DrawCmd::RadialDisk {
                center,
                radius,
                inner,
                outer,
            } => vertices.extend(radial_disk(center, radius, inner, outer, segments)),
            DrawCmd::GradientSquare {
                center,
                half_extent,
                rotation,
                inner,
                outer,
            } => vertices.extend(gradient_square(center, half_extent, rotation, inner, outer)),
        }
    }

    vertices
}
