//! Pointer input mapping

use glam::Vec2;

/// Map a client-space pointer position onto the logical play field.
///
/// `rect_origin`/`rect_size` are the drawing surface's bounding rectangle in
/// client coordinates; the result is scaled to `logical` (800x600) so pointer
/// targets stay correct when the canvas is stretched by CSS. Returns `None`
/// while the surface has no area.
pub fn surface_to_sim(client: Vec2, rect_origin: Vec2, rect_size: Vec2, logical: Vec2) -> Option<Vec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    Some((client - rect_origin) / rect_size * logical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport;

    #[test]
    fn test_unscaled_surface_is_offset_only() {
        let p = surface_to_sim(
            Vec2::new(110.0, 70.0),
            Vec2::new(10.0, 20.0),
            viewport(),
            viewport(),
        );
        assert_eq!(p, Some(Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn test_stretched_surface_scales() {
        // Canvas displayed at 400x300 CSS pixels
        let p = surface_to_sim(
            Vec2::new(200.0, 150.0),
            Vec2::ZERO,
            Vec2::new(400.0, 300.0),
            viewport(),
        );
        assert_eq!(p, Some(Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn test_degenerate_rect() {
        assert_eq!(
            surface_to_sim(Vec2::ONE, Vec2::ZERO, Vec2::new(0.0, 300.0), viewport()),
            None
        );
    }
}
