//! RGBA colors for game elements
//!
//! Colors are linear `[r, g, b, a]` floats in 0-1, authored in sRGB space the
//! same way a 2D canvas would interpret them.

/// RGBA color, components in 0-1
pub type Rgba = [f32; 4];

/// Build a color from 8-bit channels and a float alpha
pub const fn rgb8(r: u8, g: u8, b: u8, a: f32) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// Same color, different alpha
#[inline]
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], alpha]
}

/// Convert HSL (hue in degrees, saturation/lightness in 0-1) to opaque RGBA
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Rgba {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l, 1.0];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
        1.0,
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Palette
pub mod palette {
    use super::{Rgba, rgb8};

    /// Background the fade fill converges to
    pub const BACKGROUND: Rgba = rgb8(15, 15, 16, 1.0);
    pub const PLAYER: Rgba = rgb8(0, 255, 255, 1.0);
    pub const OBSTACLE: Rgba = rgb8(255, 68, 68, 1.0);
    /// Impact sparks when an obstacle hits the player
    pub const IMPACT: Rgba = rgb8(255, 102, 102, 1.0);
    /// Rim of every pickup gradient
    pub const PICKUP_RIM: Rgba = rgb8(255, 255, 255, 0.2);
}
