/// Mini-game raster dimensions, 4:3 like the cabinet screens it imitates.
pub const SCREEN_WIDTH: u32 = 1200;
pub const SCREEN_HEIGHT: u32 = 900;

/// Size of the in-scene quad the raster is mapped onto (world units).
pub const SURFACE_WIDTH: f32 = 1.1;
pub const SURFACE_HEIGHT: f32 = 0.8;
/// Backward tilt of the screen surface, matching the cabinet bezel.
pub const SURFACE_TILT_RADIANS: f32 = -10.0 * core::f32::consts::PI / 180.0;

/// Fallback cabinet body, width x height x depth.
pub const CABINET_WIDTH: f32 = 2.0;
pub const CABINET_HEIGHT: f32 = 3.0;
pub const CABINET_DEPTH: f32 = 1.0;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const CABINET_BODY: u32 = 0x1a2a4a;
    pub const ACCENT: u32 = 0x3b82f6;
    pub const HOVER_CYAN: u32 = 0x00ffff;
    pub const HOVER_MAGENTA: u32 = 0xff00ff;
    pub const HOVER_YELLOW: u32 = 0xffff00;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

/// RGBA bytes for the raster canvas, with an explicit alpha.
pub const fn raster_color(rgb: u32, alpha: u8) -> [u8; 4] {
    [
        ((rgb >> 16) & 0xff) as u8,
        ((rgb >> 8) & 0xff) as u8,
        (rgb & 0xff) as u8,
        alpha,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_parses_correctly() {
        let c = color_from_hex(0xFF8040);
        if let bevy::prelude::Color::Srgba(srgba) = c {
            assert!((srgba.red - 1.0).abs() < 1e-3);
            assert!((srgba.green - 0.502).abs() < 1e-2);
            assert!((srgba.blue - 0.251).abs() < 1e-2);
        } else {
            panic!("Expected Srgba color variant");
        }
    }

    #[test]
    fn raster_color_splits_channels() {
        assert_eq!(raster_color(0x3b82f6, 255), [0x3b, 0x82, 0xf6, 255]);
        assert_eq!(raster_color(0x000000, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn screen_keeps_four_three_aspect() {
        assert_eq!(SCREEN_WIDTH * 3, SCREEN_HEIGHT * 4);
    }
}
