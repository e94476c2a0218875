//! CPU-side RGBA canvas the mini-games draw into. The scene uploads it to
//! the screen-surface texture after every redraw. All draw operations clip
//! to the buffer; nothing here can panic on out-of-range coordinates.

use super::glyph::{self, GLYPH_SIZE};

pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Writes one pixel, source-over blending by the color's alpha.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        let a = color[3] as u32;
        if a == 255 {
            self.data[i..i + 4].copy_from_slice(&color);
            return;
        }
        if a == 0 {
            return;
        }
        for c in 0..3 {
            let src = color[c] as u32;
            let dst = self.data[i + c] as u32;
            self.data[i + c] = ((src * a + dst * (255 - a)) / 255) as u8;
        }
        self.data[i + 3] = 255;
    }

    /// Axis-aligned filled rectangle, top-left corner at (x, y).
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 4]) {
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let x1 = (x + w).ceil() as i32;
        let y1 = (y + h).ceil() as i32;
        for py in y0.max(0)..y1.min(self.height as i32) {
            for px in x0.max(0)..x1.min(self.width as i32) {
                self.blend_pixel(px, py, color);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: [u8; 4]) {
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        for py in y0.max(0)..(y1 + 1).min(self.height as i32) {
            for px in x0.max(0)..(x1 + 1).min(self.width as i32) {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Filled triangle via half-plane tests; used to carve the Pac-Man mouth.
    pub fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: [u8; 4]) {
        let min_x = a.0.min(b.0).min(c.0).floor() as i32;
        let max_x = a.0.max(b.0).max(c.0).ceil() as i32;
        let min_y = a.1.min(b.1).min(c.1).floor() as i32;
        let max_y = a.1.max(b.1).max(c.1).ceil() as i32;

        let edge = |p: (f32, f32), q: (f32, f32), r: (f32, f32)| -> f32 {
            (r.0 - p.0) * (q.1 - p.1) - (r.1 - p.1) * (q.0 - p.0)
        };
        let area = edge(a, b, c);
        if area == 0.0 {
            return;
        }

        for py in min_y.max(0)..(max_y + 1).min(self.height as i32) {
            for px in min_x.max(0)..(max_x + 1).min(self.width as i32) {
                let p = (px as f32 + 0.5, py as f32 + 0.5);
                let w0 = edge(a, b, p) / area;
                let w1 = edge(b, c, p) / area;
                let w2 = edge(c, a, p) / area;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Blits text with the 8x8 glyph font at an integer scale. Characters
    /// without a glyph (spaces included) advance the cursor silently.
    pub fn draw_text(&mut self, x: f32, y: f32, scale: u32, color: [u8; 4], text: &str) {
        let scale = scale.max(1) as i32;
        let advance = (GLYPH_SIZE as i32 + 1) * scale;
        let mut cursor_x = x.round() as i32;
        let top = y.round() as i32;

        for c in text.chars() {
            if let Some(rows) = glyph::glyph(c) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_SIZE {
                        if bits & (0x80 >> col) == 0 {
                            continue;
                        }
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.blend_pixel(
                                    cursor_x + col as i32 * scale + sx,
                                    top + row as i32 * scale + sy,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            cursor_x += advance;
        }
    }

    /// Pixel width of `text` at `scale`, for centering banners.
    pub fn text_width(text: &str, scale: u32) -> f32 {
        let scale = scale.max(1);
        let count = text.chars().count() as u32;
        if count == 0 {
            return 0.0;
        }
        (count * (GLYPH_SIZE as u32 + 1) * scale - scale) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];

    #[test]
    fn clear_fills_every_pixel() {
        let mut raster = Raster::new(4, 3);
        raster.clear([1, 2, 3, 255]);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(raster.pixel(x, y), Some([1, 2, 3, 255]));
            }
        }
    }

    #[test]
    fn rect_draws_and_clips() {
        let mut raster = Raster::new(10, 10);
        raster.clear([0, 0, 0, 255]);
        raster.fill_rect(8.0, 8.0, 10.0, 10.0, WHITE);
        assert_eq!(raster.pixel(9, 9), Some(WHITE));
        assert_eq!(raster.pixel(7, 7), Some([0, 0, 0, 255]));
    }

    #[test]
    fn fully_out_of_bounds_draws_do_not_panic() {
        let mut raster = Raster::new(10, 10);
        raster.fill_rect(-100.0, -100.0, 5.0, 5.0, WHITE);
        raster.fill_circle(500.0, 500.0, 40.0, WHITE);
        raster.fill_triangle((-50.0, -50.0), (-60.0, -50.0), (-55.0, -40.0), WHITE);
        raster.draw_text(-500.0, 2000.0, 2, WHITE, "OFFSCREEN");
    }

    #[test]
    fn circle_center_is_filled_and_corners_are_not() {
        let mut raster = Raster::new(21, 21);
        raster.clear([0, 0, 0, 255]);
        raster.fill_circle(10.0, 10.0, 8.0, RED);
        assert_eq!(raster.pixel(10, 10), Some(RED));
        assert_eq!(raster.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(raster.pixel(20, 20), Some([0, 0, 0, 255]));
    }

    #[test]
    fn blending_mixes_toward_the_source() {
        let mut raster = Raster::new(1, 1);
        raster.clear([0, 0, 0, 255]);
        raster.blend_pixel(0, 0, [255, 255, 255, 128]);
        let px = raster.pixel(0, 0).unwrap();
        assert!(px[0] > 100 && px[0] < 150);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn zero_alpha_leaves_the_destination_untouched() {
        let mut raster = Raster::new(1, 1);
        raster.clear([9, 9, 9, 255]);
        raster.blend_pixel(0, 0, [255, 255, 255, 0]);
        assert_eq!(raster.pixel(0, 0), Some([9, 9, 9, 255]));
    }

    #[test]
    fn text_marks_pixels_inside_the_glyph_box() {
        let mut raster = Raster::new(32, 16);
        raster.clear([0, 0, 0, 255]);
        raster.draw_text(0.0, 0.0, 1, WHITE, "I");
        // Top row of 'I' is fully set.
        for x in 0..8 {
            assert_eq!(raster.pixel(x, 0), Some(WHITE));
        }
        assert_eq!(raster.pixel(8, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn text_width_accounts_for_scale_and_tracking() {
        assert_eq!(Raster::text_width("", 2), 0.0);
        assert_eq!(Raster::text_width("A", 1), 8.0);
        assert_eq!(Raster::text_width("AB", 1), 17.0);
        assert_eq!(Raster::text_width("AB", 2), 34.0);
    }

    #[test]
    fn triangle_fills_its_interior() {
        let mut raster = Raster::new(20, 20);
        raster.clear([0, 0, 0, 255]);
        raster.fill_triangle((2.0, 2.0), (18.0, 2.0), (2.0, 18.0), WHITE);
        assert_eq!(raster.pixel(5, 5), Some(WHITE));
        assert_eq!(raster.pixel(18, 18), Some([0, 0, 0, 255]));
    }
}
