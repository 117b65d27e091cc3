/// RGBA8 frame buffer, row-major, as handed out by `pixels`.
/// All drawing is clipped; nothing here panics on out-of-range coordinates.
pub struct Canvas<'a> {
    pixels: &'a mut [[u8; 4]],
    width: u32,
    height: u32,
}

pub type Rgb = (u8, u8, u8);

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        let usable = frame.len() - frame.len() % 4;
        let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut frame[..usable]);
        // Never index past the buffer even if the caller's size is stale.
        let height = if width == 0 { 0 } else { height.min((pixels.len() / width as usize) as u32) };
        Self { pixels, width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn clear(&mut self, (r, g, b): Rgb) {
        let used = (self.width * self.height) as usize;
        for px in self.pixels[..used].iter_mut() {
            *px = [r, g, b, 255];
        }
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, (r, g, b): Rgb, a: u8) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height || a == 0 {
            return;
        }
        let Some(px) = self.pixels.get_mut((y as u32 * self.width + x as u32) as usize) else {
            return;
        };
        let ar = a as u16;
        let iar = (255 - a) as u16;
        px[0] = (((r as u16) * ar + px[0] as u16 * iar) / 255) as u8;
        px[1] = (((g as u16) * ar + px[1] as u16 * iar) / 255) as u8;
        px[2] = (((b as u16) * ar + px[2] as u16 * iar) / 255) as u8;
        px[3] = 255;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, col: Rgb, a: u8) {
        let (x0, y0, x1, y1) = self.clip(x as f32, y as f32, x as f32 + w as f32, y as f32 + h as f32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, col, a);
            }
        }
    }

    /// Solid disc with a one-pixel soft edge.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, col: Rgb, a: u8) {
        if radius <= 0.0 {
            return;
        }
        self.shade_box(cx, cy, radius + 1.0, |d| (radius - d + 0.5).clamp(0.0, 1.0), col, a);
    }

    /// Radial glow: full `a` at the centre fading quadratically to nothing at `radius`.
    pub fn fill_glow(&mut self, cx: f32, cy: f32, radius: f32, col: Rgb, a: u8) {
        if radius <= 0.0 {
            return;
        }
        self.shade_box(
            cx,
            cy,
            radius,
            |d| {
                let t = (1.0 - d / radius).max(0.0);
                t * t
            },
            col,
            a,
        );
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32, col: Rgb, a: u8) {
        if radius <= 0.0 || thickness <= 0.0 {
            return;
        }
        let half = thickness * 0.5;
        self.shade_box(cx, cy, radius + half + 1.0, |d| (half - (d - radius).abs() + 0.5).clamp(0.0, 1.0), col, a);
    }

    /// Segment with round caps.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32, col: Rgb, a: u8) {
        if thickness <= 0.0 || a == 0 {
            return;
        }
        let half = thickness * 0.5;
        let (ax, ay) = from;
        let (bx, by) = to;
        let (x0, y0, x1, y1) =
            self.clip(ax.min(bx) - half - 1.0, ay.min(by) - half - 1.0, ax.max(bx) + half + 1.0, ay.max(by) + half + 1.0);
        let (dx, dy) = (bx - ax, by - ay);
        let len_sq = dx * dx + dy * dy;
        for py in y0..y1 {
            for px in x0..x1 {
                let (qx, qy) = (px as f32 + 0.5, py as f32 + 0.5);
                let t = if len_sq > 0.0 { (((qx - ax) * dx + (qy - ay) * dy) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
                let (nx, ny) = (ax + t * dx - qx, ay + t * dy - qy);
                let d = (nx * nx + ny * ny).sqrt();
                let cover = (half - d + 0.5).clamp(0.0, 1.0);
                if cover > 0.0 {
                    self.blend_pixel(px, py, col, (a as f32 * cover) as u8);
                }
            }
        }
    }

    /// Draws a 5x7 bitmap glyph (one row per byte, MSB of the low 5 bits on
    /// the left) with its top-left corner at `(x, y)`.
    pub fn draw_glyph(&mut self, rows: &[u8; 7], x: i32, y: i32, scale: u32, col: Rgb, a: u8) {
        let s = scale.max(1) as i32;
        for (ry, row) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (row >> (4 - rx)) & 1 == 1 {
                    self.fill_rect(x + rx * s, y + ry as i32 * s, s as u32, s as u32, col, a);
                }
            }
        }
    }

    fn shade_box(&mut self, cx: f32, cy: f32, extent: f32, coverage: impl Fn(f32) -> f32, col: Rgb, a: u8) {
        if a == 0 {
            return;
        }
        let (x0, y0, x1, y1) = self.clip(cx - extent, cy - extent, cx + extent, cy + extent);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let cover = coverage((dx * dx + dy * dy).sqrt());
                if cover > 0.0 {
                    self.blend_pixel(px, py, col, (a as f32 * cover) as u8);
                }
            }
        }
    }

    /// Pixel bounds of a float rectangle, clipped to the canvas.
    fn clip(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> (i32, i32, i32, i32) {
        let w = self.width.min(i32::MAX as u32) as f32;
        let h = self.height.min(i32::MAX as u32) as f32;
        (
            x0.floor().clamp(0.0, w) as i32,
            y0.floor().clamp(0.0, h) as i32,
            x1.ceil().clamp(0.0, w) as i32,
            y1.ceil().clamp(0.0, h) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(w: u32, h: u32) -> Vec<u8> {
        vec![0u8; (w * h * 4) as usize]
    }

    #[test]
    fn clear_fills_every_pixel_opaque() {
        let mut frame = buffer(4, 3);
        let mut canvas = Canvas::new(&mut frame, 4, 3);
        canvas.clear((10, 20, 30));
        assert!(frame.chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
    }

    #[test]
    fn blend_mixes_with_existing_colour() {
        let mut frame = buffer(2, 2);
        let mut canvas = Canvas::new(&mut frame, 2, 2);
        canvas.clear((0, 0, 0));
        canvas.blend_pixel(1, 1, (255, 255, 255), 255);
        canvas.blend_pixel(0, 0, (200, 100, 0), 128);
        assert_eq!(canvas.pixel(1, 1), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([100, 50, 0, 255]));
    }

    #[test]
    fn drawing_off_canvas_is_clipped() {
        let mut frame = buffer(8, 8);
        let mut canvas = Canvas::new(&mut frame, 8, 8);
        canvas.blend_pixel(-1, 3, (255, 0, 0), 255);
        canvas.blend_pixel(8, 3, (255, 0, 0), 255);
        canvas.fill_circle(-50.0, -50.0, 10.0, (255, 0, 0), 255);
        canvas.fill_glow(100.0, 4.0, 200.0, (255, 0, 0), 255);
        canvas.stroke_circle(4.0, 4.0, 1000.0, 3.0, (255, 0, 0), 255);
        canvas.line((-100.0, -100.0), (100.0, 100.0), 2.0, (0, 255, 0), 255);
        canvas.draw_glyph(&[0b11111; 7], 6, 6, 4, (0, 0, 255), 255);
        assert_eq!(canvas.pixel(8, 0), None);
    }

    #[test]
    fn stale_height_is_clamped_to_the_buffer() {
        let mut frame = buffer(4, 2);
        let mut canvas = Canvas::new(&mut frame, 4, 10);
        assert_eq!(canvas.height(), 2);
        canvas.clear((1, 1, 1));
        canvas.fill_rect(0, 0, 4, 10, (9, 9, 9), 255);
    }

    #[test]
    fn filled_circle_covers_centre_not_corners() {
        let mut frame = buffer(20, 20);
        let mut canvas = Canvas::new(&mut frame, 20, 20);
        canvas.clear((0, 0, 0));
        canvas.fill_circle(10.0, 10.0, 5.0, (255, 0, 0), 255);
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(19, 19), Some([0, 0, 0, 255]));
    }

    #[test]
    fn ring_leaves_its_centre_untouched() {
        let mut frame = buffer(30, 30);
        let mut canvas = Canvas::new(&mut frame, 30, 30);
        canvas.clear((0, 0, 0));
        canvas.stroke_circle(15.0, 15.0, 10.0, 2.0, (255, 255, 255), 255);
        assert_eq!(canvas.pixel(15, 15), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(24, 14), Some([255, 255, 255, 255]));
    }

    #[test]
    fn line_connects_its_endpoints() {
        let mut frame = buffer(20, 5);
        let mut canvas = Canvas::new(&mut frame, 20, 5);
        canvas.clear((0, 0, 0));
        canvas.line((2.5, 2.5), (17.5, 2.5), 3.0, (0, 200, 0), 255);
        for x in 2..=17 {
            assert_eq!(canvas.pixel(x, 2), Some([0, 200, 0, 255]), "x = {x}");
        }
        assert_eq!(canvas.pixel(10, 0), Some([0, 0, 0, 255]));
    }
}
