//! Software pixel canvas and its half-block terminal blit.
//!
//! Each terminal cell shows two stacked pixels: the upper half block `▀`
//! takes the top pixel as foreground and the bottom pixel as background.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use super::surface::{Rgba, Surface};

/// Alpha blend a single colour channel
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Opaque RGB raster with source-over blending
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: i32,
    height: i32,
    px: Vec<Rgba>,
}

impl PixelCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            px: vec![Rgba::rgb(0, 0, 0); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.px[i])
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Composite `color` over the pixel at (x, y); out-of-bounds is a no-op
    #[inline]
    fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let dst = &mut self.px[i];
        match color.a {
            0 => {}
            255 => *dst = color,
            a => {
                let alpha = u16::from(a);
                *dst = Rgba::rgb(
                    blend_channel(color.r, dst.r, alpha),
                    blend_channel(color.g, dst.g, alpha),
                    blend_channel(color.b, dst.b, alpha),
                );
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    fn stroke_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
        // Bresenham; every pixel is touched once so translucent lines stay even
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.blend(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgba) {
        if w <= 0 || h <= 0 {
            return;
        }
        let r = radius.clamp(0, w.min(h) / 2) as f32;
        // Pixel centres inside the rectangle shrunk by r, grown back by a disc of radius r
        let (left, right) = (x as f32 + r, (x + w) as f32 - r);
        let (top, bottom) = (y as f32 + r, (y + h) as f32 - r);

        for py in y.max(0)..(y + h).min(self.height) {
            for px in x.max(0)..(x + w).min(self.width) {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                let dx = cx - cx.clamp(left, right);
                let dy = cy - cy.clamp(top, bottom);
                if dx * dx + dy * dy <= r * r {
                    self.blend(px, py, color);
                }
            }
        }
    }
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Scales the canvas into the widget area, preserving aspect ratio and
/// centring it. Terminal cells outside the picture are left untouched.
impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.width == 0 || self.height == 0 || area.width == 0 || area.height == 0 {
            return;
        }

        // Target resolution in half-block pixels
        let target_w = f32::from(area.width);
        let target_h = f32::from(area.height) * 2.0;
        let scale = (target_w / self.width as f32).min(target_h / self.height as f32);
        let out_w = ((self.width as f32 * scale).floor() as i32).max(1);
        let out_h = ((self.height as f32 * scale).floor() as i32).max(1);
        let off_x = (area.width as i32 - out_w) / 2;
        let off_y = (area.height as i32 * 2 - out_h) / 2;

        let sample = |tx: i32, ty: i32| -> Option<Rgba> {
            let ox = tx - off_x;
            let oy = ty - off_y;
            if ox < 0 || oy < 0 || ox >= out_w || oy >= out_h {
                return None;
            }
            let sx = ((ox as f32 + 0.5) / scale) as i32;
            let sy = ((oy as f32 + 0.5) / scale) as i32;
            self.get(sx.min(self.width - 1), sy.min(self.height - 1))
        };

        for row in 0..area.height {
            for col in 0..area.width {
                let top = sample(col as i32, row as i32 * 2);
                let bottom = sample(col as i32, row as i32 * 2 + 1);
                if top.is_none() && bottom.is_none() {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("\u{2580}");
                    cell.set_fg(top.map(to_color).unwrap_or(Color::Reset));
                    cell.set_bg(bottom.map(to_color).unwrap_or(Color::Reset));
                }
            }
        }
    }
}
