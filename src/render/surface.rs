/// Straight-alpha RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with opacity `alpha` in `[0, 1]`
    pub fn with_opacity(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn opacity(&self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Drawing target for the game scene.
///
/// Coordinates are pixels with the origin at the top-left corner. Shapes may
/// extend past the edges; implementations clip.
pub trait Surface {
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba);

    /// One-pixel line between two points, both ends included
    fn stroke_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba);

    fn rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgba);
}
