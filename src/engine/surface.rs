/// Packed `0xRRGGBB` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);
    pub const RED: Color = Color(0xff0000);
    pub const CYAN: Color = Color(0x00ffff);
    pub const MAGENTA: Color = Color(0xff00ff);
    pub const YELLOW: Color = Color(0xffff00);

    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }

    /// Scales every channel down by `percent` (0-100).
    pub fn darken(self, percent: u8) -> Color {
        let keep = 100 - percent.min(100) as u32;
        let (r, g, b) = self.rgb();
        let r = r as u32 * keep / 100;
        let g = g as u32 * keep / 100;
        let b = b as u32 * keep / 100;
        Color((r << 16) | (g << 8) | b)
    }

    pub fn to_css(self, alpha: f64) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({}, {}, {}, {})", r, g, b, alpha.clamp(0.0, 1.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: &'static str,
    pub color: Color,
    pub align: TextAlign,
}

/// The drawing primitives the game paints with. Coordinates are logical canvas
/// pixels; every call carries its own color and alpha, nothing is stateful.
pub trait Surface {
    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color, alpha: f64);
    fn stroke_polygon(&mut self, points: &[(f64, f64)], width: f64, color: Color, alpha: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, alpha: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, width: f64, color: Color, alpha: f64);
    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color, alpha: f64);
    fn stroke_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, width: f64, color: Color, alpha: f64);
    /// `w` and `h` are the full diameters, centred on `(cx, cy)`.
    fn fill_ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64, color: Color, alpha: f64);
    fn fill_gradient_rect(&mut self, x: f64, y: f64, w: f64, h: f64, top: Color, bottom: Color, alpha: f64);
    fn fill_gradient_circle(&mut self, cx: f64, cy: f64, radius: f64, top: Color, bottom: Color, alpha: f64);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color, alpha: f64);
    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle);

    fn fill_quad(&mut self, quad: [(f64, f64); 4], color: Color, alpha: f64) {
        self.fill_polygon(&quad, color, alpha);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color, alpha: f64) {
        self.fill_ellipse(cx, cy, radius * 2.0, radius * 2.0, color, alpha);
    }
}

/// Swallows every call. Used to run the simulation without a canvas.
pub struct NullSurface;

impl Surface for NullSurface {
    fn fill_polygon(&mut self, _: &[(f64, f64)], _: Color, _: f64) {}
    fn stroke_polygon(&mut self, _: &[(f64, f64)], _: f64, _: Color, _: f64) {}
    fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: Color, _: f64) {}
    fn stroke_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64, _: Color, _: f64) {}
    fn fill_rounded_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64, _: Color, _: f64) {}
    fn stroke_rounded_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64, _: f64, _: Color, _: f64) {}
    fn fill_ellipse(&mut self, _: f64, _: f64, _: f64, _: f64, _: Color, _: f64) {}
    fn fill_gradient_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: Color, _: Color, _: f64) {}
    fn fill_gradient_circle(&mut self, _: f64, _: f64, _: f64, _: Color, _: Color, _: f64) {}
    fn line(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64, _: Color, _: f64) {}
    fn text(&mut self, _: f64, _: f64, _: &str, _: &TextStyle) {}
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_scales_channels() {
        assert_eq!(Color(0x00ffff).darken(50), Color(0x007f7f));
        assert_eq!(Color(0xffffff).darken(0), Color::WHITE);
        assert_eq!(Color(0x123456).darken(100), Color::BLACK);
    }

    #[test]
    fn css_string_clamps_alpha() {
        assert_eq!(Color(0xff0080).to_css(1.5), "rgba(255, 0, 128, 1)");
        assert_eq!(Color::BLACK.to_css(0.4), "rgba(0, 0, 0, 0.4)");
    }
}
