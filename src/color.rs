//! RGBA colors shared by simulation records and the renderer

use serde::{Deserialize, Serialize};

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity (0-1)
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different opacity (clamped to 0-1)
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Build from hue (degrees), saturation and lightness (0-1)
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// CSS `rgba(...)` string for canvas APIs
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Palette
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0x0c, 0x0a, 0x18);
    pub const STAR: Color = Color::rgb(255, 255, 255);

    pub const SINGLE_SHOT: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const TRIPLE_SHOT: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const LASER: Color = Color::rgb(0xff, 0x00, 0xff);
    pub const MISSILE: Color = Color::rgb(0xff, 0xa5, 0x00);
    pub const MISSILE_TRAIL: Color = Color::rgb(180, 180, 180);

    pub const ASTEROID_FILL: Color = Color::rgb(0xa0, 0x52, 0x2d);
    pub const ASTEROID_EDGE: Color = Color::rgb(0x69, 0x38, 0x1b);
    pub const INVADER: Color = Color::rgb(0x00, 0xff, 0x00);

    pub const SHIELD_ITEM: Color = Color::rgba(0, 191, 255, 0.8);
    pub const SHIELD_ITEM_EDGE: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const SCORE_ITEM: Color = Color::rgb(0xff, 0xd7, 0x00);
    pub const SCORE_ITEM_CROSS: Color = Color::rgb(0xff, 0x45, 0x00);
    pub const GLYPH: Color = Color::rgb(255, 255, 255);

    pub const SHIP_HULL: Color = Color::rgb(0xc0, 0xc0, 0xc0);
    pub const SHIP_EDGE: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const SHIP_FIN: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const SHIP_COCKPIT: Color = Color::rgb(0x00, 0xaa, 0xff);
    pub const PLAYER_HIT: Color = Color::rgb(0xff, 0x00, 0x00);

    pub const SMOKE: Color = Color::rgb(200, 200, 200);

    /// Base explosion palette (the victim's own color is added per blast)
    pub const EXPLOSION: [Color; 4] = [
        Color::rgb(0xff, 0xd7, 0x00),
        Color::rgb(0xff, 0xa5, 0x00),
        Color::rgb(0xff, 0x45, 0x00),
        Color::rgb(0xff, 0xff, 0xff),
    ];
}
