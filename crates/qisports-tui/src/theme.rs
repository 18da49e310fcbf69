use qisports_core::anim::Rgba;
use ratatui::style::Color;

/// Preview palette
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Brand colors
    pub navy: Color,
    pub gold: Color,
    pub teal: Color,

    // Semantic colors
    pub selection: Color,
    pub heading: Color,
    pub link: Color,
    pub active_dot: Color,
    pub warning: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg0: Color::Rgb(0x1a, 0x1a, 0x2e),
            bg1: Color::Rgb(0x24, 0x24, 0x3a),
            bg2: Color::Rgb(0x33, 0x33, 0x4d),
            fg0: Color::Rgb(0xe8, 0xe8, 0xf0),
            fg1: Color::Rgb(0xc8, 0xc8, 0xd4),
            grey0: Color::Rgb(0x6a, 0x6a, 0x7a),
            grey1: Color::Rgb(0x8a, 0x8a, 0x9a),
            navy: Color::Rgb(0x1e, 0x3a, 0x8a),
            gold: Color::Rgb(0xf5, 0xb7, 0x00),
            teal: Color::Rgb(0x14, 0xb8, 0xa6),
            selection: Color::Rgb(0x33, 0x33, 0x4d),
            heading: Color::Rgb(0xf5, 0xb7, 0x00),
            link: Color::Rgb(0x14, 0xb8, 0xa6),
            active_dot: Color::Rgb(0xf5, 0xb7, 0x00),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            accent: Color::Rgb(0x14, 0xb8, 0xa6),
        }
    }
}

impl Theme {
    /// Composite a translucent color over `base`
    pub fn over(base: Color, color: Rgba) -> Color {
        Self::mix(base, Color::Rgb(color.r, color.g, color.b), color.a)
    }

    /// Fade `fg` toward `bg` as opacity drops
    pub fn fade(&self, fg: Color, opacity: f64) -> Color {
        Self::mix(self.bg0, fg, opacity)
    }

    fn mix(from: Color, to: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        match (rgb(from), rgb(to)) {
            (Some((r0, g0, b0)), Some((r1, g1, b1))) => {
                let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
                Color::Rgb(channel(r0, r1), channel(g0, g1), channel(b0, b1))
            }
            _ if t >= 0.5 => to,
            _ => from,
        }
    }
}

fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        Color::Black => Some((0, 0, 0)),
        Color::White => Some((255, 255, 255)),
        _ => None,
    }
}
