use ratatui::prelude::*;

/// Full-area dimming layer
///
/// Terminals have no alpha channel, so the overlay blends every covered
/// cell toward `color` by `opacity`. Colours that cannot be expressed as
/// RGB are dimmed instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayWidget {
    opacity: f64,
    color: Color,
}

impl OverlayWidget {
    pub fn new(opacity: f64) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            color: Color::Black,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// RGB value of a colour, when it has a fixed one.
pub fn to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    let rgb = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (128, 0, 0),
        Color::Green => (0, 128, 0),
        Color::Yellow => (128, 128, 0),
        Color::Blue => (0, 0, 128),
        Color::Magenta => (128, 0, 128),
        Color::Cyan => (0, 128, 128),
        Color::Gray => (192, 192, 192),
        Color::DarkGray => (128, 128, 128),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (0, 0, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        Color::Reset | Color::Indexed(_) => return None,
    };
    Some(rgb)
}

/// Blend `base` toward `over` by `alpha` (0 keeps `base`).
pub fn blend(base: Color, over: Color, alpha: f64) -> Option<Color> {
    let (br, bg, bb) = to_rgb(base)?;
    let (or, og, ob) = to_rgb(over)?;
    let mix = |b: u8, o: u8| (f64::from(b) * (1.0 - alpha) + f64::from(o) * alpha).round() as u8;
    Some(Color::Rgb(mix(br, or), mix(bg, og), mix(bb, ob)))
}

impl Widget for OverlayWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.opacity <= 0.0 {
            return;
        }
        let area = area.intersection(buf.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };
                let mut dimmed = false;
                match blend(cell.fg, self.color, self.opacity) {
                    Some(fg) => {
                        cell.set_fg(fg);
                    }
                    None => dimmed = true,
                }
                match blend(cell.bg, self.color, self.opacity) {
                    Some(bg) => {
                        cell.set_bg(bg);
                    }
                    None => dimmed = true,
                }
                if dimmed {
                    cell.modifier.insert(Modifier::DIM);
                }
            }
        }
    }
}
