use serde::{Deserialize, Serialize};

/// Which edge the drawer is anchored to and slides from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Left,
    Right,
    /// Anything that is neither edge. The drawer never moves.
    #[serde(other)]
    Unanchored,
}

impl Placement {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Placement::Left,
            "right" => Placement::Right,
            _ => Placement::Unanchored,
        }
    }
}

/// Offset of the drawer panel relative to its anchored, fully open spot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Offscreen position for `placement`.
///
/// `device_width` is the viewport width captured when the drawer was built.
pub fn closed_position(placement: Placement, drawer_width: f64, device_width: f64) -> Position {
    match placement {
        Placement::Left => Position::new(-or_zero(drawer_width), 0.0),
        Placement::Right => Position::new(or_zero(device_width), 0.0),
        Placement::Unanchored => Position::ORIGIN,
    }
}

/// Onscreen position, identical for every placement
pub fn open_position() -> Position {
    Position::ORIGIN
}
