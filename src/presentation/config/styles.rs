use std::collections::HashMap;
use std::str::FromStr;

use derive_deref::{Deref, DerefMut};
use ratatui::style::{Color, Modifier, Style};
use serde::{de::Deserializer, Deserialize};

/// Named styles, e.g. `"content": "gray on black"`
#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct Styles(pub HashMap<String, Style>);

impl<'de> Deserialize<'de> for Styles {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<String, String>::deserialize(deserializer)?;

        let styles = parsed_map
            .into_iter()
            .map(|(name, style)| {
                parse_style(&style)
                    .map(|style| (name, style))
                    .map_err(serde::de::Error::custom)
            })
            .collect::<Result<_, _>>()?;

        Ok(Styles(styles))
    }
}

impl Styles {
    pub fn style(&self, name: &str) -> Style {
        self.get(name).copied().unwrap_or_default()
    }
}

/// Parse a colour name, an indexed colour or `#rgb` / `#rrggbb`.
pub fn parse_color(raw: &str) -> Result<Color, String> {
    let raw = raw.trim();
    let expanded;
    let raw = match raw.strip_prefix('#') {
        Some(hex) if hex.len() == 3 => {
            expanded = format!("#{}", hex.chars().flat_map(|c| [c, c]).collect::<String>());
            expanded.as_str()
        }
        _ => raw,
    };
    Color::from_str(raw).map_err(|_| format!("Unable to parse color `{raw}`"))
}

/// Parse `"[modifiers] [fg] [on bg]"`, e.g. `"bold white on #202020"`.
pub fn parse_style(line: &str) -> Result<Style, String> {
    let (foreground, background) = match line.split_once(" on ") {
        Some((fg, bg)) => (fg, Some(bg)),
        None => match line.trim().strip_prefix("on ") {
            Some(bg) => ("", Some(bg)),
            None => (line, None),
        },
    };

    let mut style = Style::default();
    for word in foreground.split_whitespace() {
        match parse_modifier(word) {
            Some(modifier) => style = style.add_modifier(modifier),
            None => style = style.fg(parse_color(word)?),
        }
    }
    if let Some(bg) = background {
        style = style.bg(parse_color(bg)?);
    }
    Ok(style)
}

fn parse_modifier(word: &str) -> Option<Modifier> {
    match word.to_ascii_lowercase().as_str() {
        "bold" => Some(Modifier::BOLD),
        "dim" => Some(Modifier::DIM),
        "italic" => Some(Modifier::ITALIC),
        "underline" | "underlined" => Some(Modifier::UNDERLINED),
        "reversed" | "inverse" => Some(Modifier::REVERSED),
        _ => None,
    }
}
