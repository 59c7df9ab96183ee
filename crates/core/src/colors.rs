use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SkillError;

const NAMED_COLORS: [(&str, &str); 10] = [
    ("white", "ffffff"),
    ("red", "ff0000"),
    ("orange", "ff3300"),
    ("green", "00ff00"),
    ("dark green", "004411"),
    ("blue", "0000ff"),
    ("light blue", "00a0b0"),
    ("purple", "4b0098"),
    ("yellow", "ffd400"),
    ("black", "000000"),
];

const HEX_MARKERS: [&str; 2] = ["0x", "#"];

/// Normalizes a color name or literal to the hex code the buttons expect.
///
/// Names are looked up case-insensitively. A literal starting with `0x` or `#`
/// loses its marker. Anything else is logged and returned unchanged: the
/// platform decides what to do with a malformed color, not us.
pub fn resolve(requested: &str) -> String {
    let lowered = requested.to_lowercase();
    if let Some((_, hex)) = NAMED_COLORS.iter().find(|(name, _)| *name == lowered) {
        return hex.to_string();
    }

    for marker in HEX_MARKERS {
        if let Some(literal) = requested.strip_prefix(marker) {
            return literal.to_string();
        }
    }

    warn!(color = requested, "unknown color");
    requested.to_string()
}

/// The colors a user can pick during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayColor {
    Red,
    Green,
    Blue,
}

impl PlayColor {
    pub const ALL: [PlayColor; 3] = [PlayColor::Red, PlayColor::Green, PlayColor::Blue];

    pub fn name(&self) -> &'static str {
        match self {
            PlayColor::Red => "red",
            PlayColor::Green => "green",
            PlayColor::Blue => "blue",
        }
    }

    /// A dim shade of the color, used for the idle breathing animation.
    pub fn dimmed(&self) -> &'static str {
        match self {
            PlayColor::Red => "0x603018",
            PlayColor::Green => "0x184518",
            PlayColor::Blue => "0x184066",
        }
    }
}

impl fmt::Display for PlayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayColor {
    type Err = SkillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PlayColor::ALL
            .into_iter()
            .find(|color| color.name() == wanted)
            .ok_or_else(|| SkillError::UnsupportedColor(s.to_string()))
    }
}
