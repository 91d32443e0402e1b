//! Condition-to-presentation mapping.
//!
//! The provider classifies current weather with a short label; the dashboard
//! keys an icon, an ambient audio clip, and a background tint off it. The
//! table is a closed, exhaustive match: every recognized condition owns its
//! complete triple and unknown labels alone receive the default theme, so no
//! entry can bleed into a neighbor.

use serde::{Deserialize, Serialize};

/// The closed provider vocabulary the dashboard recognizes. Matching is
/// case-sensitive; anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Snow,
    Haze,
    Mist,
    Thunderstorm,
    Other,
}

/// Icon asset, ambient audio clip, and background tint for one condition.
/// Asset packaging is out of scope; these are stable references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionTheme {
    pub icon: &'static str,
    pub audio: &'static str,
    pub background: &'static str,
}

/// Theme for unrecognized condition labels.
pub const DEFAULT_THEME: ConditionTheme = ConditionTheme {
    icon: "assets/default.png",
    audio: "assets/main.mp3",
    background: "black",
};

impl Condition {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Snow" => Condition::Snow,
            "Haze" => Condition::Haze,
            "Mist" => Condition::Mist,
            "Thunderstorm" => Condition::Thunderstorm,
            _ => Condition::Other,
        }
    }

    pub const fn all() -> &'static [Condition] {
        &[
            Condition::Clear,
            Condition::Clouds,
            Condition::Rain,
            Condition::Snow,
            Condition::Haze,
            Condition::Mist,
            Condition::Thunderstorm,
        ]
    }

    pub const fn theme(self) -> ConditionTheme {
        match self {
            Condition::Clear => ConditionTheme {
                icon: "assets/sunny.png",
                audio: "assets/sunny.mp3",
                background: "#ffa600c7",
            },
            Condition::Clouds => ConditionTheme {
                icon: "assets/cloudy.png",
                audio: "assets/cloudy.mp3",
                background: "#000000e8",
            },
            Condition::Rain => ConditionTheme {
                icon: "assets/rainy.png",
                audio: "assets/rain.mp3",
                background: "#4f8ea7bd",
            },
            Condition::Snow => ConditionTheme {
                icon: "assets/snowy.png",
                audio: "assets/snowy.mp3",
                background: "antiquewhite",
            },
            Condition::Haze => ConditionTheme {
                icon: "assets/haze.png",
                audio: "assets/haze.mp3",
                background: "#7a5557cc",
            },
            Condition::Mist => ConditionTheme {
                icon: "assets/mist.png",
                audio: "assets/mist.mp3",
                background: "#000000cc",
            },
            Condition::Thunderstorm => ConditionTheme {
                icon: "assets/thunder.png",
                audio: "assets/thunder.mp3",
                background: "grey",
            },
            Condition::Other => DEFAULT_THEME,
        }
    }
}

/// Lookup straight from a provider label.
pub fn theme_for_label(label: &str) -> ConditionTheme {
    Condition::from_label(label).theme()
}
