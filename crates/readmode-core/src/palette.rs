// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

use crate::colour::Rgb;

/// Fixed tint colours offered in the colour dropdown.
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetColour {
    SoftBeige,
    LightGray,
    PaleYellow,
    WarmSepia,
    SoftBlue,
    Yellow,
    Pink,
    Green,
    Gray,
    White,
}

impl PresetColour {
    pub const ALL: [PresetColour; 10] = [
        PresetColour::SoftBeige,
        PresetColour::LightGray,
        PresetColour::PaleYellow,
        PresetColour::WarmSepia,
        PresetColour::SoftBlue,
        PresetColour::Yellow,
        PresetColour::Pink,
        PresetColour::Green,
        PresetColour::Gray,
        PresetColour::White,
    ];

    pub const fn rgb(self) -> Rgb {
        Rgb::from_u32(match self {
            PresetColour::SoftBeige => 0xF5F5DC,
            PresetColour::LightGray => 0xD3D3D3,
            PresetColour::PaleYellow => 0xFFF8C6,
            PresetColour::WarmSepia => 0xE3C9A8,
            PresetColour::SoftBlue => 0xADD8E6,
            PresetColour::Yellow => 0xFFFF00,
            PresetColour::Pink => 0xFFC0CB,
            PresetColour::Green => 0x00FF00,
            PresetColour::Gray => 0x808080,
            PresetColour::White => 0xFFFFFF,
        })
    }

    pub const fn key(self) -> &'static str {
        match self {
            PresetColour::SoftBeige => "soft-beige",
            PresetColour::LightGray => "light-gray",
            PresetColour::PaleYellow => "pale-yellow",
            PresetColour::WarmSepia => "warm-sepia",
            PresetColour::SoftBlue => "soft-blue",
            PresetColour::Yellow => "yellow",
            PresetColour::Pink => "pink",
            PresetColour::Green => "green",
            PresetColour::Gray => "gray",
            PresetColour::White => "white",
        }
    }
}

impl fmt::Display for PresetColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for PresetColour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        PresetColour::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| format!("unknown colour \"{s}\""))
    }
}

/// The active tint source. Exactly one is selected at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Preset(PresetColour),
    Custom,
}

impl Selection {
    pub fn key(self) -> &'static str {
        match self {
            Selection::None => "none",
            Selection::Preset(p) => p.key(),
            Selection::Custom => "custom",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(Selection::None),
            "custom" => Ok(Selection::Custom),
            other => other.parse().map(Selection::Preset),
        }
    }
}

/// Which set of presets the dropdown shows.
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    #[default]
    Soft,
    Classic,
}

impl Palette {
    pub const fn presets(self) -> [PresetColour; 5] {
        match self {
            Palette::Soft => [
                PresetColour::SoftBeige,
                PresetColour::LightGray,
                PresetColour::PaleYellow,
                PresetColour::WarmSepia,
                PresetColour::SoftBlue,
            ],
            Palette::Classic => [
                PresetColour::Yellow,
                PresetColour::Pink,
                PresetColour::Green,
                PresetColour::Gray,
                PresetColour::White,
            ],
        }
    }

    /// Dropdown position of the "Custom" entry.
    pub const fn custom_position(self) -> usize {
        self.presets().len() + 1
    }

    /// Dropdown layout: 0 is None, then the presets in order, then Custom.
    pub fn selection_at(self, position: usize) -> Option<Selection> {
        let presets = self.presets();
        match position {
            0 => Some(Selection::None),
            p if p <= presets.len() => Some(Selection::Preset(presets[p - 1])),
            p if p == self.custom_position() => Some(Selection::Custom),
            _ => None,
        }
    }

    /// `None` when the selection is a preset this palette does not list.
    pub fn position_of(self, selection: Selection) -> Option<usize> {
        match selection {
            Selection::None => Some(0),
            Selection::Custom => Some(self.custom_position()),
            Selection::Preset(p) => self.presets().iter().position(|&x| x == p).map(|i| i + 1),
        }
    }

    pub fn entries(self) -> impl Iterator<Item = Selection> {
        (0..=self.custom_position()).filter_map(move |p| self.selection_at(p))
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "soft" => Ok(Palette::Soft),
            "classic" => Ok(Palette::Classic),
            other => Err(format!("expected soft|classic, got \"{other}\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_beige_table_entry() {
        assert_eq!(PresetColour::SoftBeige.rgb(), Rgb::new(0xF5, 0xF5, 0xDC));
    }

    #[test]
    fn keys_parse_back() {
        for p in PresetColour::ALL {
            assert_eq!(p.key().parse::<PresetColour>(), Ok(p));
            assert_eq!(p.key().parse::<Selection>(), Ok(Selection::Preset(p)));
        }
        assert_eq!("Custom".parse::<Selection>(), Ok(Selection::Custom));
        assert_eq!("none".parse::<Selection>(), Ok(Selection::None));
        assert!("teal".parse::<Selection>().is_err());
    }

    #[test]
    fn dropdown_positions() {
        let p = Palette::Soft;
        assert_eq!(p.selection_at(0), Some(Selection::None));
        assert_eq!(p.selection_at(1), Some(Selection::Preset(PresetColour::SoftBeige)));
        assert_eq!(p.selection_at(5), Some(Selection::Preset(PresetColour::SoftBlue)));
        assert_eq!(p.selection_at(6), Some(Selection::Custom));
        assert_eq!(p.selection_at(7), None);

        for (pos, sel) in Palette::Classic.entries().enumerate() {
            assert_eq!(Palette::Classic.position_of(sel), Some(pos));
        }
        assert_eq!(Palette::Classic.entries().count(), 7);
    }

    #[test]
    fn foreign_preset_has_no_position() {
        assert_eq!(
            Palette::Classic.position_of(Selection::Preset(PresetColour::SoftBeige)),
            None
        );
    }
}
