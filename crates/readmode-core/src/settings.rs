// Author: Dustin Pilgrim
// License: MIT

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::colour::Rgb;
use crate::error::{ColourError, SettingsError};
use crate::palette::Selection;

pub const MAX_LEVEL: u8 = 100;
pub const DEFAULT_LEVEL: u8 = 50;
pub const DEFAULT_CUSTOM_COLOUR: Rgb = Rgb::new(0x7F, 0x7F, 0x7F);

fn check_level(field: &'static str, value: u32) -> Result<u8, SettingsError> {
    if value > MAX_LEVEL as u32 {
        return Err(SettingsError::OutOfRange { field, value, max: MAX_LEVEL });
    }
    Ok(value as u8)
}

/// An (intensity, brightness) pair, both in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Levels {
    pub intensity: u8,
    pub brightness: u8,
}

impl Default for Levels {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_LEVEL,
            brightness: DEFAULT_LEVEL,
        }
    }
}

impl Levels {
    pub fn new(intensity: u32, brightness: u32) -> Result<Self, SettingsError> {
        Ok(Self {
            intensity: check_level("intensity", intensity)?,
            brightness: check_level("brightness", brightness)?,
        })
    }

    pub fn validate(self) -> Result<(), SettingsError> {
        Self::new(self.intensity as u32, self.brightness as u32).map(|_| ())
    }
}

/// User-picked tint. Always a valid 24-bit colour; (de)serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomColour(Rgb);

impl CustomColour {
    pub fn parse(hex: &str) -> Result<Self, ColourError> {
        Rgb::parse(hex).map(Self)
    }

    pub const fn rgb(self) -> Rgb {
        self.0
    }
}

impl Default for CustomColour {
    fn default() -> Self {
        Self(DEFAULT_CUSTOM_COLOUR)
    }
}

impl From<Rgb> for CustomColour {
    fn from(rgb: Rgb) -> Self {
        Self(rgb)
    }
}

impl TryFrom<String> for CustomColour {
    type Error = ColourError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CustomColour> for String {
    fn from(c: CustomColour) -> Self {
        c.0.to_string()
    }
}

impl fmt::Display for CustomColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Stable identity of a selection inside the per-colour map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColourKey(String);

impl ColourKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Selection> for ColourKey {
    fn from(sel: Selection) -> Self {
        Self(sel.key().to_string())
    }
}

impl fmt::Display for ColourKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Levels remembered for one colour when levels are not shared.
///
/// Two entries are equal when they name the same colour; the remembered
/// levels take no part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColourSettingsEntry {
    pub colour_key: ColourKey,
    pub colour_hex: String,
    pub intensity: u8,
    pub brightness: u8,
}

impl ColourSettingsEntry {
    pub fn new(selection: Selection, colour_hex: impl Into<String>, levels: Levels) -> Self {
        Self {
            colour_key: selection.into(),
            colour_hex: colour_hex.into(),
            intensity: levels.intensity,
            brightness: levels.brightness,
        }
    }

    pub fn levels(&self) -> Levels {
        Levels {
            intensity: self.intensity,
            brightness: self.brightness,
        }
    }
}

impl PartialEq for ColourSettingsEntry {
    fn eq(&self, other: &Self) -> bool {
        self.colour_key == other.colour_key && self.colour_hex == other.colour_hex
    }
}

impl Eq for ColourSettingsEntry {}

impl Hash for ColourSettingsEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.colour_key.hash(state);
        self.colour_hex.hash(state);
    }
}

pub type PerColourMap = BTreeMap<ColourKey, ColourSettingsEntry>;

/// Everything the overlay needs, as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    pub selected: Selection,
    pub custom_colour: CustomColour,
    pub intensity: u8,
    pub brightness: u8,
    /// One intensity/brightness pair for every colour instead of one per colour.
    pub shared_levels: bool,
    pub read_mode_on: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            selected: Selection::None,
            custom_colour: CustomColour::default(),
            intensity: DEFAULT_LEVEL,
            brightness: DEFAULT_LEVEL,
            shared_levels: false,
            read_mode_on: false,
        }
    }
}

impl OverlaySettings {
    pub fn levels(&self) -> Levels {
        Levels {
            intensity: self.intensity,
            brightness: self.brightness,
        }
    }

    pub fn set_levels(&mut self, levels: Levels) {
        self.intensity = levels.intensity;
        self.brightness = levels.brightness;
    }

    pub fn set_intensity(&mut self, value: u32) -> Result<(), SettingsError> {
        self.intensity = check_level("intensity", value)?;
        Ok(())
    }

    pub fn set_brightness(&mut self, value: u32) -> Result<(), SettingsError> {
        self.brightness = check_level("brightness", value)?;
        Ok(())
    }

    pub fn set_custom_colour(&mut self, hex: &str) -> Result<(), SettingsError> {
        self.custom_colour = CustomColour::parse(hex)?;
        Ok(())
    }

    /// `#RRGGBB` of the selected colour, if any.
    pub fn selected_hex(&self) -> Option<String> {
        match self.selected {
            Selection::None => None,
            Selection::Preset(p) => Some(p.rgb().to_string()),
            Selection::Custom => Some(self.custom_colour.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.levels().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PresetColour;
    use std::collections::HashSet;

    #[test]
    fn defaults() {
        let s = OverlaySettings::default();
        assert_eq!(s.selected, Selection::None);
        assert_eq!(s.custom_colour.to_string(), "#7F7F7F");
        assert_eq!(s.levels(), Levels::default());
        assert!(!s.shared_levels);
        assert!(!s.read_mode_on);
    }

    #[test]
    fn setters_reject_out_of_range() {
        let mut s = OverlaySettings::default();
        assert!(s.set_intensity(100).is_ok());
        assert_eq!(
            s.set_brightness(101),
            Err(SettingsError::OutOfRange { field: "brightness", value: 101, max: 100 })
        );
        assert_eq!(s.brightness, DEFAULT_LEVEL);
        assert_eq!(s.intensity, 100);
    }

    #[test]
    fn bad_custom_colour_keeps_previous() {
        let mut s = OverlaySettings::default();
        s.set_custom_colour("#FF5733").unwrap();
        assert!(matches!(
            s.set_custom_colour("orange"),
            Err(SettingsError::Colour(ColourError::Format { .. }))
        ));
        assert_eq!(s.custom_colour.rgb(), Rgb::new(0xFF, 0x57, 0x33));

        assert!(matches!(
            s.set_custom_colour("#00FF5733"),
            Err(SettingsError::Colour(ColourError::Format { .. }))
        ));
        assert_eq!(s.custom_colour.to_string(), "#FF5733");
    }

    #[test]
    fn selected_hex_follows_selection() {
        let mut s = OverlaySettings::default();
        assert_eq!(s.selected_hex(), None);
        s.selected = Selection::Preset(PresetColour::SoftBeige);
        assert_eq!(s.selected_hex().as_deref(), Some("#F5F5DC"));
        s.selected = Selection::Custom;
        assert_eq!(s.selected_hex().as_deref(), Some("#7F7F7F"));
    }

    #[test]
    fn entry_identity_ignores_levels() {
        let sel = Selection::Preset(PresetColour::Pink);
        let a = ColourSettingsEntry::new(sel, "#FFC0CB", Levels::default());
        let b = ColourSettingsEntry::new(sel, "#FFC0CB", Levels { intensity: 10, brightness: 90 });
        let c = ColourSettingsEntry::new(sel, "#FFC0CC", Levels::default());
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn custom_colour_rejects_bad_hex_on_conversion() {
        assert!(CustomColour::try_from("#12345".to_string()).is_err());
        let c = CustomColour::try_from("#abcdef".to_string()).unwrap();
        assert_eq!(String::from(c), "#ABCDEF");
    }
}
