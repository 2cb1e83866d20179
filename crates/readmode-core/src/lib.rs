// Author: Dustin Pilgrim
// License: MIT

pub mod colour;
pub mod error;
pub mod observers;
pub mod palette;
pub mod policy;
pub mod settings;

pub use colour::{Argb, Rgb};
pub use error::{ColourError, SettingsError};
pub use observers::{Observers, SubscriberId};
pub use palette::{Palette, PresetColour, Selection};
pub use policy::OverlayLayers;
pub use settings::{ColourKey, ColourSettingsEntry, CustomColour, Levels, OverlaySettings};
