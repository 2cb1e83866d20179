// Author: Dustin Pilgrim
// License: MIT
//
// Persisted overlay settings. Every successful change is written straight
// back to disk; there is no separate commit step.

use std::path::{Path, PathBuf};

use confy::ConfyError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use readmode_core::policy::{compute_active_layers, resolve_active_levels};
use readmode_core::settings::PerColourMap;
use readmode_core::{
    ColourKey, ColourSettingsEntry, CustomColour, Levels, OverlayLayers, OverlaySettings,
    Selection, SettingsError,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to load settings from {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ConfyError,
    },

    #[error("failed to save settings to {}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: ConfyError,
    },

    #[error(transparent)]
    Rejected(#[from] SettingsError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredSettings {
    overlay: OverlaySettings,
    per_colour: PerColourMap,
}

#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    data: StoredSettings,
}

impl SettingsStore {
    /// Loads the store, writing defaults first if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let data: StoredSettings = confy::load_path(&path).map_err(|source| StoreError::Load {
            path: path.clone(),
            source,
        })?;

        data.overlay.validate()?;
        for entry in data.per_colour.values() {
            entry.levels().validate()?;
        }

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.data.overlay
    }

    pub fn per_colour(&self) -> &PerColourMap {
        &self.data.per_colour
    }

    /// Levels in effect for the selected colour.
    pub fn active_levels(&self) -> Levels {
        resolve_active_levels(&self.data.overlay, &self.data.per_colour)
    }

    pub fn layers(&self) -> OverlayLayers {
        compute_active_layers(&self.data.overlay, &self.data.per_colour)
    }

    pub fn set_read_mode(&mut self, on: bool) -> Result<(), StoreError> {
        self.update(|s, _| {
            s.read_mode_on = on;
            Ok(())
        })
    }

    pub fn select(&mut self, selection: Selection) -> Result<(), StoreError> {
        self.update(|s, _| {
            s.selected = selection;
            Ok(())
        })
    }

    /// Stores the custom colour and makes it the selection. A saved
    /// per-colour entry for Custom keeps its levels but takes the new hex.
    pub fn set_custom_colour(&mut self, hex: &str) -> Result<(), StoreError> {
        let colour = CustomColour::parse(hex).map_err(SettingsError::from)?;
        self.update(|s, map| {
            s.custom_colour = colour;
            s.selected = Selection::Custom;
            if let Some(entry) = map.get_mut(&ColourKey::from(Selection::Custom)) {
                entry.colour_hex = colour.to_string();
            }
            Ok(())
        })
    }

    pub fn set_shared(&mut self, shared: bool) -> Result<(), StoreError> {
        self.update(|s, _| {
            s.shared_levels = shared;
            Ok(())
        })
    }

    pub fn set_intensity(&mut self, value: u32) -> Result<(), StoreError> {
        self.update(|s, map| {
            if s.shared_levels {
                return s.set_intensity(value);
            }
            let current = active_entry(s, map)?.levels();
            let levels = Levels::new(value, current.brightness as u32)?;
            write_entry(s, map, levels)
        })
    }

    pub fn set_brightness(&mut self, value: u32) -> Result<(), StoreError> {
        self.update(|s, map| {
            if s.shared_levels {
                return s.set_brightness(value);
            }
            let current = active_entry(s, map)?.levels();
            let levels = Levels::new(current.intensity as u32, value)?;
            write_entry(s, map, levels)
        })
    }

    /// Applies `f` to a copy, saves it, and only then makes it current.
    fn update<F>(&mut self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut OverlaySettings, &mut PerColourMap) -> Result<(), SettingsError>,
    {
        let mut next = self.data.clone();
        f(&mut next.overlay, &mut next.per_colour)?;

        confy::store_path(&self.path, &next).map_err(|source| StoreError::Save {
            path: self.path.clone(),
            source,
        })?;

        self.data = next;
        Ok(())
    }
}

fn active_entry(
    settings: &OverlaySettings,
    map: &PerColourMap,
) -> Result<ColourSettingsEntry, SettingsError> {
    if let Some(entry) = map.get(&ColourKey::from(settings.selected)) {
        return Ok(entry.clone());
    }
    let hex = settings.selected_hex().ok_or(SettingsError::NoColourSelected)?;
    Ok(ColourSettingsEntry::new(settings.selected, hex, Levels::default()))
}

// Only presets and Custom own an entry; None has nothing to key it by.
fn write_entry(
    settings: &OverlaySettings,
    map: &mut PerColourMap,
    levels: Levels,
) -> Result<(), SettingsError> {
    let hex = settings.selected_hex().ok_or(SettingsError::NoColourSelected)?;
    let entry = ColourSettingsEntry::new(settings.selected, hex, levels);
    map.insert(entry.colour_key.clone(), entry);
    Ok(())
}
