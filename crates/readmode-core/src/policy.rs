// Author: Dustin Pilgrim
// License: MIT
//
// Turns a settings snapshot into the two overlay layers a render target paints.

use std::iter;

use serde::{Deserialize, Serialize};

use crate::colour::{adjust_colour, dim_colour, Argb, Rgb};
use crate::palette::Selection;
use crate::settings::{ColourKey, Levels, OverlaySettings, PerColourMap};

/// Layers to paint over the screen, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayLayers {
    /// Black wash whose alpha follows brightness.
    pub dim: Argb,
    /// Tint on top of the wash. `None` when no colour is selected.
    pub tint: Option<Argb>,
}

impl OverlayLayers {
    /// Dim first, then tint. Both alphas depend on brightness, so the
    /// combined result only matches when painted in this order.
    pub fn paint_order(&self) -> impl Iterator<Item = Argb> {
        iter::once(self.dim).chain(self.tint)
    }
}

pub fn select_base_colour(settings: &OverlaySettings) -> Option<Rgb> {
    match settings.selected {
        Selection::None => None,
        Selection::Preset(p) => Some(p.rgb()),
        Selection::Custom => Some(settings.custom_colour.rgb()),
    }
}

/// Layers for the intensity/brightness stored directly on `settings`.
pub fn compute_overlay_layers(settings: &OverlaySettings) -> OverlayLayers {
    let intensity = settings.intensity as i32;
    let brightness = settings.brightness as i32;

    OverlayLayers {
        dim: dim_colour(brightness),
        tint: select_base_colour(settings).map(|base| adjust_colour(base, intensity, brightness)),
    }
}

/// Levels that apply to the selected colour.
///
/// In shared mode that is the pair on `settings`. Otherwise the colour's own
/// entry, falling back to the defaults when the colour has none yet.
pub fn resolve_active_levels(settings: &OverlaySettings, per_colour: &PerColourMap) -> Levels {
    if settings.shared_levels {
        return settings.levels();
    }

    per_colour
        .get(&ColourKey::from(settings.selected))
        .map(|entry| entry.levels())
        .unwrap_or_default()
}

/// Resolves the active levels, then computes layers with them.
pub fn compute_active_layers(settings: &OverlaySettings, per_colour: &PerColourMap) -> OverlayLayers {
    let mut effective = settings.clone();
    effective.set_levels(resolve_active_levels(settings, per_colour));
    compute_overlay_layers(&effective)
}
