// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};
use readmode_core::{Levels, OverlayLayers, OverlaySettings, Palette, Selection};

pub const IPC_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Wire {
    Response(Response),
    Event(Event),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcHello {
    pub version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Request {
    Hello(IpcHello),

    Status,

    /// Full settings snapshot plus the levels currently in effect.
    GetSettings,

    /// Layers a render target should paint right now.
    Layers,

    SetReadMode { on: bool },
    Toggle,

    Select { selection: Selection },

    /// Select by colour dropdown position (0 = none, last = custom).
    SelectPosition { position: u32 },

    /// `#RRGGBB`; also selects the custom colour.
    SetCustomColour { hex: String },

    /// 0..=100. Applies to the selected colour unless levels are shared.
    SetIntensity { value: u32 },
    SetBrightness { value: u32 },

    SetShared { shared: bool },

    /// Turn this connection into an event stream. The daemon answers `Ok`,
    /// sends the current layers, then pushes events until the client goes away.
    Watch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Response {
    Ok,

    Status {
        read_mode_on: bool,
        selected: Selection,
        palette: Palette,
        layers: Option<OverlayLayers>,
    },

    Settings {
        settings: OverlaySettings,
        active: Levels,
    },

    /// `None` while read mode is off.
    Layers { layers: Option<OverlayLayers> },

    Error { message: String },
}

/// Daemon → watcher notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ReadModeChanged { on: bool },

    SettingsChanged {
        settings: OverlaySettings,
        active: Levels,
    },

    /// `None` means stop painting.
    LayersChanged { layers: Option<OverlayLayers> },
}
