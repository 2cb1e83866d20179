// Author: Dustin Pilgrim
// License: MIT

use readmode_core::{Observers, OverlayLayers};
use readmode_ipc::Event;

use crate::config::ReadModeConfig;

use super::store::SettingsStore;

#[derive(Debug)]
pub struct DaemonState {
    pub cfg: ReadModeConfig,
    pub store: SettingsStore,
    /// Watching clients (render targets).
    pub observers: Observers<Event>,
}

impl DaemonState {
    pub fn new(cfg: ReadModeConfig, store: SettingsStore) -> Self {
        Self {
            cfg,
            store,
            observers: Observers::new(),
        }
    }

    /// What a render target should paint now; `None` while read mode is off.
    pub fn current_layers(&self) -> Option<OverlayLayers> {
        self.store
            .settings()
            .read_mode_on
            .then(|| self.store.layers())
    }

    /// Tells every watcher about the change. `was_on` is read mode before it.
    pub fn publish(&mut self, was_on: bool) {
        let settings = self.store.settings().clone();
        let active = self.store.active_levels();
        let layers = self.current_layers();

        if settings.read_mode_on != was_on {
            self.observers.notify(&Event::ReadModeChanged { on: settings.read_mode_on });
        }
        self.observers.notify(&Event::SettingsChanged { settings, active });
        self.observers.notify(&Event::LayersChanged { layers });
    }
}
