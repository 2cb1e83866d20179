// Author: Dustin Pilgrim
// License: MIT

use readmode_ipc::{Request, Response};

use eventline::{debug, info, warn};

use super::state::DaemonState;
use super::store::{SettingsStore, StoreError};

/// Answers one request. `Hello` and `Watch` belong to the connection loop.
pub fn handle_request(state: &mut DaemonState, req: Request) -> Response {
    match req {
        Request::Hello(_) => Response::Error {
            message: "already greeted".into(),
        },

        Request::Watch => Response::Error {
            message: "watch must be handled by the connection".into(),
        },

        Request::Status => Response::Status {
            read_mode_on: state.store.settings().read_mode_on,
            selected: state.store.settings().selected,
            palette: state.cfg.palette,
            layers: state.current_layers(),
        },

        Request::GetSettings => Response::Settings {
            settings: state.store.settings().clone(),
            active: state.store.active_levels(),
        },

        Request::Layers => Response::Layers {
            layers: state.current_layers(),
        },

        Request::SetReadMode { on } => apply(state, "set read mode", |s| s.set_read_mode(on)),

        Request::Toggle => {
            let on = !state.store.settings().read_mode_on;
            apply(state, "toggle", |s| s.set_read_mode(on))
        }

        Request::Select { selection } => apply(state, "select", |s| s.select(selection)),

        Request::SelectPosition { position } => {
            let palette = state.cfg.palette;
            match palette.selection_at(position as usize) {
                Some(selection) => apply(state, "select position", |s| s.select(selection)),
                None => {
                    let message = format!(
                        "no colour at position {position} (palette {palette:?} has 0..={})",
                        palette.custom_position()
                    );
                    warn!("{message}");
                    Response::Error { message }
                }
            }
        }

        Request::SetCustomColour { hex } => {
            apply(state, "set custom colour", |s| s.set_custom_colour(&hex))
        }

        Request::SetIntensity { value } => apply(state, "set intensity", |s| s.set_intensity(value)),

        Request::SetBrightness { value } => {
            apply(state, "set brightness", |s| s.set_brightness(value))
        }

        Request::SetShared { shared } => apply(state, "set shared", |s| s.set_shared(shared)),
    }
}

fn apply<F>(state: &mut DaemonState, what: &str, f: F) -> Response
where
    F: FnOnce(&mut SettingsStore) -> Result<(), StoreError>,
{
    let was_on = state.store.settings().read_mode_on;

    match f(&mut state.store) {
        Ok(()) => {
            debug!("{what}: {:?}", state.store.settings());
            if let Some(layers) = state.current_layers() {
                info!(
                    "{what}: dim={} tint={}",
                    layers.dim,
                    layers.tint.map(|t| t.to_string()).unwrap_or_else(|| "none".into())
                );
            } else {
                info!("{what}: read mode off");
            }
            state.publish(was_on);
            Response::Ok
        }
        Err(e) => {
            warn!("{what} failed: {e}");
            Response::Error { message: e.to_string() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use readmode_core::{Argb, Levels, Palette, PresetColour, Selection};
    use readmode_ipc::Event;

    use crate::config::ReadModeConfig;

    fn state(palette: Palette) -> (tempfile::TempDir, DaemonState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        let store = SettingsStore::open(&path).unwrap();
        let cfg = ReadModeConfig {
            palette,
            store_path: path,
            restore_read_mode: true,
        };
        (dir, DaemonState::new(cfg, store))
    }

    fn ok(resp: Response) {
        assert!(matches!(resp, Response::Ok), "got {resp:?}");
    }

    #[test]
    fn layers_only_while_on() {
        let (_dir, mut st) = state(Palette::Soft);
        ok(handle_request(&mut st, Request::SelectPosition { position: 1 }));

        assert!(matches!(
            handle_request(&mut st, Request::Layers),
            Response::Layers { layers: None }
        ));

        ok(handle_request(&mut st, Request::Toggle));
        ok(handle_request(&mut st, Request::SetShared { shared: true }));
        ok(handle_request(&mut st, Request::SetIntensity { value: 50 }));
        ok(handle_request(&mut st, Request::SetBrightness { value: 30 }));

        match handle_request(&mut st, Request::Layers) {
            Response::Layers { layers: Some(l) } => {
                assert_eq!(l.dim, Argb::new(120, 0, 0, 0));
                assert_eq!(l.tint, Some(Argb::new(120, 245, 245, 170)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn position_uses_configured_palette() {
        let (_dir, mut st) = state(Palette::Classic);
        ok(handle_request(&mut st, Request::SelectPosition { position: 2 }));
        assert_eq!(
            st.store.settings().selected,
            Selection::Preset(PresetColour::Pink)
        );

        ok(handle_request(&mut st, Request::SelectPosition { position: 6 }));
        assert_eq!(st.store.settings().selected, Selection::Custom);

        assert!(matches!(
            handle_request(&mut st, Request::SelectPosition { position: 7 }),
            Response::Error { .. }
        ));
    }

    #[test]
    fn bad_input_is_an_error_response() {
        let (_dir, mut st) = state(Palette::Soft);

        match handle_request(&mut st, Request::SetCustomColour { hex: "red".into() }) {
            Response::Error { message } => assert!(message.contains("red"), "{message}"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            handle_request(&mut st, Request::SetBrightness { value: 500 }),
            Response::Error { .. }
        ));
        match handle_request(&mut st, Request::SetIntensity { value: 10 }) {
            Response::Error { message } => assert!(message.contains("no colour selected"), "{message}"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(st.store.per_colour().is_empty());
        assert_eq!(st.store.settings().selected, Selection::None);
    }

    #[test]
    fn settings_report_active_levels() {
        let (_dir, mut st) = state(Palette::Soft);
        ok(handle_request(&mut st, Request::SetCustomColour { hex: "#FF5733".into() }));
        ok(handle_request(&mut st, Request::SetIntensity { value: 40 }));

        match handle_request(&mut st, Request::GetSettings) {
            Response::Settings { settings, active } => {
                assert_eq!(settings.selected, Selection::Custom);
                assert_eq!(active, Levels { intensity: 40, brightness: 50 });
                // per-colour mode leaves the shared pair alone
                assert_eq!(settings.levels(), Levels::default());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn watchers_see_changes_in_order() {
        let (_dir, mut st) = state(Palette::Soft);
        let (tx, rx) = mpsc::channel();
        st.observers.subscribe(move |ev: &Event| tx.send(ev.clone()).is_ok());

        ok(handle_request(&mut st, Request::SetReadMode { on: true }));

        let events: Vec<Event> = rx.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::ReadModeChanged { on: true }));
        assert!(matches!(events[1], Event::SettingsChanged { .. }));
        match &events[2] {
            Event::LayersChanged { layers: Some(l) } => assert_eq!(l.tint, None),
            other => panic!("unexpected {other:?}"),
        }

        ok(handle_request(&mut st, Request::Select {
            selection: Selection::Preset(PresetColour::SoftBlue),
        }));
        let events: Vec<Event> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn failed_change_notifies_nobody() {
        let (_dir, mut st) = state(Palette::Soft);
        let (tx, rx) = mpsc::channel();
        st.observers.subscribe(move |ev: &Event| tx.send(ev.clone()).is_ok());

        let _ = handle_request(&mut st, Request::SetIntensity { value: 101 });
        assert_eq!(rx.try_iter().count(), 0);
    }
}
