// Author: Dustin Pilgrim
// License: MIT

use std::os::unix::fs::FileTypeExt;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use readmode_core::OverlayLayers;
use readmode_ipc::{ClientConn, Event, IpcServer, Request, Response, Result};
use eventline::{debug, info, warn};

use crate::config::ReadModeConfig;

use super::handlers::handle_request;
use super::instance_lock::{InstanceLock, LockError};
use super::paths::{default_socket_path, ensure_parent_dir};
use super::state::DaemonState;
use super::store::SettingsStore;

type Shared = Arc<Mutex<DaemonState>>;

fn cleanup_stale_socket(sock: &Path) -> std::io::Result<()> {
    if !sock.exists() {
        return Ok(());
    }

    let md = std::fs::symlink_metadata(sock)?;
    if md.file_type().is_socket() {
        std::fs::remove_file(sock)
    } else {
        Err(std::io::Error::other(format!(
            "socket path exists but is not a unix socket: {}",
            sock.display()
        )))
    }
}

// A panicking client thread must not take the daemon down with it.
fn lock(state: &Shared) -> MutexGuard<'_, DaemonState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn run(cfg: ReadModeConfig, mut store: SettingsStore, verbose: bool) -> Result<()> {
    let sock = default_socket_path();
    info!("socket path: {}", sock.display());

    ensure_parent_dir(&sock)?;

    let _lock = match InstanceLock::acquire_for_socket(&sock) {
        Ok(l) => {
            debug!("acquired singleton lock at {}", l.path().display());
            l
        }
        Err(e @ LockError::AlreadyRunning(_)) => {
            warn!("{e}");
            if !verbose {
                eprintln!("readmoded: {e}");
            }
            return Ok(()); // clean exit
        }
        Err(e) => {
            warn!("failed to acquire singleton lock: {e}");
            return Err(std::io::Error::other(e).into());
        }
    };

    if let Err(e) = cleanup_stale_socket(&sock) {
        warn!("failed to cleanup stale socket '{}': {e}", sock.display());
        return Err(e.into());
    }

    if !cfg.restore_read_mode && store.settings().read_mode_on {
        info!("restore_read_mode=false, starting with read mode off");
        if let Err(e) = store.set_read_mode(false) {
            warn!("failed to reset read mode: {e}");
        }
    }

    info!("palette={:?}", cfg.palette);
    info!(
        "store={} ({} per-colour entries)",
        store.path().display(),
        store.per_colour().len()
    );
    info!(
        "read_mode_on={} selected={}",
        store.settings().read_mode_on,
        store.settings().selected
    );

    let state: Shared = Arc::new(Mutex::new(DaemonState::new(cfg, store)));

    let server = IpcServer::bind(&sock)?;
    server.set_nonblocking(true)?;
    info!("listening on {}", server.socket_path().display());

    loop {
        let conn = match server.accept() {
            Ok(c) => c,
            Err(e) if e.is_would_block() => {
                thread::sleep(Duration::from_millis(100));
                continue;
            }
            Err(e) => {
                warn!("accept error: {e}");
                thread::sleep(Duration::from_millis(200));
                continue;
            }
        };

        info!("client connected");
        let state = Arc::clone(&state);
        thread::spawn(move || match serve_client(state, conn) {
            Ok(()) => {
                info!("client disconnected");
            }
            Err(e) if e.is_disconnect() => {
                info!("client disconnected");
            }
            Err(e) => {
                warn!("client error: {e}");
            }
        });
    }
}

fn serve_client(state: Shared, mut conn: ClientConn) -> Result<()> {
    let first = conn.recv()?;
    debug!("first message: {:?}", first);
    conn.handle_hello(&first)?;

    loop {
        let req = match conn.recv() {
            Ok(r) => r,
            Err(e) if e.is_disconnect() => return Ok(()),
            Err(e) => return Err(e),
        };

        debug!("request: {:?}", req);

        if matches!(req, Request::Watch) {
            return watch(state, conn);
        }

        let resp = handle_request(&mut lock(&state), req);
        debug!("sending response: {:?}", resp);
        conn.send(resp)?;
    }
}

/// Streams events to a render target until it goes away.
fn watch(state: Shared, mut conn: ClientConn) -> Result<()> {
    // `None` means the watcher hung up.
    let (tx, rx) = mpsc::channel::<Option<Event>>();

    let mut hangup = conn.try_clone()?;

    let (id, initial) = {
        let tx = tx.clone();
        let mut st = lock(&state);
        let id = st.observers.subscribe(move |ev| tx.send(Some(ev.clone())).is_ok());
        info!("watcher subscribed ({} total)", st.observers.len());
        (id, st.current_layers())
    };

    // A watcher sends nothing after `Watch`, so any read result means it is gone.
    thread::spawn(move || {
        let _ = hangup.recv();
        let _ = tx.send(None);
    });

    let res = forward(&mut conn, initial, &rx);

    {
        let mut st = lock(&state);
        st.observers.unsubscribe(id);
        info!("watcher unsubscribed ({} left)", st.observers.len());
    }
    let _ = conn.shutdown();

    res
}

fn forward(
    conn: &mut ClientConn,
    initial: Option<OverlayLayers>,
    rx: &mpsc::Receiver<Option<Event>>,
) -> Result<()> {
    conn.send(Response::Ok)?;
    conn.send_event(Event::LayersChanged { layers: initial })?;

    while let Ok(Some(ev)) = rx.recv() {
        conn.send_event(ev)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use readmode_core::Palette;
    use readmode_ipc::IpcClient;

    fn shared_state(dir: &Path) -> Shared {
        let path = dir.join("settings.yml");
        let store = SettingsStore::open(&path).unwrap();
        let cfg = ReadModeConfig {
            palette: Palette::Soft,
            store_path: path,
            restore_read_mode: true,
        };
        Arc::new(Mutex::new(DaemonState::new(cfg, store)))
    }

    fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn departed_watcher_is_dropped_without_further_events() {
        let dir = tempfile::tempdir().unwrap();
        let state = shared_state(dir.path());
        let server = IpcServer::bind(dir.path().join("w.sock")).unwrap();

        let served = Arc::clone(&state);
        let handle = thread::spawn(move || {
            let conn = server.accept().unwrap();
            serve_client(served, conn)
        });

        let mut client = IpcClient::connect(dir.path().join("w.sock")).unwrap();
        client.watch().unwrap();
        assert!(matches!(
            client.next_event().unwrap(),
            Event::LayersChanged { layers: None }
        ));
        assert!(wait_for(|| lock(&state).observers.len() == 1));

        drop(client);

        assert!(wait_for(|| lock(&state).observers.is_empty()));
        assert!(handle.join().unwrap().is_ok());
    }
}
