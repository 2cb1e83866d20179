// Author: Dustin Pilgrim
// License: MIT

use readmode_ipc::{IpcClient, Request};

use eventline::{debug, info};

use crate::cli::{Args, Cmd};

use super::{ipc, print};

pub fn run(args: Args) -> Result<(), String> {
    info!("starting client");
    debug!("parsed args: {:?}", args.cmd);

    let req = match args.cmd {
        Cmd::Palette { palette } => {
            print::print_palette(palette);
            return Ok(());
        }
        Cmd::Swatch { hex } => return print::print_swatch(&hex),

        Cmd::Watch => Request::Watch,
        Cmd::Status => Request::Status,
        Cmd::On => Request::SetReadMode { on: true },
        Cmd::Off => Request::SetReadMode { on: false },
        Cmd::Toggle => Request::Toggle,
        Cmd::Colour { selection } => Request::Select { selection },
        Cmd::Pick { position } => Request::SelectPosition { position },
        Cmd::Custom { hex } => Request::SetCustomColour { hex },
        Cmd::Intensity { value } => Request::SetIntensity { value },
        Cmd::Brightness { value } => Request::SetBrightness { value },
        Cmd::Shared { state } => Request::SetShared { shared: state.is_on() },
        Cmd::Settings => Request::GetSettings,
        Cmd::Layers => Request::Layers,
    };

    let socket = args.socket.unwrap_or_else(readmode_ipc::default_socket_path);
    debug!("socket: {}", socket.display());

    let mut client = ipc::connect(&socket)?;
    info!("connected to daemon");

    if matches!(req, Request::Watch) {
        return watch(&mut client);
    }

    let resp = ipc::call(&mut client, req)?;
    if print::print_response(resp) {
        Ok(())
    } else {
        Err("readmode: daemon rejected the request".into())
    }
}

/// Prints every event until the daemon goes away.
fn watch(client: &mut IpcClient) -> Result<(), String> {
    client.watch().map_err(|e| format!("readmode: watch failed: {e}"))?;
    info!("watching");

    loop {
        match client.next_event() {
            Ok(ev) => {
                debug!("event: {:?}", ev);
                print::print_event(&ev);
            }
            Err(e) if e.is_disconnect() => {
                info!("daemon closed the stream");
                return Ok(());
            }
            Err(e) => return Err(format!("readmode: {e}")),
        }
    }
}
