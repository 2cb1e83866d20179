// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use readmode_ipc::{IpcClient, Request, Response};
use eventline::error;

pub fn connect(socket: &Path) -> Result<IpcClient, String> {
    IpcClient::connect(socket).map_err(|e| {
        error!("failed to connect to daemon: {e}");

        format!(
            "readmode: cannot connect to readmoded at {}\n\
             → {}\n\
             Hint: start the daemon with `readmoded`.",
            socket.display(),
            e
        )
    })
}

pub fn call(client: &mut IpcClient, req: Request) -> Result<Response, String> {
    eventline::debug!("sending {:?}", req);
    client.call(req).map_err(|e| {
        error!("request failed: {e}");
        format!("readmode: {e}")
    })
}
