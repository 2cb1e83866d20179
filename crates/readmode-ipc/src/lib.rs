// Author: Dustin Pilgrim
// License: MIT

pub mod protocol;
pub mod framing;
pub mod client;
pub mod server;
pub mod error;
pub mod paths;

pub use protocol::{Event, IpcHello, Request, Response, Wire, IPC_VERSION};
pub use client::IpcClient;
pub use server::{IpcServer, ClientConn};
pub use error::{IpcError, Result};
pub use paths::default_socket_path;
