// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IpcError>;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Ser(#[from] postcard::Error),

    #[error("frame too large")]
    FrameTooLarge,

    #[error("version mismatch (client {client}, server {server})")]
    VersionMismatch { client: u32, server: u32 },

    #[error("daemon returned error: {0}")]
    Remote(String),
}

impl IpcError {
    /// True when the peer hung up rather than misbehaved.
    pub fn is_disconnect(&self) -> bool {
        match self {
            IpcError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::ConnectionReset
            ),
            _ => false,
        }
    }

    pub fn is_would_block(&self) -> bool {
        matches!(self, IpcError::Io(e) if e.kind() == std::io::ErrorKind::WouldBlock)
    }
}
