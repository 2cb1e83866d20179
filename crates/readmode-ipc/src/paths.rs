// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

/// Socket both sides agree on when nothing overrides it:
/// `$XDG_RUNTIME_DIR/readmode/readmode.sock`, or under /tmp without a runtime dir.
pub fn default_socket_path() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("readmode")
        .join("readmode.sock")
}
