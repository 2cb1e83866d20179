// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

pub use readmode_ipc::default_socket_path;

pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// `$XDG_STATE_HOME/readmode/<file>`, else `~/.local/state/readmode/<file>`.
pub fn default_log_path(file: &str) -> PathBuf {
    state_dir().join("readmode").join(file)
}

fn state_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_STATE_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".local").join("state"),
        None => PathBuf::from("/tmp"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_lands_in_readmode_dir() {
        let p = default_log_path("readmoded.log");
        assert!(p.ends_with("readmode/readmoded.log"));
    }

    #[test]
    fn ensure_parent_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a/b/c.log");
        ensure_parent_dir(&file).unwrap();
        assert!(dir.path().join("a/b").is_dir());
        ensure_parent_dir(Path::new("bare.log")).unwrap();
    }
}
