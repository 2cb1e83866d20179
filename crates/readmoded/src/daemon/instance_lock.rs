// Author: Dustin Pilgrim
// License: MIT

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

const LOCK_FILE: &str = "readmoded.lock";

#[derive(Debug, Error)]
pub enum LockError {
    #[error("socket path has no parent dir: {}", .0.display())]
    NoParent(PathBuf),

    #[error("readmoded already running (lock held at {})", .0.display())]
    AlreadyRunning(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lock file next to the socket holding the owner's pid. Removed on drop.
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    _file: File,
}

impl InstanceLock {
    pub fn acquire_for_socket(sock_path: &Path) -> Result<Self, LockError> {
        let dir = sock_path
            .parent()
            .ok_or_else(|| LockError::NoParent(sock_path.to_path_buf()))?;

        Self::acquire_at(dir.join(LOCK_FILE))
    }

    fn acquire_at(lock_path: PathBuf) -> Result<Self, LockError> {
        // A lock left by a dead process is cleared once.
        if lock_path.exists() && is_lock_stale(&lock_path) {
            let _ = fs::remove_file(&lock_path);
        }

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(LockError::AlreadyRunning(lock_path));
            }
            Err(e) => return Err(LockError::Io(e)),
        };

        writeln!(file, "pid={}", std::process::id())?;
        file.flush()?;

        Ok(Self { path: lock_path, _file: file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn read_pid(lock_path: &Path) -> Option<u32> {
    fs::read_to_string(lock_path)
        .ok()?
        .lines()
        .find_map(|l| l.strip_prefix("pid="))
        .and_then(|v| v.trim().parse::<u32>().ok())
}

fn is_lock_stale(lock_path: &Path) -> bool {
    let Some(pid) = read_pid(lock_path) else { return false; };

    // Without /proc there is no reliable liveness check.
    let proc = Path::new("/proc");
    if !proc.exists() {
        return false;
    }

    !proc.join(pid.to_string()).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_drop() {
        let dir = tempfile::tempdir().unwrap();
        let sock = dir.path().join("readmode.sock");

        let first = InstanceLock::acquire_for_socket(&sock).unwrap();
        assert_eq!(read_pid(first.path()), Some(std::process::id()));

        assert!(matches!(
            InstanceLock::acquire_for_socket(&sock),
            Err(LockError::AlreadyRunning(_))
        ));

        drop(first);
        assert!(InstanceLock::acquire_for_socket(&sock).is_ok());
    }

    #[test]
    fn garbage_lock_is_not_treated_as_stale() {
        let dir = tempfile::tempdir().unwrap();
        let lock = dir.path().join(LOCK_FILE);
        fs::write(&lock, "hello").unwrap();
        assert!(!is_lock_stale(&lock));
    }
}
