// Author: Dustin Pilgrim
// License: MIT

use std::env;
use std::path::{Path, PathBuf};

use readmode_core::Palette;
use rune_cfg::RuneConfig;

#[derive(Debug, Clone)]
pub struct ReadModeConfig {
    /// Presets offered by the colour dropdown.
    pub palette: Palette,
    /// Where the settings store lives.
    pub store_path: PathBuf,
    /// Bring the overlay back on start if it was on at shutdown.
    pub restore_read_mode: bool,
}

impl Default for ReadModeConfig {
    fn default() -> Self {
        Self {
            palette: Palette::Soft,
            store_path: default_store_path(),
            restore_read_mode: true,
        }
    }
}

pub fn load(path: Option<&Path>) -> Result<ReadModeConfig, String> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_user_config_path);

    if !path.exists() {
        return Ok(ReadModeConfig::default());
    }

    let rc = RuneConfig::from_file(&path)
        .map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<ReadModeConfig, String> {
    let mut cfg = ReadModeConfig::default();

    if !rc.has("readmode") {
        return Ok(cfg);
    }

    // palette
    if let Some(palette) = rc
        .get_optional::<String>("readmode.palette")
        .map_err(|e| format!("config error at readmode.palette: {e}"))?
    {
        cfg.palette = palette
            .parse()
            .map_err(|e| format!("config error at readmode.palette: {e}"))?;
    }

    // store_path
    if let Some(p) = rc
        .get_optional::<String>("readmode.store_path")
        .map_err(|e| format!("config error at readmode.store_path: {e}"))?
    {
        if p.trim().is_empty() {
            return Err("config error at readmode.store_path: path is empty".into());
        }
        cfg.store_path = expand_env(&p);
    }

    // restore_read_mode
    if let Some(restore) = rc
        .get_optional::<bool>("readmode.restore_read_mode")
        .map_err(|e| format!("config error at readmode.restore_read_mode: {e}"))?
    {
        cfg.restore_read_mode = restore;
    }

    Ok(cfg)
}

fn expand_env(s: &str) -> PathBuf {
    let mut out = s.trim().to_string();

    if out.contains("$env.HOME") {
        if let Ok(home) = env::var("HOME") {
            out = out.replace("$env.HOME", &home);
        }
    }

    PathBuf::from(out)
}

fn config_dir() -> PathBuf {
    let dir: PathBuf = if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(".config")
    };

    dir.join("readmode")
}

pub fn default_user_config_path() -> PathBuf {
    config_dir().join("readmode.rune")
}

fn default_store_path() -> PathBuf {
    config_dir().join("settings.yml")
}
