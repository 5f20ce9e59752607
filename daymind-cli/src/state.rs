use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// `$DAYMIND_HOME` if set, else `~/.daymind`.
pub fn daymind_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("DAYMIND_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set (or set DAYMIND_HOME)")?;
    Ok(PathBuf::from(home).join(".daymind"))
}

pub fn ensure_daymind_home() -> Result<PathBuf> {
    let dir = daymind_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}
