use anyhow::{Context, Result};
use daymind_core::{LoadWeights, ProfileInput, UserProfile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::{daymind_home, ensure_daymind_home};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileInput,

    /// Partial overrides are fine; missing keys keep the built-in weights.
    #[serde(default)]
    pub weights: LoadWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: ProfileInput {
                wake_up_time: Some("07:00".to_string()),
                bed_time: Some("23:00".to_string()),
                energy_peak_time: Some("morning".to_string()),
                sleep_hours: Some(8),
                timezone: Some("UTC".to_string()),
            },
            weights: LoadWeights::default(),
        }
    }
}

impl Config {
    pub fn user_profile(&self) -> Result<UserProfile> {
        self.profile
            .clone()
            .into_profile()
            .context("invalid [profile] section in config.toml")
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(daymind_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_daymind_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
