//! Runtime configuration for the terminal binary.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. a JSON file (`BUBBLE_POP_CONFIG`, else `bubble-pop.json` if present)
//! 3. `BUBBLE_POP_*` environment variables

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::SessionConfig;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_SIDE};

pub const CONFIG_PATH_ENV: &str = "BUBBLE_POP_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "bubble-pop.json";

/// Widest board cell in terminal columns
pub const MAX_CELL_W: u16 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Fixed RNG seed; `None` picks one from the clock
    pub seed: Option<u32>,
    pub width: usize,
    pub height: usize,
    /// Terminal columns per board cell
    pub cell_w: u16,
    /// Where to write tracing output; logging is off without it
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            width: BOARD_WIDTH as usize,
            height: BOARD_HEIGHT as usize,
            cell_w: 2,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Load from the config file and the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim()))?,
            _ => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config.clamped())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.clamped())
    }

    /// Apply `BUBBLE_POP_*` overrides. Values that don't parse are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = parse_var(&lookup, "BUBBLE_POP_SEED") {
            self.seed = Some(seed);
        }
        if let Some(width) = parse_var(&lookup, "BUBBLE_POP_WIDTH") {
            self.width = width;
        }
        if let Some(height) = parse_var(&lookup, "BUBBLE_POP_HEIGHT") {
            self.height = height;
        }
        if let Some(path) = lookup("BUBBLE_POP_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            self.log_file = Some(PathBuf::from(path));
        }
    }

    fn clamped(mut self) -> Self {
        let side = MAX_BOARD_SIDE as usize;
        self.width = self.width.clamp(1, side);
        self.height = self.height.clamp(1, side);
        self.cell_w = self.cell_w.clamp(1, MAX_CELL_W);
        self
    }

    /// Seed to use, drawing one from the clock when none is configured.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1)
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            width: self.width,
            height: self.height,
            seed: self.resolve_seed(),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}
