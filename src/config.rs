//! User configuration — UI preferences and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/simlab/config.toml` (default `~/.config/simlab/config.toml`).
//! Only UI preferences live here; simulation state is never persisted.

use std::path::PathBuf;

use crate::app::state::ActiveTab;

/// Tick interval bounds.  The lower bound keeps the simulations at or below
/// 20 ticks per second.
const TICK_RATE_MIN_MS: u64 = 50;
const TICK_RATE_MAX_MS: u64 = 500;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Timer tick interval in milliseconds.
    pub tick_rate_ms: u64,
    /// Tab shown at startup.
    pub start_view: ActiveTab,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: TICK_RATE_MIN_MS,
            start_view: ActiveTab::default(),
        }
    }
}

impl AppConfig {
    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::default()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "tick_rate_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.tick_rate_ms = v.clamp(TICK_RATE_MIN_MS, TICK_RATE_MAX_MS);
                    }
                }
                "start_view" => {
                    if let Some(tab) = ActiveTab::from_config_key(value) {
                        config.start_view = tab;
                    }
                }
                _ => {}
            }
        }

        config
    }

    fn serialise(&self) -> String {
        [
            "# simlab configuration".to_string(),
            String::new(),
            format!("tick_rate_ms = {}", self.tick_rate_ms),
            format!("start_view = {}", self.start_view.config_key()),
            String::new(),
        ]
        .join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/simlab/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("simlab").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_known_keys_and_clamps() {
        let config = AppConfig::parse_config(
            "# comment\ntick_rate_ms = 10\nstart_view = scheduler\nbogus = 1\n",
        );
        assert_eq!(config.tick_rate_ms, TICK_RATE_MIN_MS);
        assert_eq!(config.start_view, ActiveTab::Scheduler);
    }

    #[test]
    fn serialise_round_trips() {
        let config = AppConfig {
            tick_rate_ms: 100,
            start_view: ActiveTab::Filesystem,
        };
        let parsed = AppConfig::parse_config(&config.serialise());
        assert_eq!(parsed.tick_rate_ms, 100);
        assert_eq!(parsed.start_view, ActiveTab::Filesystem);
    }
}
