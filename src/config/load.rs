use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `DUET__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("DUET")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.engine.tick_ms) {
            return Err("engine.tick_ms must be between 1 and 100".to_string());
        }
        if self.engine.idle_sample_every == 0 {
            return Err("engine.idle_sample_every must be >= 1".to_string());
        }
        if self.engine.untimed_cue_spacing_ms == 0 {
            return Err("engine.untimed_cue_spacing_ms must be >= 1".to_string());
        }
        for (name, step) in [
            ("controls.balance_step", self.controls.balance_step),
            ("controls.scrub_step", self.controls.scrub_step),
        ] {
            if !(1..=100).contains(&step) {
                return Err(format!("{name} must be between 1 and 100"));
            }
        }
        Ok(())
    }

    /// The persisted state file: `state.path` or the XDG default.
    pub fn state_path(&self) -> Option<PathBuf> {
        self.state.path.clone().or_else(default_state_path)
    }

    /// The log file: `log.file` or `duet.log` beside the state file.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(|| {
            self.state_path()
                .and_then(|p| p.parent().map(|d| d.join("duet.log")))
        })
    }
}

/// Resolve the config path from `DUET_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("DUET_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/duet/config.toml`
/// or `~/.config/duet/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("duet").join("config.toml"))
}

/// Compute the default state file under `$XDG_STATE_HOME/duet/player_state.json`
/// or `~/.local/state/duet/player_state.json`.
pub fn default_state_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("duet").join("player_state.json"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
