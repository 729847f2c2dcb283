// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fs, path::PathBuf, str::FromStr};

use timetable_core::{APP_NAME, Config};

const TIMETABLE_CONFIG_ENV: &str = "TIMETABLE_CONFIG";
const TIMETABLE_DEV_ENV: &str = "TIMETABLE_DEV";

const TIMETABLE_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const TIMETABLE_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Locate and read the configuration.
///
/// Lookup order: the given path, `$TIMETABLE_CONFIG`, then the user config
/// directory. A missing file in the user config directory means the built-in
/// defaults.
#[tracing::instrument]
pub fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(TIMETABLE_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({TIMETABLE_DEV_ENV} is set): config must be explicitly specified via --config or {TIMETABLE_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| a.core)
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(TIMETABLE_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if TIMETABLE_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if TIMETABLE_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            TIMETABLE_DEV_ENV,
            val,
            TIMETABLE_DEV_VALID_TRUE.join(", "),
            TIMETABLE_DEV_VALID_FALSE.join(", ")
        );
        None
    }
}
