use std::{
    fs, io,
    path::{Path, PathBuf},
};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::defs::{APP_DIR, CONFIG_FILE_NAME, DEFAULT_LOGCAT_FILE, DEFAULT_PLATFORM_TOOLS, ENV_PREFIX};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the adb executable. Empty means look it up on `PATH`.
    pub platform_tools: PathBuf,
    pub clear_screen: bool,
    pub spinner: bool,
    /// Where "save logs to a file" writes the logcat dump.
    pub logcat_file: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform_tools: PathBuf::from(DEFAULT_PLATFORM_TOOLS),
            clear_screen: true,
            spinner: true,
            logcat_file: PathBuf::from(DEFAULT_LOGCAT_FILE),
            log_dir: xdg_dir("XDG_STATE_HOME", ".local/state").join("logs"),
        }
    }
}

fn xdg_dir(var: &str, home_fallback: &str) -> PathBuf {
    if let Ok(xdg) = std::env::var(var) {
        Path::new(&xdg).join(APP_DIR)
    } else if let Ok(home) = std::env::var("HOME") {
        Path::new(&home).join(home_fallback).join(APP_DIR)
    } else {
        PathBuf::from(APP_DIR)
    }
}

pub fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join(CONFIG_FILE_NAME)
}

pub fn ensure_config_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        fs::write(
            path,
            "# easyadb configuration\n\
             \n\
             # directory holding the adb executable (empty: search PATH)\n\
             # platform_tools = \"platform-tools\"\n\
             # clear_screen = true\n\
             # spinner = true\n\
             # logcat_file = \"logcat.txt\"\n",
        )?;
    }

    Ok(())
}

/// Reads the config file (if present) and `EASYADB_*` environment overrides.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    load_with_env(path, Environment::with_prefix(ENV_PREFIX))
}

fn load_with_env(path: &Path, env: Environment) -> anyhow::Result<AppConfig> {
    let config = Config::builder()
        .add_source(File::from(path.to_path_buf()).required(false))
        .add_source(env)
        .build()?;

    Ok(config.try_deserialize::<AppConfig>()?)
}
