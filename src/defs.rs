pub const APP_DIR: &str = "easyadb";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "latest.log";
pub const ENV_PREFIX: &str = "EASYADB";

pub const DEFAULT_PLATFORM_TOOLS: &str = "platform-tools";
pub const DEFAULT_LOGCAT_FILE: &str = "logcat.txt";

pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

pub const BANNER: &str = r"
 _____                   _    ____  ____
| ____|__ _ ___ _   _   / \  |  _ \| __ )
|  _| / _` / __| | | | / _ \ | | | |  _ \
| |__| (_| \__ \ |_| |/ ___ \| |_| | |_) |
|_____\__,_|___/\__, /_/   \_\____/|____/
                |___/
By: Awiones
";

/// Name of the adb executable on the host platform.
pub const fn adb_binary_name() -> &'static str {
    if cfg!(windows) { "adb.exe" } else { "adb" }
}
