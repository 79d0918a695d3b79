mod adb;
mod catalog;
mod cli;
mod config;
mod defs;
mod logging;
mod menu;
mod process;
mod prompt;
mod session;

use std::io;

use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;
use tracing::info;
use tracing::warn;

use crate::adb::Adb;
use crate::cli::Cli;
use crate::cli::TopLevel;
use crate::config::AppConfig;
use crate::process::ProcessRunner;
use crate::prompt::ConsolePrompter;
use crate::session::Session;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(TopLevel::Completion { shell }) = cli.command {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut io::stdout());
        return Ok(());
    }

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let (mut config, config_error) = match config::load_config(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(platform_tools) = cli.platform_tools {
        config.platform_tools = platform_tools;
    }
    if cli.no_clear {
        config.clear_screen = false;
    }

    let _guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            let _ = logging::init_console_logging();
            warn!("file logging disabled: {e:#}");
            None
        }
    };

    if let Some(e) = config_error {
        warn!("invalid configuration in {config_path:?}, using defaults: {e:#}");
    }

    if let Err(e) = config::ensure_config_file(&config_path) {
        warn!("failed to prepare config file {config_path:?}: {e}");
    }

    let adb = Adb::new(&config.platform_tools);
    info!(adb = %adb.binary().display(), "starting");

    let runner = ProcessRunner::new(config.spinner);
    let menus = catalog::menus();
    let result = Session::new(
        &adb,
        &runner,
        &config,
        &menus,
        ConsolePrompter::new(),
        io::stdout(),
    )
    .run();

    match result {
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof) =>
        {
            info!("input closed, leaving");
            Ok(())
        }
        other => other,
    }
}
