use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use crate::error::{Error, Result};
use log::LevelFilter;
use std::path::PathBuf;

/// Installs the global logger. Fails when a logger is already installed or
/// the log file cannot be opened.
pub fn init(level: LevelFilter, output: &Option<PathBuf>) -> Result<()> {
    let mut dispatcher = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(log_file) = output {
        let file = fern::log_file(log_file).map_err(|e| Error::Logging(e.to_string()))?;
        dispatcher = dispatcher.chain(file);
    }
    dispatcher
        .apply()
        .map_err(|e| Error::Logging(e.to_string()))?;
    info!("{} logging level {} enabled", CARGO_PKG_NAME, level);
    Ok(())
}

pub fn init_from(settings: &crate::configuration::Settings) -> Result<()> {
    init(settings.log_level, &settings.log_output_file)
}
