use anyhow::Context;
use std::{
    fs::{self, File},
    path::Path,
    sync::Mutex,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const BANNER: &str = r#"
 __   _______   __  __      _            _       _
 \ \ / /_   _| |  \/  | ___| |_ __ _  __| | __ _| |_ __ _
  \ V /  | |   | |\/| |/ _ \ __/ _` |/ _` |/ _` | __/ _` |
   | |   | |   | |  | |  __/ || (_| | (_| | (_| | || (_| |
   |_|   |_|   |_|  |_|\___|\__\__,_|\__,_|\__,_|\__\__,_|

          YouTube Video Metadata Extractor
"#;

/// Sends all logs to `log_file`, which is truncated first. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_logging(log_file: &Path) -> anyhow::Result<()> {
    if let Some(folder) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(folder)
            .with_context(|| format!("Failed to create log folder {}", folder.display()))?;
    }
    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init()
        .context("Failed to install the log subscriber")?;

    Ok(())
}

/// Creates the report folder when it is missing. Returns whether it was created.
pub fn ensure_output_folder(folder: &Path) -> anyhow::Result<bool> {
    if folder.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(folder)
        .with_context(|| format!("Failed to create output folder {}", folder.display()))?;
    Ok(true)
}
