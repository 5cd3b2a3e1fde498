use std::{fs::File, path::Path, sync::Mutex};

use log::warn;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

/// Installs the stderr logger and, with `log_dir`, a more verbose log file.
pub fn init_log(level: LevelFilter, log_dir: Option<&Path>) {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(level);

    let file = log_dir.and_then(create_log_file);
    let missing_file = log_dir.is_some() && file.is_none();
    let file_log = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(file_log)
        .init();

    if missing_file {
        warn!("could not create log file in {:?}", log_dir);
    }
}

fn create_log_file(dir: &Path) -> Option<File> {
    std::fs::create_dir_all(dir).ok()?;
    let file_name = format!("{}.log", chrono::Local::now().format("%Y%m%dT%H%M%S"));
    File::create(dir.join(file_name)).ok()
}
