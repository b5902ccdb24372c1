//! Logger setup.

use log::LevelFilter;

#[cfg(debug_assertions)]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// Installs a [`fern`] logger that writes timestamped lines to stdout.
///
/// Can only succeed once per process; later calls return an error.
pub fn init() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(DEFAULT_LEVEL)
        .level_for("egui_glow", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
