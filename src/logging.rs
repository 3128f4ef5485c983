use simplelog::ColorChoice;
use simplelog::ConfigBuilder;
use simplelog::LevelFilter;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::ThreadLogMode;

use crate::error::Result;

pub fn level_filter(verbosity: usize) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the terminal logger. Every line carries the name of the
/// thread it was logged from, which is `rank-<n>` for ranks of a
/// local world.
pub fn initialize(verbosity: usize) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_thread_level(LevelFilter::Error)
        .set_thread_mode(ThreadLogMode::Names)
        .set_target_level(LevelFilter::Off)
        .set_time_level(LevelFilter::Debug)
        .build();
    TermLogger::init(
        level_filter(verbosity),
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    Ok(())
}
