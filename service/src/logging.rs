use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{self, ConfigBuilder};

pub struct Logger {}

impl Logger {
    /// Initializes the global logger with the level from the provided Config.
    ///
    /// Fails if a global logger was already installed.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let log_level_filter = Self::convert_level_filter(config.log_level_filter);
        let log_config = Self::build_log_config(config.log_level_filter);

        simplelog::TermLogger::init(
            log_level_filter,
            log_config,
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )
    }

    /// Converts log::LevelFilter to simplelog::LevelFilter.
    fn convert_level_filter(level: LevelFilter) -> simplelog::LevelFilter {
        match level {
            LevelFilter::Off => simplelog::LevelFilter::Off,
            LevelFilter::Error => simplelog::LevelFilter::Error,
            LevelFilter::Warn => simplelog::LevelFilter::Warn,
            LevelFilter::Info => simplelog::LevelFilter::Info,
            LevelFilter::Debug => simplelog::LevelFilter::Debug,
            LevelFilter::Trace => simplelog::LevelFilter::Trace,
        }
    }

    /// Whether log lines should name the module that emitted them.
    ///
    /// Only at Debug and Trace, where registry and dispatch traces from several
    /// crates interleave with handler output.
    fn should_show_target(level: LevelFilter) -> bool {
        level >= LevelFilter::Debug
    }

    /// Builds a simplelog Config with RFC 3339 timestamps.
    fn build_log_config(level: LevelFilter) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if Self::should_show_target(level) {
            builder.set_target_level(simplelog::LevelFilter::Error);
        } else {
            builder.set_target_level(simplelog::LevelFilter::Off);
        }

        builder.build()
    }
}
