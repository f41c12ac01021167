#![cfg(feature = "std")]

use log::{self, LevelFilter, Metadata, Record};
use std::env;

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record));
        }
    }

    fn flush(&self) {}
}

/// `LEVEL [module::path] message`, one record per line.
fn format_record(record: &Record) -> String {
    format!("{:<5} [{}] {}", record.level(), record.target(), record.args())
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "SEA_BATTLE_LOG";

/// Initialize logging with a level taken from `SEA_BATTLE_LOG`.
/// Defaults to `warn` if the variable is not set or invalid.
pub fn init_logging() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Warn);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn record_line_names_its_module() {
        let line = format_record(
            &Record::builder()
                .level(Level::Warn)
                .target("sea_battle::player_cli")
                .args(format_args!("input closed"))
                .build(),
        );
        assert_eq!(line, "WARN  [sea_battle::player_cli] input closed");
    }
}
