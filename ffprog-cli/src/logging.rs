// ============================================================================
// ffprog-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Initialisation for the CLI
//
// Log records go to stderr so they never interleave with the progress line on
// stdout. `RUST_LOG` wins over the verbosity flags when it is set.
//
// - default: warn
// - -v: info (probe results, session start and end)
// - -vv: debug (every tailed line)

use log::LevelFilter;
use std::io::Write;

/// Maps the number of `-v` flags to a level filter.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialises the global logger. Safe to call once per process.
pub fn init(verbose: u8) {
    let level = level_for_verbosity(verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                get_timestamp(),
                record.level(),
                record.args()
            )
        })
        .init();
    log::debug!("Logger initialized with default level: {level}");
}

/// Returns the current local time formatted for log lines.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
