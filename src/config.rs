// config.rs: Runtime configuration defaults.
//
// There is no configuration file: the only runtime override is the log filter,
// read from the environment by the binary at startup.

/// Crate version as declared in Cargo.toml; printed by the help command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Environment variable holding a `tracing_subscriber::EnvFilter` directive,
// e.g. `CMDMUX_LOG=debug` or `CMDMUX_LOG=cmdmux::cli::manager=trace`.
pub const LOG_ENV: &str = "CMDMUX_LOG";

// Filter applied when `LOG_ENV` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Total column budget for help listings. Descriptions are word-wrapped to
// `RENDER_WIDTH - <label column width>`.
pub const RENDER_WIDTH: usize = 100;

/// Returns the log filter directive for this process.
///
/// Reads [`LOG_ENV`]; an unset or blank value yields [`DEFAULT_LOG_FILTER`].
pub fn log_filter() -> String {
    log_filter_from(std::env::var(LOG_ENV).ok().as_deref())
}

/// Testable core of [`log_filter`]: pass `None` to simulate the variable being unset.
pub fn log_filter_from(env_val: Option<&str>) -> String {
    match env_val.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_owned(),
        _ => DEFAULT_LOG_FILTER.to_owned(),
    }
}
