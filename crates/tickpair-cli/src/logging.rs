use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

const DEFAULT_FILTER: &str = "tickpair=warn,tickpair_core=warn";

/// Installs the stderr subscriber. `--log-level` wins over `RUST_LOG`.
pub fn init(level: Option<LogLevel>) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(level, rust_log.as_deref());

    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
    {
        eprintln!("warning: logging disabled: {error}");
    }
}

/// Filter precedence: explicit level, then `RUST_LOG`, then the default.
/// An unparsable `RUST_LOG` falls back to the default.
fn build_filter(level: Option<LogLevel>, rust_log: Option<&str>) -> EnvFilter {
    let directives = match (level, rust_log) {
        (Some(level), _) => format!("tickpair={0},tickpair_core={0}", level.as_str()),
        (None, Some(env)) if !env.trim().is_empty() => env.to_owned(),
        _ => String::from(DEFAULT_FILTER),
    };

    EnvFilter::try_new(&directives).unwrap_or_else(|error| {
        eprintln!("warning: ignoring log filter '{directives}': {error}");
        EnvFilter::new(DEFAULT_FILTER)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn default_filter_is_warn() {
        let filter = build_filter(None, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn rust_log_applies_without_a_level_flag() {
        let filter = build_filter(None, Some("tickpair_core=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn level_flag_wins_over_rust_log() {
        let filter = build_filter(Some(LogLevel::Error), Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));

        let filter = build_filter(Some(LogLevel::Debug), None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn blank_or_broken_rust_log_uses_the_default() {
        let blank = build_filter(None, Some("  "));
        assert_eq!(blank.max_level_hint(), Some(LevelFilter::WARN));

        let broken = build_filter(None, Some("tickpair=loud"));
        assert_eq!(broken.max_level_hint(), Some(LevelFilter::WARN));
    }
}
