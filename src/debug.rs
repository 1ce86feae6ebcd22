//! Logging setup for term-launch.
//!
//! All `log::*!` output goes to stderr, one record per line, prefixed with
//! `# ` so it never mixes with the tree printed on stdout.
//!
//! Level precedence: `--log-level` on the command line, then `RUST_LOG`,
//! then the `log_level` setting of the config file (applied once the config
//! has been loaded).

use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

struct LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = if record.level() <= log::Level::Warn {
            writeln!(stderr, "# {}", record.args())
        } else {
            writeln!(
                stderr,
                "# [{:<5}] [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static BRIDGE: LogBridge = LogBridge;
static INITIALIZED: OnceLock<()> = OnceLock::new();
/// Set when the CLI or RUST_LOG fixed the level; the config may not lower it
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

/// Parse a `RUST_LOG` value holding a plain level name.
///
/// Directive syntax (`crate=level`) is not supported; only the last bare
/// level in a comma-separated list counts.
fn parse_rust_log(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .rev()
        .map(str::trim)
        .filter(|part| !part.contains('='))
        .find_map(|part| part.parse::<LevelFilter>().ok())
}

/// Install the stderr bridge and set the starting level.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    INITIALIZED.get_or_init(|| {
        // Fails only if another logger was installed first; keep that one.
        let _ = log::set_logger(&BRIDGE);
    });

    let env_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| parse_rust_log(&v));

    match cli_level.or(env_level) {
        Some(level) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            log::set_max_level(level);
        }
        None => log::set_max_level(LevelFilter::Warn),
    }
}

/// Apply the config file's level unless the CLI or `RUST_LOG` already chose one.
pub fn apply_config_level(level: LevelFilter) {
    if LEVEL_PINNED.load(Ordering::Relaxed) {
        log::debug!("Ignoring config log level {level}: overridden");
        return;
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rust_log() {
        assert_eq!(parse_rust_log("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_rust_log("INFO"), Some(LevelFilter::Info));
        assert_eq!(parse_rust_log("warn,term_launch=trace"), Some(LevelFilter::Warn));
        assert_eq!(parse_rust_log("term_launch=trace"), None);
        assert_eq!(parse_rust_log("nonsense"), None);
    }
}
