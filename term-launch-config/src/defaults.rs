//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field so partial config files stay valid.

// ── Zoom ───────────────────────────────────────────────────────────────────

pub fn zoom_minimum() -> f64 {
    0.25
}

pub fn zoom_maximum() -> f64 {
    4.0
}

// ── Startup behaviour ──────────────────────────────────────────────────────

pub fn new_terminal_mode() -> crate::types::NewTerminalMode {
    crate::types::NewTerminalMode::Window
}

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Warn
}
