//! Non-fatal diagnostics raised while digesting options.
//!
//! Notices are recorded on the options tree so callers and tests can inspect
//! them, and are forwarded to the `log` facade when the current verbosity
//! allows. Verbosity is a value carried by the tree: `-v`/`-q` only affect
//! notices raised after them.

use serde::Serialize;

/// What a notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// A deprecated option was used
    Deprecated,
    /// A removed option was used and skipped
    Unsupported,
    /// A named profile was not found and the default was used instead
    ProfileFallback,
    /// A zoom factor was outside the allowed range
    ZoomClamped,
    /// An option was repeated for the same window and ignored
    DuplicateOption,
    /// A launcher environment variable was malformed or missing
    Environment,
}

/// How chatty a notice is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Shown at the default verbosity
    Normal = 1,
    /// Only shown with `--verbose`
    Detail = 2,
}

/// A recorded non-fatal diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub level: NoticeLevel,
    pub message: String,
}

/// Diagnostic verbosity: 0 is quiet, 1 the default, 2+ verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Verbosity(pub u8);

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity(1)
    }
}

impl Verbosity {
    pub fn increase(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn silence(&mut self) {
        self.0 = 0;
    }

    /// Whether notices of `level` should be emitted
    pub fn allows(self, level: NoticeLevel) -> bool {
        self.0 >= level as u8
    }
}

/// Record-and-emit sink for notices
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    pub verbosity: Verbosity,
    pub notices: Vec<Notice>,
}

impl Diagnostics {
    pub fn notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.push(kind, NoticeLevel::Normal, message.into());
    }

    pub fn detail(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.push(kind, NoticeLevel::Detail, message.into());
    }

    fn push(&mut self, kind: NoticeKind, level: NoticeLevel, message: String) {
        if self.verbosity.allows(level) {
            log::warn!("{message}");
        } else {
            log::debug!("suppressed notice: {message}");
        }
        self.notices.push(Notice {
            kind,
            level,
            message,
        });
    }

    /// Notices of the given kind, in the order they were raised
    pub fn of_kind(&self, kind: NoticeKind) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| n.kind == kind)
    }
}
