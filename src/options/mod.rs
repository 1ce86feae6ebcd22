//! Incremental digestion of launcher options into a tree of windows and tabs.
//!
//! A parse runs in stages:
//!
//! 1. [`prescan`] cuts the trailing command off the argument list
//! 2. [`tokenizer`] turns the rest into [`OptionEvent`]s
//! 3. [`Digester`] applies the events left to right to a [`TerminalOptions`]
//! 4. [`finalize()`] attaches the trailing command and guarantees a window
//!
//! Saved session documents are folded in by [`merge`] whenever a
//! `--load-config` or `--sm-client-state-file` option is digested.

pub mod diagnostics;
pub mod digest;
pub mod environment;
pub mod error;
pub mod finalize;
pub mod merge;
pub mod model;
pub mod parse;
pub mod prescan;
pub mod registry;
pub mod tokenizer;
pub mod validate;

pub use diagnostics::{Diagnostics, Notice, NoticeKind, NoticeLevel, Verbosity};
pub use digest::Digester;
pub use environment::LaunchEnvironment;
pub use error::{ErrorKind, OptionError};
pub use finalize::{ensure_window, finalize};
pub use merge::{load_config_file, merge_config};
pub use model::{
    Cursor, FdPass, GlobalDefaults, MenubarState, SourceTag, TabSpec, TerminalOptions, WindowSpec,
    Zoom, apply_defaults,
};
pub use parse::{ParseContext, parse, restore_session};
pub use registry::{OPTIONS, OptionDef, OptionId, help_text};
pub use tokenizer::OptionEvent;
