//! Shared integration test helpers for term-launch.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{TestContext, args};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers is used per file.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use term_launch::options::{LaunchEnvironment, OptionError, ParseContext, TerminalOptions, parse};
use term_launch::profile::{Profile, ProfileManager};
use term_launch_config::Config;
use uuid::Uuid;

/// Fixed id of the "Default" test profile
pub const DEFAULT_PROFILE_ID: &str = "5a1b3c2d-0000-4000-8000-000000000001";
/// Fixed id of the "Work" test profile
pub const WORK_PROFILE_ID: &str = "5a1b3c2d-0000-4000-8000-000000000002";

/// Build an owned argument list
pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// A profile store with "Default" (the default) and "Work"
pub fn test_profiles() -> ProfileManager {
    let id = |s: &str| Uuid::parse_str(s).expect("valid test uuid");
    ProfileManager::from_profiles(vec![
        Profile::with_id(id(DEFAULT_PROFILE_ID), "Default")
            .as_default()
            .order(0),
        Profile::with_id(id(WORK_PROFILE_ID), "Work").order(1),
    ])
}

/// Everything a parse needs, with a fixed environment
pub struct TestContext {
    pub env: LaunchEnvironment,
    pub profiles: ProfileManager,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            env: LaunchEnvironment::default().with_current_dir("/home/tester"),
            profiles: test_profiles(),
            config: Config::default(),
        }
    }

    pub fn with_profiles(mut self, profiles: ProfileManager) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn ctx(&self) -> ParseContext<'_> {
        ParseContext::new(&self.env, &self.profiles, &self.config)
    }

    pub fn parse(&self, list: &[&str]) -> Result<TerminalOptions, OptionError> {
        parse(&args(list), &self.ctx())
    }
}

/// Write a session document into a fresh temp dir.
///
/// The `TempDir` must be kept alive while the file is in use.
pub fn write_session(contents: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.conf");
    fs::write(&path, contents).expect("Failed to write session file");
    (path, temp_dir)
}

/// A minimal valid document with one window of the given terminal groups
pub fn one_window_document(terminals: &str, extra: &str) -> String {
    format!(
        "[Terminal Configuration]\nVersion=1\nCompatVersion=1\nWindows=Window0;\n\n\
         [Window0]\nTerminals={terminals}\n\n{extra}"
    )
}
