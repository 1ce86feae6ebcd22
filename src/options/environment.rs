//! Process environment consulted once at the start of a parse.
//!
//! The engine itself never reads the environment: callers capture a
//! [`LaunchEnvironment`] (usually with [`LaunchEnvironment::from_process`])
//! and tests build one by hand.

use super::diagnostics::NoticeKind;
use super::model::{GlobalDefaults, TerminalOptions};
use super::validate::{is_object_path, is_unique_bus_name};

/// Startup notification id handed over by the desktop
pub const STARTUP_ID_VAR: &str = "DESKTOP_STARTUP_ID";
/// Bus name of the terminal server that spawned this launcher
pub const SERVICE_NAME_VAR: &str = "TERM_LAUNCH_SERVICE";
/// Object path of the terminal screen that spawned this launcher
pub const SCREEN_PATH_VAR: &str = "TERM_LAUNCH_SCREEN";

/// Snapshot of the environment values the options engine uses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchEnvironment {
    pub current_dir: Option<String>,
    pub startup_id: Option<String>,
    pub service_name: Option<String>,
    pub screen_path: Option<String>,
}

impl LaunchEnvironment {
    pub fn from_process() -> Self {
        let current_dir = std::env::current_dir()
            .ok()
            .map(|p| p.to_string_lossy().into_owned());
        Self {
            current_dir,
            startup_id: std::env::var(STARTUP_ID_VAR).ok(),
            service_name: std::env::var(SERVICE_NAME_VAR).ok(),
            screen_path: std::env::var(SCREEN_PATH_VAR).ok(),
        }
    }

    /// Builder: set the current directory
    pub fn with_current_dir(mut self, dir: impl Into<String>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl TerminalOptions {
    /// An empty options tree seeded from the environment.
    ///
    /// Malformed launcher variables are reported as notices and ignored; an
    /// empty startup id counts as unset.
    pub fn from_environment(env: &LaunchEnvironment) -> Self {
        let mut options =
            TerminalOptions::with_defaults(GlobalDefaults::new(env.current_dir.clone()));
        options.startup_id = env.startup_id.clone().filter(|id| !id.is_empty());

        if let Some(name) = &env.service_name {
            if is_unique_bus_name(name) {
                options.server_unique_name = Some(name.clone());
            } else {
                options.diagnostics.notice(
                    NoticeKind::Environment,
                    format!("{SERVICE_NAME_VAR} set but “{name}” is not a unique bus name"),
                );
            }
        }

        if let Some(path) = &env.screen_path {
            if is_object_path(path) {
                options.parent_screen_object_path = Some(path.clone());
            } else {
                options.diagnostics.notice(
                    NoticeKind::Environment,
                    format!("{SCREEN_PATH_VAR} set but “{path}” is not a valid object path"),
                );
            }
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_environment_is_copied() {
        let env = LaunchEnvironment {
            current_dir: Some("/home/user".to_string()),
            startup_id: Some("launcher-42_TIME123".to_string()),
            service_name: Some(":1.7".to_string()),
            screen_path: Some("/org/example/screen/1".to_string()),
        };
        let options = TerminalOptions::from_environment(&env);

        assert_eq!(options.defaults.working_dir.as_deref(), Some("/home/user"));
        assert_eq!(options.startup_id.as_deref(), Some("launcher-42_TIME123"));
        assert_eq!(options.server_unique_name.as_deref(), Some(":1.7"));
        assert_eq!(
            options.parent_screen_object_path.as_deref(),
            Some("/org/example/screen/1")
        );
        assert!(options.diagnostics.notices.is_empty());
        assert!(options.windows().is_empty());
    }

    #[test]
    fn test_malformed_values_are_ignored_with_notice() {
        let env = LaunchEnvironment {
            startup_id: Some(String::new()),
            service_name: Some("not a bus name".to_string()),
            screen_path: Some("relative/path".to_string()),
            ..LaunchEnvironment::default()
        };
        let options = TerminalOptions::from_environment(&env);

        assert_eq!(options.startup_id, None);
        assert_eq!(options.server_unique_name, None);
        assert_eq!(options.parent_screen_object_path, None);
        assert_eq!(
            options.diagnostics.of_kind(NoticeKind::Environment).count(),
            2
        );
    }
}
