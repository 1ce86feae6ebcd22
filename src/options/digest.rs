//! Applies option events to the options tree, one at a time, left to right.
//!
//! Window options act on the most recently opened window and terminal
//! options on its most recent tab. Before any window exists they set the
//! defaults for windows and tabs opened later instead. `--wait`, `--fd` and
//! `--active` have no default form and open an implicit first window.

use super::diagnostics::NoticeKind;
use super::error::OptionError;
use super::merge;
use super::model::{MenubarState, SourceTag, TabSpec, TerminalOptions, Zoom};
use super::registry::OptionId;
use super::tokenizer::OptionEvent;
use super::validate::{self, ZoomClamp};
use crate::profile::ProfileResolver;
use crate::shell::split_command_line;
use std::path::Path;
use term_launch_config::Config;

/// The deprecation message for `--command`/`-e`/`--execute`/`-x`
pub(crate) fn deprecated_command_message(option: &str) -> String {
    format!(
        "Option “{option}” is deprecated and might be removed in a later version. \
         Use “-- ” to terminate the options and put the command line to execute after it."
    )
}

/// Stateful event sink over one options tree
pub struct Digester<'a> {
    options: &'a mut TerminalOptions,
    profiles: &'a dyn ProfileResolver,
    config: &'a Config,
}

impl<'a> Digester<'a> {
    pub fn new(
        options: &'a mut TerminalOptions,
        profiles: &'a dyn ProfileResolver,
        config: &'a Config,
    ) -> Self {
        Self {
            options,
            profiles,
            config,
        }
    }

    /// Apply a sequence of events, stopping at the first error.
    pub fn digest_all<'e>(
        &mut self,
        events: impl IntoIterator<Item = &'e OptionEvent>,
    ) -> Result<(), OptionError> {
        for event in events {
            self.digest(event)?;
        }
        Ok(())
    }

    /// Apply one event.
    pub fn digest(&mut self, event: &OptionEvent) -> Result<(), OptionError> {
        log::trace!("digest {} {:?}", event.name, event.value);
        let name = event.name.as_str();

        match event.id {
            OptionId::AppId => {
                let value = required(event)?;
                if !validate::is_valid_app_id(value) {
                    return Err(OptionError::bad_value(
                        name,
                        format!("\"{value}\" is not a valid application ID"),
                    ));
                }
                self.options.app_id = Some(value.to_string());
            }
            OptionId::DisableFactory => {
                return Err(OptionError::UnsupportedOption {
                    option: name.to_string(),
                });
            }
            OptionId::SaveConfig | OptionId::UseFactory => {
                self.options.diagnostics.notice(
                    NoticeKind::Unsupported,
                    format!("Option “{name}” is no longer supported"),
                );
            }
            OptionId::LoadConfig => self.load_config(required(event)?, SourceTag::Default)?,
            OptionId::SmClientStateFile => {
                self.load_config(required(event)?, SourceTag::Session)?
            }
            OptionId::Preferences => self.options.show_preferences = true,
            OptionId::PrintEnvironment => self.options.print_environment = true,
            OptionId::Version => self.options.show_version = true,
            OptionId::Verbose => self.options.diagnostics.verbosity.increase(),
            OptionId::Quiet => self.options.diagnostics.verbosity.silence(),

            OptionId::Window => {
                self.options.add_window(None, false);
            }
            OptionId::WindowWithProfile => {
                let profile = self.resolve_named(name, required(event)?)?;
                self.options.add_window(Some(profile), false);
            }
            OptionId::WindowWithProfileInternalId => {
                let profile = self.resolve_strict(name, required(event)?)?;
                self.options.add_window(Some(profile), false);
            }
            OptionId::Tab => self.add_tab(None),
            OptionId::TabWithProfile => {
                let profile = self.resolve_named(name, required(event)?)?;
                self.add_tab(Some(profile));
            }
            OptionId::TabWithProfileInternalId => {
                let profile = self.resolve_strict(name, required(event)?)?;
                self.add_tab(Some(profile));
            }

            OptionId::ShowMenubar => self.set_menubar(name, MenubarState::Shown),
            OptionId::HideMenubar => self.set_menubar(name, MenubarState::Hidden),
            OptionId::Maximize => match self.options.current_window_mut() {
                Some(window) => window.maximized = true,
                None => self.options.defaults.maximize = true,
            },
            OptionId::FullScreen => match self.options.current_window_mut() {
                Some(window) => window.fullscreen = true,
                None => self.options.defaults.fullscreen = true,
            },
            OptionId::Geometry => {
                let geometry = Some(required(event)?.to_string());
                match self.options.current_window_mut() {
                    Some(window) => window.geometry = geometry,
                    None => self.options.defaults.geometry = geometry,
                }
            }
            OptionId::Role => self.set_role(name, required(event)?)?,
            OptionId::Active => self.options.ensure_top_tab().active = true,

            OptionId::Command => self.set_command(name, required(event)?)?,
            OptionId::Profile => {
                let profile = self.resolve_named(name, required(event)?)?;
                self.set_profile(profile);
            }
            OptionId::ProfileId => {
                let profile = self.resolve_strict(name, required(event)?)?;
                self.set_profile(profile);
            }
            OptionId::Title => {
                let title = Some(required(event)?.to_string());
                match self.options.current_tab_mut() {
                    Some(tab) => tab.title = title,
                    None => self.options.defaults.title = title,
                }
            }
            OptionId::WorkingDirectory => {
                let dir = Some(required(event)?.to_string());
                match self.options.current_tab_mut() {
                    Some(tab) => tab.working_dir = dir,
                    None => self.options.defaults.working_dir = dir,
                }
            }
            OptionId::Wait => {
                if self.options.any_wait {
                    return Err(OptionError::duplicate(name, "Can only use --wait once"));
                }
                self.options.any_wait = true;
                self.options.ensure_top_tab().wait = true;
            }
            OptionId::Fd => self.pass_fd(name, required(event)?)?,
            OptionId::Zoom => self.set_zoom(name, required(event)?)?,

            OptionId::DefaultWorkingDirectory => {
                self.options.defaults.working_dir = Some(required(event)?.to_string());
            }
            OptionId::StartupId => self.options.startup_id = Some(required(event)?.to_string()),
            OptionId::SmClientDisable | OptionId::SmDisable => {
                self.options.sm_client_disable = true
            }
            OptionId::SmClientId => self.options.sm_client_id = Some(required(event)?.to_string()),
            OptionId::SmConfigPrefix => {
                self.options.sm_config_prefix = Some(required(event)?.to_string())
            }
        }

        Ok(())
    }

    fn load_config(&mut self, path: &str, source: SourceTag) -> Result<(), OptionError> {
        merge::load_config_file(self.options, Path::new(path), source).map(|_| ())
    }

    fn add_tab(&mut self, profile: Option<String>) {
        match self.options.current_window_mut() {
            Some(window) => {
                window.push_tab(TabSpec::new(profile));
            }
            None => {
                self.options.add_window(profile, true);
            }
        }
    }

    /// Resolve a profile by name, falling back to the default profile when
    /// the name is unknown.
    fn resolve_named(&mut self, option: &str, name: &str) -> Result<String, OptionError> {
        match self.profiles.resolve(Some(name)) {
            Ok(id) => Ok(id),
            Err(err) if err.is_not_found() => {
                self.options.diagnostics.notice(
                    NoticeKind::ProfileFallback,
                    format!(
                        "Profile “{name}” specified but not found. \
                         Attempting to fall back to the default profile."
                    ),
                );
                self.profiles
                    .resolve(None)
                    .map_err(|source| profile_error(option, source))
            }
            Err(source) => Err(profile_error(option, source)),
        }
    }

    fn resolve_strict(&self, option: &str, id: &str) -> Result<String, OptionError> {
        self.profiles
            .resolve_id(id)
            .map_err(|source| profile_error(option, source))
    }

    fn set_profile(&mut self, profile: String) {
        match self.options.current_tab_mut() {
            Some(tab) => tab.profile = Some(profile),
            None => self.options.defaults.profile = Some(profile),
        }
    }

    fn set_role(&mut self, option: &str, role: &str) -> Result<(), OptionError> {
        let slot = match self.options.current_window_mut() {
            Some(window) => &mut window.role,
            None => &mut self.options.defaults.role,
        };
        if slot.is_some() {
            return Err(OptionError::duplicate(option, "Two roles given for one window"));
        }
        *slot = Some(role.to_string());
        Ok(())
    }

    /// Force the menubar state of the current window.
    ///
    /// A window's forced state is never overwritten: repeating the same
    /// state is a verbose-only notice, the opposite state a normal one.
    /// Before any window exists the last request wins.
    fn set_menubar(&mut self, option: &str, state: MenubarState) {
        let Some(window) = self.options.current_window_mut() else {
            self.options.defaults.menubar = Some(state);
            return;
        };
        let existing = window.menubar;
        match existing {
            None => window.menubar = Some(state),
            Some(existing) if existing == state => self.options.diagnostics.detail(
                NoticeKind::DuplicateOption,
                format!("“{option}” option given twice for the same window"),
            ),
            Some(existing) => self.options.diagnostics.notice(
                NoticeKind::DuplicateOption,
                format!(
                    "“{option}” ignored: “{}” was already given for the same window",
                    existing.option_name()
                ),
            ),
        }
    }

    fn set_command(&mut self, option: &str, value: &str) -> Result<(), OptionError> {
        self.options
            .diagnostics
            .notice(NoticeKind::Deprecated, deprecated_command_message(option));

        let argv = split_command_line(value).map_err(|e| {
            OptionError::bad_value(
                option,
                format!("Argument to “--command/-e” is not a valid command: {e}"),
            )
        })?;

        match self.options.current_tab_mut() {
            Some(tab) => tab.exec_argv = Some(argv),
            None => self.options.exec_argv = Some(argv),
        }
        Ok(())
    }

    fn pass_fd(&mut self, option: &str, value: &str) -> Result<(), OptionError> {
        let fd = validate::parse_fd(option, value)?;
        let pass = self
            .options
            .ensure_top_tab()
            .add_fd_pass(fd)
            .ok_or_else(|| OptionError::bad_value(option, format!("Cannot pass FD {fd} twice")))?;
        log::debug!("forwarding fd {} as index {}", pass.fd, pass.index);
        Ok(())
    }

    fn set_zoom(&mut self, option: &str, value: &str) -> Result<(), OptionError> {
        let zoom = validate::parse_zoom(value).ok_or_else(|| {
            OptionError::bad_value(option, format!("“{value}” is not a valid zoom factor"))
        })?;

        let clamped = validate::clamp_zoom(zoom, self.config.zoom_minimum, self.config.zoom_maximum);
        match clamped {
            ZoomClamp::InRange(_) => {}
            ZoomClamp::TooSmall(min) => self.options.diagnostics.notice(
                NoticeKind::ZoomClamped,
                format!("Zoom factor “{zoom}” is too small, using {min}"),
            ),
            ZoomClamp::TooLarge(max) => self.options.diagnostics.notice(
                NoticeKind::ZoomClamped,
                format!("Zoom factor “{zoom}” is too large, using {max}"),
            ),
        }

        let zoom = Zoom::explicit(clamped.value());
        match self.options.current_tab_mut() {
            Some(tab) => tab.zoom = zoom,
            None => self.options.defaults.zoom = zoom,
        }
        Ok(())
    }
}

fn required(event: &OptionEvent) -> Result<&str, OptionError> {
    event
        .value
        .as_deref()
        .ok_or_else(|| OptionError::MissingValue {
            option: event.name.clone(),
        })
}

fn profile_error(option: &str, source: crate::profile::ProfileError) -> OptionError {
    OptionError::Profile {
        option: option.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::diagnostics::NoticeLevel;
    use crate::options::error::ErrorKind;
    use crate::profile::{Profile, ProfileManager};

    fn event(id: OptionId, name: &str, value: Option<&str>) -> OptionEvent {
        OptionEvent {
            id,
            name: name.to_string(),
            value: value.map(str::to_string),
        }
    }

    fn run(events: &[OptionEvent]) -> Result<TerminalOptions, OptionError> {
        let profiles = ProfileManager::from_profiles(vec![Profile::new("Default").as_default()]);
        let config = Config::default();
        let mut options = TerminalOptions::default();
        Digester::new(&mut options, &profiles, &config).digest_all(events)?;
        Ok(options)
    }

    #[test]
    fn test_window_flags_before_window_set_defaults() {
        let options = run(&[
            event(OptionId::Maximize, "--maximize", None),
            event(OptionId::Geometry, "--geometry", Some("80x24")),
            event(OptionId::Title, "--title", Some("t")),
        ])
        .unwrap();
        assert!(options.windows().is_empty());
        assert!(options.defaults.maximize);
        assert_eq!(options.defaults.geometry.as_deref(), Some("80x24"));
        assert_eq!(options.defaults.title.as_deref(), Some("t"));
    }

    #[test]
    fn test_tab_without_window_is_implicit() {
        let options = run(&[
            event(OptionId::Tab, "--tab", None),
            event(OptionId::Tab, "--tab", None),
        ])
        .unwrap();
        assert_eq!(options.windows().len(), 1);
        assert!(options.windows()[0].implicit_first_window);
        assert_eq!(options.windows()[0].tabs().len(), 2);
    }

    #[test]
    fn test_role_on_defaults_then_window_is_duplicate() {
        let err = run(&[
            event(OptionId::Role, "--role", Some("a")),
            event(OptionId::Window, "--window", None),
            event(OptionId::Role, "--role", Some("b")),
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateOption);
        assert_eq!(err.to_string(), "Two roles given for one window");
    }

    #[test]
    fn test_menubar_conflict_keeps_first_state() {
        let options = run(&[
            event(OptionId::Window, "--window", None),
            event(OptionId::HideMenubar, "--hide-menubar", None),
            event(OptionId::ShowMenubar, "--show-menubar", None),
            event(OptionId::HideMenubar, "--hide-menubar", None),
        ])
        .unwrap();
        assert_eq!(options.windows()[0].menubar, Some(MenubarState::Hidden));
        let notices: Vec<_> = options
            .diagnostics
            .of_kind(NoticeKind::DuplicateOption)
            .collect();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Normal);
        assert_eq!(notices[1].level, NoticeLevel::Detail);
    }

    #[test]
    fn test_menubar_default_last_wins_and_is_consumed_once() {
        let options = run(&[
            event(OptionId::ShowMenubar, "--show-menubar", None),
            event(OptionId::HideMenubar, "--hide-menubar", None),
            event(OptionId::Window, "--window", None),
            event(OptionId::Window, "--window", None),
        ])
        .unwrap();
        assert_eq!(options.windows()[0].menubar, Some(MenubarState::Hidden));
        assert_eq!(options.windows()[1].menubar, None);
    }

    #[test]
    fn test_command_before_window_is_pending() {
        let options = run(&[event(OptionId::Command, "-e", Some("top -d 1"))]).unwrap();
        assert!(options.windows().is_empty());
        assert_eq!(
            options.exec_argv,
            Some(vec!["top".to_string(), "-d".to_string(), "1".to_string()])
        );
        assert_eq!(options.diagnostics.of_kind(NoticeKind::Deprecated).count(), 1);
    }

    #[test]
    fn test_command_with_bad_quoting() {
        let err = run(&[event(OptionId::Command, "--command", Some("echo 'oops"))]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadValue);
        assert!(err.to_string().starts_with("Argument to “--command/-e” is not a valid command"));
    }

    #[test]
    fn test_disable_factory_is_fatal_save_config_is_not() {
        let err = run(&[event(OptionId::DisableFactory, "--disable-factory", None)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOption);

        let options = run(&[event(OptionId::SaveConfig, "--save-config", Some("x"))]).unwrap();
        assert_eq!(options.diagnostics.of_kind(NoticeKind::Unsupported).count(), 1);
    }

    #[test]
    fn test_zoom_targets_tab_or_defaults() {
        let options = run(&[
            event(OptionId::Zoom, "--zoom", Some("2")),
            event(OptionId::Window, "--window", None),
            event(OptionId::Zoom, "--zoom", Some("10")),
        ])
        .unwrap();
        assert_eq!(options.defaults.zoom, Zoom::explicit(2.0));
        assert_eq!(options.windows()[0].tabs()[0].zoom, Zoom::explicit(4.0));
        assert_eq!(options.diagnostics.of_kind(NoticeKind::ZoomClamped).count(), 1);
    }

    #[test]
    fn test_verbosity_flags() {
        let options = run(&[
            event(OptionId::Verbose, "-v", None),
            event(OptionId::Verbose, "--verbose", None),
        ])
        .unwrap();
        assert_eq!(options.diagnostics.verbosity.0, 3);

        let options = run(&[
            event(OptionId::Verbose, "-v", None),
            event(OptionId::Quiet, "-q", None),
        ])
        .unwrap();
        assert_eq!(options.diagnostics.verbosity.0, 0);
    }

    #[test]
    fn test_app_id_validation() {
        let options = run(&[event(OptionId::AppId, "--app-id", Some("org.example.Term"))]).unwrap();
        assert_eq!(options.app_id.as_deref(), Some("org.example.Term"));

        let err = run(&[event(OptionId::AppId, "--app-id", Some("nodots"))]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadValue);
        assert_eq!(err.option(), Some("--app-id"));
    }

    #[test]
    fn test_session_manager_values() {
        let options = run(&[
            event(OptionId::SmDisable, "--sm-disable", None),
            event(OptionId::SmClientId, "--sm-client-id", Some("abc")),
            event(OptionId::SmConfigPrefix, "--sm-config-prefix", Some("/p/")),
            event(OptionId::StartupId, "--startup-id", Some("sid")),
        ])
        .unwrap();
        assert!(options.sm_client_disable);
        assert_eq!(options.sm_client_id.as_deref(), Some("abc"));
        assert_eq!(options.sm_config_prefix.as_deref(), Some("/p/"));
        assert_eq!(options.startup_id.as_deref(), Some("sid"));
    }
}
