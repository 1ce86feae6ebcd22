//! Merges a saved terminal configuration document into the options tree.
//!
//! A document lists windows, each window lists its terminals, and every
//! window or terminal is a group of its own:
//!
//! ```text
//! [Terminal Configuration]
//! Version=1
//! CompatVersion=1
//! Windows=Window0;
//!
//! [Window0]
//! Terminals=Terminal0;Terminal1;
//! ActiveTerminal=Terminal1
//! MenubarVisible=false
//!
//! [Terminal0]
//! ProfileID=b1dcc9dd-5262-4d8d-a863-c897e6d979b9
//! WorkingDirectory=/home/user/src
//! Command=htop
//! ```
//!
//! Merging is all-or-nothing: the tree is only touched once the whole
//! document has been read.

use super::error::OptionError;
use super::model::{
    MenubarState, SourceTag, TabSpec, TerminalOptions, WindowSpec, apply_defaults,
};
use crate::keyfile::{KeyFile, KeyFileError, compress};
use crate::shell::split_command_line;
use std::path::Path;
use term_launch_config::CONFIG_COMPAT_VERSION;

pub const CONFIG_GROUP: &str = "Terminal Configuration";
pub const PROP_VERSION: &str = "Version";
pub const PROP_COMPAT_VERSION: &str = "CompatVersion";
pub const PROP_WINDOWS: &str = "Windows";

pub const WINDOW_PROP_TERMINALS: &str = "Terminals";
pub const WINDOW_PROP_ACTIVE_TERMINAL: &str = "ActiveTerminal";
pub const WINDOW_PROP_ROLE: &str = "Role";
pub const WINDOW_PROP_GEOMETRY: &str = "Geometry";
pub const WINDOW_PROP_FULLSCREEN: &str = "Fullscreen";
pub const WINDOW_PROP_MAXIMIZED: &str = "Maximized";
pub const WINDOW_PROP_MENUBAR_VISIBLE: &str = "MenubarVisible";

pub const TERMINAL_PROP_PROFILE_ID: &str = "ProfileID";
pub const TERMINAL_PROP_WORKING_DIRECTORY: &str = "WorkingDirectory";
pub const TERMINAL_PROP_TITLE: &str = "Title";
pub const TERMINAL_PROP_COMMAND: &str = "Command";

/// Read, parse and merge the document at `path`.
///
/// Returns the number of windows added.
pub fn load_config_file(
    options: &mut TerminalOptions,
    path: &Path,
    source: SourceTag,
) -> Result<usize, OptionError> {
    let bytes = std::fs::read(path).map_err(|source| OptionError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| OptionError::InvalidConfigFormat {
        message: format!("{} is not valid UTF-8: {e}", path.display()),
    })?;
    let doc = KeyFile::parse(&text).map_err(invalid_format)?;
    log::info!("Merging {:?} terminal config from {}", source, path.display());
    merge_config(options, &doc, source)
}

/// Append the windows described by `doc` to the options tree.
///
/// Each window goes through the pending defaults exactly like a window
/// opened on the command line. Windows whose terminal list is missing or
/// empty are skipped. On error the tree is left unchanged.
pub fn merge_config(
    options: &mut TerminalOptions,
    doc: &KeyFile,
    source: SourceTag,
) -> Result<usize, OptionError> {
    if !doc.has_group(CONFIG_GROUP) {
        return Err(OptionError::InvalidConfigFormat {
            message: format!("missing “{CONFIG_GROUP}” group"),
        });
    }

    let version = integer_or_zero(doc, PROP_VERSION);
    let compat_version = integer_or_zero(doc, PROP_COMPAT_VERSION);
    if version <= 0 || compat_version <= 0 || compat_version > CONFIG_COMPAT_VERSION {
        return Err(OptionError::IncompatibleConfigVersion {
            version,
            compat_version,
        });
    }

    let window_groups = doc
        .get_string_list(CONFIG_GROUP, PROP_WINDOWS)
        .map_err(invalid_format)?
        .ok_or_else(|| OptionError::InvalidConfigFormat {
            message: format!("missing “{PROP_WINDOWS}” key"),
        })?;

    let mut defaults = options.defaults.clone();
    let mut windows = Vec::with_capacity(window_groups.len());

    for group in &window_groups {
        let terminal_groups = match doc.get_string_list(group, WINDOW_PROP_TERMINALS) {
            Ok(Some(list)) if !list.is_empty() => list,
            Ok(_) => {
                log::debug!("Skipping window “{group}”: no terminals");
                continue;
            }
            Err(e) => {
                log::debug!("Skipping window “{group}”: {e}");
                continue;
            }
        };
        let active = optional_string(doc, group, WINDOW_PROP_ACTIVE_TERMINAL);

        let mut tabs = terminal_groups
            .iter()
            .map(|terminal| read_tab(doc, terminal, active.as_deref()))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();
        let Some(first) = tabs.next() else {
            continue;
        };
        let mut window = WindowSpec::new(source, first);
        for tab in tabs {
            window.push_tab(tab);
        }

        let mut window = apply_defaults(&mut defaults, window);
        if let Some(role) = optional_string(doc, group, WINDOW_PROP_ROLE) {
            window.role = Some(role);
        }
        if let Some(geometry) = optional_string(doc, group, WINDOW_PROP_GEOMETRY) {
            window.geometry = Some(geometry);
        }
        window.fullscreen |= boolean_or_false(doc, group, WINDOW_PROP_FULLSCREEN);
        window.maximized |= boolean_or_false(doc, group, WINDOW_PROP_MAXIMIZED);
        if doc.has_key(group, WINDOW_PROP_MENUBAR_VISIBLE) {
            let visible = boolean_or_false(doc, group, WINDOW_PROP_MENUBAR_VISIBLE);
            window.menubar = Some(MenubarState::from_visible(visible));
        }

        windows.push(window);
    }

    let added = windows.len();
    log::debug!("Merged {added} window(s) of {}", window_groups.len());
    options.defaults = defaults;
    options.append_windows(windows);
    Ok(added)
}

fn read_tab(doc: &KeyFile, group: &str, active: Option<&str>) -> Result<TabSpec, OptionError> {
    let mut tab = TabSpec::new(optional_string(doc, group, TERMINAL_PROP_PROFILE_ID));
    tab.title = optional_string(doc, group, TERMINAL_PROP_TITLE);
    tab.working_dir =
        optional_string(doc, group, TERMINAL_PROP_WORKING_DIRECTORY).map(|dir| compress(&dir));
    tab.active = active == Some(group);

    let command = doc
        .get_string(group, TERMINAL_PROP_COMMAND)
        .map_err(|e| OptionError::bad_value(TERMINAL_PROP_COMMAND, e.to_string()))?;
    if let Some(command) = command {
        let argv = split_command_line(&compress(&command)).map_err(|e| {
            OptionError::bad_value(
                TERMINAL_PROP_COMMAND,
                format!("“{TERMINAL_PROP_COMMAND}” of “{group}” is not a valid command: {e}"),
            )
        })?;
        tab.exec_argv = Some(argv);
    }

    Ok(tab)
}

fn invalid_format(err: KeyFileError) -> OptionError {
    OptionError::InvalidConfigFormat {
        message: err.to_string(),
    }
}

fn optional_string(doc: &KeyFile, group: &str, key: &str) -> Option<String> {
    doc.get_string(group, key).unwrap_or_else(|e| {
        log::debug!("Ignoring {key} in “{group}”: {e}");
        None
    })
}

fn boolean_or_false(doc: &KeyFile, group: &str, key: &str) -> bool {
    doc.get_boolean(group, key)
        .unwrap_or_else(|e| {
            log::debug!("Treating {key} in “{group}” as false: {e}");
            None
        })
        .unwrap_or(false)
}

fn integer_or_zero(doc: &KeyFile, key: &str) -> i64 {
    doc.get_integer(CONFIG_GROUP, key)
        .ok()
        .flatten()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::error::ErrorKind;
    use crate::options::model::GlobalDefaults;

    fn doc(text: &str) -> KeyFile {
        KeyFile::parse(text).unwrap()
    }

    #[test]
    fn test_merge_reads_windows_and_tabs() {
        let doc = doc("[Terminal Configuration]\n\
             Version=1\nCompatVersion=1\nWindows=W0;\n\
             [W0]\nTerminals=T0;T1;\nActiveTerminal=T1\nRole=main\nMaximized=true\n\
             [T0]\nProfileID=abc\nTitle=first\nWorkingDirectory=/tmp/with\\\\040space\n\
             [T1]\nCommand=htop -d 5\n");
        let mut options = TerminalOptions::default();
        assert_eq!(merge_config(&mut options, &doc, SourceTag::Session).unwrap(), 1);

        let window = &options.windows()[0];
        assert_eq!(window.source, SourceTag::Session);
        assert_eq!(window.role.as_deref(), Some("main"));
        assert!(window.maximized);
        assert_eq!(window.menubar, None);

        let tabs = window.tabs();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].profile.as_deref(), Some("abc"));
        assert_eq!(tabs[0].title.as_deref(), Some("first"));
        assert_eq!(tabs[0].working_dir.as_deref(), Some("/tmp/with space"));
        assert!(!tabs[0].active);
        assert!(tabs[1].active);
        assert_eq!(
            tabs[1].exec_argv,
            Some(vec!["htop".to_string(), "-d".to_string(), "5".to_string()])
        );
    }

    #[test]
    fn test_missing_group_or_bad_version() {
        let mut options = TerminalOptions::default();
        let err = merge_config(&mut options, &doc("[Other]\nA=1\n"), SourceTag::Default)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfigFormat);

        for text in [
            "[Terminal Configuration]\nCompatVersion=1\nWindows=\n",
            "[Terminal Configuration]\nVersion=1\nCompatVersion=2\nWindows=\n",
            "[Terminal Configuration]\nVersion=abc\nCompatVersion=1\nWindows=\n",
        ] {
            let err = merge_config(&mut options, &doc(text), SourceTag::Default).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IncompatibleConfigVersion, "{text}");
        }
    }

    #[test]
    fn test_defaults_apply_and_failure_leaves_tree_untouched() {
        let mut options = TerminalOptions::with_defaults(GlobalDefaults {
            role: Some("pending".to_string()),
            ..GlobalDefaults::default()
        });

        let bad = doc("[Terminal Configuration]\nVersion=1\nCompatVersion=1\nWindows=W0;W1;\n\
             [W0]\nTerminals=T0;\n[W1]\nTerminals=T1;\n[T1]\nCommand=echo 'unterminated\n");
        let err = merge_config(&mut options, &bad, SourceTag::Default).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadValue);
        assert!(options.windows().is_empty());
        assert_eq!(options.defaults.role.as_deref(), Some("pending"));

        let good = doc("[Terminal Configuration]\nVersion=1\nCompatVersion=1\nWindows=W0;W1;\n\
             [W0]\nTerminals=T0;\n[W1]\nTerminals=T1;\n");
        merge_config(&mut options, &good, SourceTag::Default).unwrap();
        assert_eq!(options.windows()[0].role.as_deref(), Some("pending"));
        assert_eq!(options.windows()[1].role, None);
        assert_eq!(options.defaults.role, None);
    }

    #[test]
    fn test_empty_windows_are_skipped_and_menubar_read() {
        let doc = doc("[Terminal Configuration]\nVersion=2\nCompatVersion=1\nWindows=W0;W1;W2;\n\
             [W0]\nTerminals=\n\
             [W1]\nTerminals=T0;\nMenubarVisible=false\nFullscreen=maybe\n");
        let mut options = TerminalOptions::default();
        assert_eq!(merge_config(&mut options, &doc, SourceTag::Default).unwrap(), 1);
        let window = &options.windows()[0];
        assert_eq!(window.menubar, Some(MenubarState::Hidden));
        assert!(!window.fullscreen);
    }
}
