//! The options tree: requested windows, their tabs, and the defaults that
//! apply to windows created later.
//!
//! Windows and tabs are only ever appended. The "current" window and tab are
//! always the last ones, addressed by index through [`Cursor`], so flags that
//! act on the most recent window never hold references into the tree.

use super::diagnostics::Diagnostics;
use serde::Serialize;

/// Where a window specification came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    /// Built from live command-line options
    CommandLine = 0,
    /// Merged from a document given with `--load-config`
    Default = 1,
    /// Merged from a session-manager state file
    Session = 2,
}

impl SourceTag {
    /// Numeric provenance code
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Forced menubar visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenubarState {
    Shown,
    Hidden,
}

impl MenubarState {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            MenubarState::Shown
        } else {
            MenubarState::Hidden
        }
    }

    /// The option that forces this state
    pub fn option_name(self) -> &'static str {
        match self {
            MenubarState::Shown => "--show-menubar",
            MenubarState::Hidden => "--hide-menubar",
        }
    }
}

/// A zoom factor and whether the user asked for it explicitly
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Zoom {
    pub factor: f64,
    pub explicit: bool,
}

impl Default for Zoom {
    fn default() -> Self {
        Self {
            factor: 1.0,
            explicit: false,
        }
    }
}

impl Zoom {
    pub fn explicit(factor: f64) -> Self {
        Self {
            factor,
            explicit: true,
        }
    }
}

/// An inherited file descriptor to hand to the child process.
///
/// `index` is the descriptor's position in the tab's forwarding list; `fd`
/// is the number the child should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FdPass {
    pub index: u32,
    pub fd: i32,
}

/// One requested terminal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabSpec {
    /// Resolved profile identifier; `None` means the default profile
    pub profile: Option<String>,
    /// Command to run instead of the profile's shell
    pub exec_argv: Option<Vec<String>>,
    pub title: Option<String>,
    pub working_dir: Option<String>,
    pub zoom: Zoom,
    pub active: bool,
    /// The launcher should wait for this terminal's child to exit
    pub wait: bool,
    fd_passes: Vec<FdPass>,
}

impl TabSpec {
    pub fn new(profile: Option<String>) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn fd_passes(&self) -> &[FdPass] {
        &self.fd_passes
    }

    pub fn forwards_fd(&self, fd: i32) -> bool {
        self.fd_passes.iter().any(|p| p.fd == fd)
    }

    /// Append a forwarded descriptor with the next local index.
    ///
    /// Returns `None` if `fd` is already forwarded by this tab.
    pub fn add_fd_pass(&mut self, fd: i32) -> Option<FdPass> {
        if self.forwards_fd(fd) {
            return None;
        }
        let pass = FdPass {
            index: self.fd_passes.len() as u32,
            fd,
        };
        self.fd_passes.push(pass);
        Some(pass)
    }
}

/// One requested window; always holds at least one tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSpec {
    tabs: Vec<TabSpec>,
    pub role: Option<String>,
    pub geometry: Option<String>,
    /// `None` leaves the menubar to the profile's preference
    pub menubar: Option<MenubarState>,
    pub fullscreen: bool,
    pub maximized: bool,
    /// Synthesized because tab options came before any window option
    pub implicit_first_window: bool,
    pub source: SourceTag,
}

impl WindowSpec {
    pub fn new(source: SourceTag, first_tab: TabSpec) -> Self {
        Self {
            tabs: vec![first_tab],
            role: None,
            geometry: None,
            menubar: None,
            fullscreen: false,
            maximized: false,
            implicit_first_window: false,
            source,
        }
    }

    pub fn tabs(&self) -> &[TabSpec] {
        &self.tabs
    }

    /// Append a tab and return its index
    pub fn push_tab(&mut self, tab: TabSpec) -> usize {
        self.tabs.push(tab);
        self.tabs.len() - 1
    }
}

/// Window and tab settings given before any window exists
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalDefaults {
    pub profile: Option<String>,
    pub working_dir: Option<String>,
    pub title: Option<String>,
    /// Moved into the next window created, then cleared
    pub role: Option<String>,
    pub geometry: Option<String>,
    /// Moved into the next window created, then cleared
    pub menubar: Option<MenubarState>,
    pub fullscreen: bool,
    pub maximize: bool,
    pub zoom: Zoom,
}

impl GlobalDefaults {
    pub fn new(working_dir: Option<String>) -> Self {
        Self {
            working_dir,
            ..Self::default()
        }
    }
}

/// Apply the window-level defaults to a freshly created window.
///
/// Called exactly once per window, at creation. The role and the forced
/// menubar state are consumed; later changes to `defaults` never reach
/// windows created earlier.
pub fn apply_defaults(defaults: &mut GlobalDefaults, mut window: WindowSpec) -> WindowSpec {
    if let Some(role) = defaults.role.take() {
        window.role = Some(role);
    }
    if window.geometry.is_none() {
        window.geometry = defaults.geometry.clone();
    }
    if let Some(state) = defaults.menubar.take() {
        window.menubar = Some(state);
    }
    window.fullscreen |= defaults.fullscreen;
    window.maximized |= defaults.maximize;
    window
}

/// Position of the current window and its current tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub window: usize,
    pub tab: usize,
}

/// The result of digesting a launcher command line
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TerminalOptions {
    windows: Vec<WindowSpec>,
    pub defaults: GlobalDefaults,

    /// Trailing command not yet attached to a tab
    pub exec_argv: Option<Vec<String>>,
    /// The trailing command came from the deprecated `--execute/-x`
    pub execute: bool,
    /// Some tab already requested `--wait`
    pub any_wait: bool,

    pub app_id: Option<String>,
    pub startup_id: Option<String>,
    pub show_preferences: bool,
    pub print_environment: bool,
    pub show_version: bool,

    pub sm_client_disable: bool,
    pub sm_client_id: Option<String>,
    pub sm_config_prefix: Option<String>,

    /// Bus name of the terminal server that launched us
    pub server_unique_name: Option<String>,
    /// Object path of the terminal screen that launched us
    pub parent_screen_object_path: Option<String>,

    pub diagnostics: Diagnostics,
}

impl TerminalOptions {
    /// An empty tree with the given defaults
    pub fn with_defaults(defaults: GlobalDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn windows(&self) -> &[WindowSpec] {
        &self.windows
    }

    pub fn cursor(&self) -> Option<Cursor> {
        let window = self.windows.len().checked_sub(1)?;
        Some(Cursor {
            window,
            tab: self.windows[window].tabs.len() - 1,
        })
    }

    pub(crate) fn current_window_mut(&mut self) -> Option<&mut WindowSpec> {
        self.windows.last_mut()
    }

    pub(crate) fn current_tab_mut(&mut self) -> Option<&mut TabSpec> {
        let Cursor { window, tab } = self.cursor()?;
        Some(&mut self.windows[window].tabs[tab])
    }

    pub(crate) fn first_tab_mut(&mut self) -> Option<&mut TabSpec> {
        self.windows.first_mut().and_then(|w| w.tabs.first_mut())
    }

    /// Append a window holding one tab, applying the defaults.
    ///
    /// The window is marked implicit only if it is the first one and the
    /// caller allows implicit creation.
    pub(crate) fn add_window(&mut self, profile: Option<String>, implicit_if_first: bool) -> Cursor {
        let mut window = WindowSpec::new(SourceTag::CommandLine, TabSpec::new(profile));
        window.implicit_first_window = self.windows.is_empty() && implicit_if_first;
        let window = apply_defaults(&mut self.defaults, window);
        self.windows.push(window);
        Cursor {
            window: self.windows.len() - 1,
            tab: 0,
        }
    }

    /// The current window, creating one if none exists
    pub(crate) fn ensure_top_window(&mut self, implicit_if_first: bool) -> &mut WindowSpec {
        if self.windows.is_empty() {
            self.add_window(None, implicit_if_first);
        }
        let last = self.windows.len() - 1;
        &mut self.windows[last]
    }

    /// The current tab, creating an implicit first window if none exists
    pub(crate) fn ensure_top_tab(&mut self) -> &mut TabSpec {
        let window = self.ensure_top_window(true);
        let last = window.tabs.len() - 1;
        &mut window.tabs[last]
    }

    pub(crate) fn append_windows(&mut self, windows: Vec<WindowSpec>) {
        self.windows.extend(windows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_defaults_consumes_role_and_menubar() {
        let mut defaults = GlobalDefaults {
            role: Some("main".to_string()),
            geometry: Some("80x24".to_string()),
            menubar: Some(MenubarState::Hidden),
            maximize: true,
            ..GlobalDefaults::default()
        };

        let first = apply_defaults(
            &mut defaults,
            WindowSpec::new(SourceTag::CommandLine, TabSpec::default()),
        );
        assert_eq!(first.role.as_deref(), Some("main"));
        assert_eq!(first.geometry.as_deref(), Some("80x24"));
        assert_eq!(first.menubar, Some(MenubarState::Hidden));
        assert!(first.maximized);
        assert!(!first.fullscreen);

        let second = apply_defaults(
            &mut defaults,
            WindowSpec::new(SourceTag::CommandLine, TabSpec::default()),
        );
        assert_eq!(second.role, None);
        assert_eq!(second.menubar, None);
        assert_eq!(second.geometry.as_deref(), Some("80x24"));
        assert!(second.maximized);
    }

    #[test]
    fn test_apply_defaults_keeps_existing_geometry() {
        let mut defaults = GlobalDefaults {
            geometry: Some("80x24".to_string()),
            ..GlobalDefaults::default()
        };
        let mut window = WindowSpec::new(SourceTag::Session, TabSpec::default());
        window.geometry = Some("120x40".to_string());
        window.fullscreen = true;

        let window = apply_defaults(&mut defaults, window);
        assert_eq!(window.geometry.as_deref(), Some("120x40"));
        assert!(window.fullscreen);
    }

    #[test]
    fn test_cursor_tracks_last_window_and_tab() {
        let mut options = TerminalOptions::default();
        assert_eq!(options.cursor(), None);

        options.add_window(None, true);
        assert_eq!(options.cursor(), Some(Cursor { window: 0, tab: 0 }));
        assert!(options.windows()[0].implicit_first_window);

        options.add_window(None, true);
        assert!(!options.windows()[1].implicit_first_window);

        if let Some(window) = options.current_window_mut() {
            window.push_tab(TabSpec::default());
        }
        assert_eq!(options.cursor(), Some(Cursor { window: 1, tab: 1 }));
    }

    #[test]
    fn test_ensure_top_tab_creates_implicit_window() {
        let mut options = TerminalOptions::default();
        options.ensure_top_tab().active = true;
        assert_eq!(options.windows().len(), 1);
        assert!(options.windows()[0].implicit_first_window);
        assert!(options.windows()[0].tabs()[0].active);
    }

    #[test]
    fn test_fd_pass_indices_and_duplicates() {
        let mut tab = TabSpec::default();
        assert_eq!(tab.add_fd_pass(5), Some(FdPass { index: 0, fd: 5 }));
        assert_eq!(tab.add_fd_pass(7), Some(FdPass { index: 1, fd: 7 }));
        assert_eq!(tab.add_fd_pass(5), None);
        assert_eq!(tab.fd_passes().len(), 2);
    }

    #[test]
    fn test_source_tag_codes() {
        assert_eq!(SourceTag::CommandLine.code(), 0);
        assert_eq!(SourceTag::Default.code(), 1);
        assert_eq!(SourceTag::Session.code(), 2);
    }
}
