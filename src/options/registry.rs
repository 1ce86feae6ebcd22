//! Option table: the single source of truth for every launcher option.

use clap::{Arg, ArgAction, Command};

/// Identifies an option independently of how it was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionId {
    // Global
    AppId,
    DisableFactory,
    LoadConfig,
    SaveConfig,
    Preferences,
    PrintEnvironment,
    Version,
    Verbose,
    Quiet,
    // Window/tab creation
    Window,
    Tab,
    // Per window
    ShowMenubar,
    HideMenubar,
    Maximize,
    FullScreen,
    Geometry,
    Role,
    Active,
    // Per terminal
    Command,
    Profile,
    Title,
    WorkingDirectory,
    Wait,
    Fd,
    Zoom,
    // Internal
    ProfileId,
    WindowWithProfile,
    TabWithProfile,
    WindowWithProfileInternalId,
    TabWithProfileInternalId,
    DefaultWorkingDirectory,
    UseFactory,
    StartupId,
    // Session manager
    SmClientDisable,
    SmClientStateFile,
    SmClientId,
    SmDisable,
    SmConfigPrefix,
}

/// Whether an option takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionArity {
    /// Plain flag (e.g., --maximize).
    NoValue,
    /// Requires exactly one value (e.g., --title TITLE).
    RequiresValue,
}

/// Which help section an option belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionGroup {
    Global,
    /// Options that open windows or tabs; may be given more than once
    Creation,
    Window,
    Terminal,
    Internal,
    Session,
}

impl OptionGroup {
    fn heading(self) -> &'static str {
        match self {
            OptionGroup::Global => "Global options",
            OptionGroup::Creation => {
                "Options to open new windows or terminal tabs; more than one of these may be specified"
            }
            OptionGroup::Window => {
                "Window options; if used before the first --window or --tab argument, sets the default for all windows"
            }
            OptionGroup::Terminal => {
                "Terminal options; if used before the first --window or --tab argument, sets the default for all terminals"
            }
            OptionGroup::Internal => "Internal options",
            OptionGroup::Session => "Session management options",
        }
    }
}

/// A single option definition.
#[derive(Debug, Clone)]
pub struct OptionDef {
    pub id: OptionId,
    /// Long form without the leading dashes (e.g., "working-directory").
    pub long: &'static str,
    /// Optional short form character (e.g., 't' for -t).
    pub short: Option<char>,
    pub arity: OptionArity,
    pub group: OptionGroup,
    /// Left out of help output.
    pub hidden: bool,
    /// Placeholder for the value in help output.
    pub value_name: Option<&'static str>,
    pub description: &'static str,
}

impl OptionDef {
    /// The clap argument for this option.
    ///
    /// Every option appends, so each occurrence keeps its own index in the
    /// matches. Flags record a placeholder value per occurrence. Values are
    /// taken unconditionally, so `--title -x` sets the title to `-x`.
    fn arg(&self) -> Arg {
        let mut arg = Arg::new(self.long)
            .long(self.long)
            .action(ArgAction::Append)
            .help(self.description)
            .help_heading(self.group.heading())
            .hide(self.hidden);
        if let Some(c) = self.short {
            arg = arg.short(c);
        }
        match self.arity {
            OptionArity::RequiresValue => arg
                .num_args(1)
                .value_name(self.value_name.unwrap_or("VALUE"))
                .allow_hyphen_values(true),
            OptionArity::NoValue => arg.num_args(0).default_missing_value("true"),
        }
    }
}

const fn flag(
    id: OptionId,
    long: &'static str,
    short: Option<char>,
    group: OptionGroup,
    hidden: bool,
    description: &'static str,
) -> OptionDef {
    OptionDef {
        id,
        long,
        short,
        arity: OptionArity::NoValue,
        group,
        hidden,
        value_name: None,
        description,
    }
}

const fn valued(
    id: OptionId,
    long: &'static str,
    short: Option<char>,
    group: OptionGroup,
    hidden: bool,
    value_name: &'static str,
    description: &'static str,
) -> OptionDef {
    OptionDef {
        id,
        long,
        short,
        arity: OptionArity::RequiresValue,
        group,
        hidden,
        value_name: Some(value_name),
        description,
    }
}

use OptionGroup::{Creation, Global, Internal, Session, Terminal, Window};

/// The complete option table, in help order.
pub static OPTIONS: &[OptionDef] = &[
    // === Global ===
    valued(OptionId::AppId, "app-id", None, Global, true, "ID", "Server application ID"),
    flag(
        OptionId::DisableFactory,
        "disable-factory",
        None,
        Global,
        true,
        "Do not register with the activation nameserver, do not re-use an active terminal",
    ),
    valued(
        OptionId::LoadConfig,
        "load-config",
        None,
        Global,
        false,
        "FILE",
        "Load a terminal configuration file",
    ),
    valued(OptionId::SaveConfig, "save-config", None, Global, true, "FILE", ""),
    flag(OptionId::Preferences, "preferences", None, Global, false, "Show preferences window"),
    flag(
        OptionId::PrintEnvironment,
        "print-environment",
        Some('p'),
        Global,
        false,
        "Print environment variables to interact with the terminal",
    ),
    flag(OptionId::Version, "version", None, Global, true, "Print the version and exit"),
    flag(OptionId::Verbose, "verbose", Some('v'), Global, false, "Increase diagnostic verbosity"),
    flag(OptionId::Quiet, "quiet", Some('q'), Global, false, "Suppress output"),
    // === Creation ===
    flag(
        OptionId::Window,
        "window",
        None,
        Creation,
        false,
        "Open a new window containing a tab with the default profile",
    ),
    flag(
        OptionId::Tab,
        "tab",
        None,
        Creation,
        false,
        "Open a new tab in the last-opened window with the default profile",
    ),
    // === Window ===
    flag(OptionId::ShowMenubar, "show-menubar", None, Window, false, "Turn on the menubar"),
    flag(OptionId::HideMenubar, "hide-menubar", None, Window, false, "Turn off the menubar"),
    flag(OptionId::Maximize, "maximize", None, Window, false, "Maximize the window"),
    flag(OptionId::FullScreen, "full-screen", None, Window, false, "Full-screen the window"),
    valued(
        OptionId::Geometry,
        "geometry",
        None,
        Window,
        false,
        "GEOMETRY",
        "Set the window size; for example: 80x24, or 80x24+200+200 (COLSxROWS+X+Y)",
    ),
    valued(OptionId::Role, "role", None, Window, false, "ROLE", "Set the window role"),
    flag(
        OptionId::Active,
        "active",
        None,
        Window,
        false,
        "Set the last specified tab as the active one in its window",
    ),
    // === Terminal ===
    valued(
        OptionId::Command,
        "command",
        Some('e'),
        Terminal,
        false,
        "COMMAND",
        "Execute the argument to this option inside the terminal",
    ),
    valued(
        OptionId::Profile,
        "profile",
        None,
        Terminal,
        false,
        "PROFILE-NAME",
        "Use the given profile instead of the default profile",
    ),
    valued(OptionId::Title, "title", Some('t'), Terminal, false, "TITLE", "Set the initial terminal title"),
    valued(
        OptionId::WorkingDirectory,
        "working-directory",
        None,
        Terminal,
        false,
        "DIRNAME",
        "Set the working directory",
    ),
    flag(OptionId::Wait, "wait", None, Terminal, false, "Wait until the child exits"),
    valued(OptionId::Fd, "fd", None, Terminal, false, "FD", "Forward file descriptor"),
    valued(
        OptionId::Zoom,
        "zoom",
        None,
        Terminal,
        false,
        "ZOOM",
        "Set the terminal’s zoom factor (1.0 = normal size)",
    ),
    // === Internal ===
    valued(OptionId::ProfileId, "profile-id", None, Internal, true, "ID", ""),
    valued(OptionId::WindowWithProfile, "window-with-profile", None, Internal, true, "PROFILE-NAME", ""),
    valued(OptionId::TabWithProfile, "tab-with-profile", None, Internal, true, "PROFILE-NAME", ""),
    valued(
        OptionId::WindowWithProfileInternalId,
        "window-with-profile-internal-id",
        None,
        Internal,
        true,
        "ID",
        "",
    ),
    valued(
        OptionId::TabWithProfileInternalId,
        "tab-with-profile-internal-id",
        None,
        Internal,
        true,
        "ID",
        "",
    ),
    valued(
        OptionId::DefaultWorkingDirectory,
        "default-working-directory",
        None,
        Internal,
        true,
        "DIRNAME",
        "",
    ),
    flag(OptionId::UseFactory, "use-factory", None, Internal, true, ""),
    valued(OptionId::StartupId, "startup-id", None, Internal, true, "ID", ""),
    // === Session manager ===
    flag(OptionId::SmClientDisable, "sm-client-disable", None, Session, true, ""),
    valued(OptionId::SmClientStateFile, "sm-client-state-file", None, Session, true, "FILE", ""),
    valued(OptionId::SmClientId, "sm-client-id", None, Session, true, "ID", ""),
    flag(OptionId::SmDisable, "sm-disable", None, Session, true, ""),
    valued(OptionId::SmConfigPrefix, "sm-config-prefix", None, Session, true, "PREFIX", ""),
];

/// The terminal option grammar as a clap command.
///
/// Argument ids are the long names. The trailing command (`-x`, `--`) is
/// cut off before this command sees the arguments.
pub fn command() -> Command {
    Command::new("term-launch")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .override_usage("term-launch -- [OPTION…] [-- COMMAND…]")
        .help_template("Usage: {usage}\n\n{all-args}\n")
        .args(OPTIONS.iter().map(OptionDef::arg))
}

/// Render the visible options as help text, grouped by section.
pub fn help_text() -> String {
    command().render_help().to_string()
}
