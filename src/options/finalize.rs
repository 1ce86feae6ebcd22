//! Post-parse fixups of the options tree.

use super::error::OptionError;
use super::model::TerminalOptions;
use term_launch_config::NewTerminalMode;

/// Resolve the pending trailing command and make sure a window exists.
///
/// A trailing command goes to the first tab of the first window. When no
/// window was requested at all an implicit one is created, so a finished
/// tree always describes at least one terminal.
pub fn finalize(options: &mut TerminalOptions) -> Result<(), OptionError> {
    if options.execute && options.exec_argv.is_none() {
        return Err(OptionError::MissingCommand {
            option: "--execute/-x".to_string(),
        });
    }

    options.ensure_top_window(true);

    if let Some(argv) = options.exec_argv.take()
        && let Some(tab) = options.first_tab_mut()
    {
        log::debug!("Attaching command {argv:?} to the first terminal");
        tab.exec_argv = Some(argv);
    }

    Ok(())
}

/// Ensure at least one window, honouring the configured new-terminal mode.
///
/// Used for trees built from documents alone. In tab mode the synthesized
/// window is implicit, so a consumer may put its tab into an existing window.
pub fn ensure_window(options: &mut TerminalOptions, mode: NewTerminalMode) {
    if options.windows().is_empty() {
        log::debug!("No windows requested, opening one in {mode:?} mode");
    }
    options.ensure_top_window(mode.opens_tab());
}
