//! Entry points that run a whole parse.

use super::diagnostics::NoticeKind;
use super::digest::{Digester, deprecated_command_message};
use super::environment::{LaunchEnvironment, STARTUP_ID_VAR};
use super::error::OptionError;
use super::finalize::{ensure_window, finalize};
use super::merge::load_config_file;
use super::model::{SourceTag, TerminalOptions};
use super::prescan::prescan;
use super::tokenizer::tokenize;
use crate::profile::ProfileResolver;
use std::path::Path;
use term_launch_config::Config;

/// Everything a parse consults besides the arguments
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub env: &'a LaunchEnvironment,
    pub profiles: &'a dyn ProfileResolver,
    pub config: &'a Config,
}

impl<'a> ParseContext<'a> {
    pub fn new(
        env: &'a LaunchEnvironment,
        profiles: &'a dyn ProfileResolver,
        config: &'a Config,
    ) -> Self {
        Self {
            env,
            profiles,
            config,
        }
    }
}

/// Parse a launcher command line (program name already removed) into an
/// options tree.
///
/// The first fatal error aborts the parse and no tree is returned.
pub fn parse(args: &[String], ctx: &ParseContext<'_>) -> Result<TerminalOptions, OptionError> {
    let mut options = TerminalOptions::from_environment(ctx.env);

    let scan = prescan(args);
    if let Some(flag) = &scan.execute_flag {
        options
            .diagnostics
            .notice(NoticeKind::Deprecated, deprecated_command_message(flag));
    }
    options.execute = scan.execute();
    if scan.trailing.is_some() {
        options.exec_argv = scan.trailing;
    }

    let events = tokenize(&scan.options)?;
    Digester::new(&mut options, ctx.profiles, ctx.config).digest_all(&events)?;
    finalize(&mut options)?;

    if options.startup_id.is_none() {
        options.diagnostics.detail(
            NoticeKind::Environment,
            format!("{STARTUP_ID_VAR} not set"),
        );
    }

    log::debug!(
        "Parsed {} argument(s) into {} window(s)",
        args.len(),
        options.windows().len()
    );
    Ok(options)
}

/// Build an options tree from a saved session document alone.
pub fn restore_session(path: &Path, ctx: &ParseContext<'_>) -> Result<TerminalOptions, OptionError> {
    let mut options = TerminalOptions::from_environment(ctx.env);
    load_config_file(&mut options, path, SourceTag::Session)?;
    ensure_window(&mut options, ctx.config.new_terminal_mode);
    Ok(options)
}
