//! POSIX shell word splitting for command strings.
//!
//! Used for `--command` values and for the `Command` key of saved session
//! documents. Splitting follows `sh` quoting rules (single quotes, double
//! quotes, backslash escapes); no expansion of any kind is performed.

/// A command string that could not be split into words.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellSyntaxError {
    /// The string contained no words at all.
    #[error("command line is empty")]
    Empty,
    /// Quoting was malformed (e.g. an unterminated quote).
    #[error("{0}")]
    Malformed(String),
}

/// Split a command string into an argv.
///
/// An empty result is an error: a command must name at least a program.
pub fn split_command_line(line: &str) -> Result<Vec<String>, ShellSyntaxError> {
    let words =
        shell_words::split(line).map_err(|e| ShellSyntaxError::Malformed(e.to_string()))?;
    if words.is_empty() {
        return Err(ShellSyntaxError::Empty);
    }
    Ok(words)
}
