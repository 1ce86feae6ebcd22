//! Fatal errors of option digestion and session merging.

use crate::profile::ProfileError;
use std::path::PathBuf;

/// Broad classification of an [`OptionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadValue,
    DuplicateOption,
    UnsupportedOption,
    MissingCommand,
    InvalidConfigFormat,
    IncompatibleConfigVersion,
    /// Token-level problems: unknown options, missing or stray values
    Syntax,
    Profile,
    Io,
}

/// A fatal error; the partially built options tree is discarded.
#[derive(Debug, thiserror::Error)]
pub enum OptionError {
    #[error("{message}")]
    BadValue { option: String, message: String },

    #[error("{message}")]
    DuplicateOption { option: String, message: String },

    #[error("Option “{option}” is no longer supported")]
    UnsupportedOption { option: String },

    #[error(
        "Option “{option}” requires specifying the command to run on the rest of the command line"
    )]
    MissingCommand { option: String },

    #[error("Not a valid terminal config file: {message}")]
    InvalidConfigFormat { message: String },

    #[error(
        "Incompatible terminal config file version (Version={version}, CompatVersion={compat_version})"
    )]
    IncompatibleConfigVersion { version: i64, compat_version: i64 },

    #[error("Unknown option {option}")]
    UnknownOption { option: String },

    #[error("Missing argument for {option}")]
    MissingValue { option: String },

    #[error("Option {option} does not take an argument")]
    UnexpectedValue { option: String },

    #[error("Unexpected argument “{argument}”")]
    UnexpectedArgument { argument: String },

    #[error("{message}")]
    Syntax { message: String },

    #[error("{option}: {source}")]
    Profile {
        option: String,
        #[source]
        source: ProfileError,
    },

    #[error("Failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OptionError {
    pub(crate) fn bad_value(option: &str, message: impl Into<String>) -> Self {
        OptionError::BadValue {
            option: option.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn duplicate(option: &str, message: impl Into<String>) -> Self {
        OptionError::DuplicateOption {
            option: option.to_string(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OptionError::BadValue { .. } => ErrorKind::BadValue,
            OptionError::DuplicateOption { .. } => ErrorKind::DuplicateOption,
            OptionError::UnsupportedOption { .. } => ErrorKind::UnsupportedOption,
            OptionError::MissingCommand { .. } => ErrorKind::MissingCommand,
            OptionError::InvalidConfigFormat { .. } => ErrorKind::InvalidConfigFormat,
            OptionError::IncompatibleConfigVersion { .. } => ErrorKind::IncompatibleConfigVersion,
            OptionError::UnknownOption { .. }
            | OptionError::MissingValue { .. }
            | OptionError::UnexpectedValue { .. }
            | OptionError::UnexpectedArgument { .. }
            | OptionError::Syntax { .. } => ErrorKind::Syntax,
            OptionError::Profile { .. } => ErrorKind::Profile,
            OptionError::ConfigRead { .. } => ErrorKind::Io,
        }
    }

    /// The option (or document key) the error is about, when there is one
    pub fn option(&self) -> Option<&str> {
        match self {
            OptionError::BadValue { option, .. }
            | OptionError::DuplicateOption { option, .. }
            | OptionError::UnsupportedOption { option }
            | OptionError::MissingCommand { option }
            | OptionError::UnknownOption { option }
            | OptionError::MissingValue { option }
            | OptionError::UnexpectedValue { option }
            | OptionError::Profile { option, .. } => Some(option),
            OptionError::InvalidConfigFormat { .. }
            | OptionError::IncompatibleConfigVersion { .. }
            | OptionError::UnexpectedArgument { .. }
            | OptionError::Syntax { .. }
            | OptionError::ConfigRead { .. } => None,
        }
    }
}
