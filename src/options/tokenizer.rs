//! Turns raw arguments into ordered option events.
//!
//! The grammar is the clap command from [`registry::command`]. clap handles
//! `--name`, `--name=value`, `--name value`, `-c`, `-c value`, `-cvalue`, and
//! clusters of short flags such as `-vp`. Every option appends, so the
//! left-to-right order is rebuilt from the occurrence indices.

use clap::error::{ContextKind, ContextValue, ErrorKind as ClapErrorKind};

use super::error::OptionError;
use super::registry::{self, OPTIONS, OptionArity, OptionDef, OptionId};

/// One recognized option with its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEvent {
    pub id: OptionId,
    /// The option's long spelling (`--title`)
    pub name: String,
    pub value: Option<String>,
}

impl OptionEvent {
    fn new(def: &OptionDef, value: Option<String>) -> Self {
        Self {
            id: def.id,
            name: format!("--{}", def.long),
            value,
        }
    }
}

/// Tokenize an argument list (program name already removed).
pub fn tokenize(args: &[String]) -> Result<Vec<OptionEvent>, OptionError> {
    let matches = registry::command()
        .try_get_matches_from(args)
        .map_err(option_error)?;

    let mut indexed = Vec::with_capacity(args.len());
    for def in OPTIONS {
        let (Some(indices), Some(values)) = (
            matches.indices_of(def.long),
            matches.get_many::<String>(def.long),
        ) else {
            continue;
        };
        for (index, value) in indices.zip(values) {
            let value = match def.arity {
                OptionArity::RequiresValue => Some(value.clone()),
                OptionArity::NoValue => None,
            };
            indexed.push((index, OptionEvent::new(def, value)));
        }
    }
    indexed.sort_by_key(|(index, _)| *index);

    Ok(indexed.into_iter().map(|(_, event)| event).collect())
}

/// Map a clap parse failure onto the option error it describes.
fn option_error(err: clap::Error) -> OptionError {
    let invalid_arg = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => Some(arg.as_str()),
        _ => None,
    };

    match (err.kind(), invalid_arg) {
        (ClapErrorKind::UnknownArgument, Some(arg)) if arg.len() > 1 && arg.starts_with('-') => {
            OptionError::UnknownOption {
                option: arg.to_string(),
            }
        }
        (ClapErrorKind::UnknownArgument, Some(arg)) => OptionError::UnexpectedArgument {
            argument: arg.to_string(),
        },
        (ClapErrorKind::InvalidValue, Some(arg)) => OptionError::MissingValue {
            option: option_spelling(arg),
        },
        (ClapErrorKind::TooManyValues | ClapErrorKind::WrongNumberOfValues, Some(arg)) => {
            OptionError::UnexpectedValue {
                option: option_spelling(arg),
            }
        }
        _ => OptionError::Syntax {
            message: clap_message(&err),
        },
    }
}

/// clap names arguments with their value placeholder (`--zoom <ZOOM>`)
fn option_spelling(arg: &str) -> String {
    arg.split([' ', '=', '['])
        .next()
        .unwrap_or(arg)
        .to_string()
}

/// First line of clap's rendered error, without the `error: ` prefix
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
