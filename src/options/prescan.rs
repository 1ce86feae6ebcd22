//! Extraction of the trailing command before option parsing.
//!
//! Everything after a bare `--` (or after the deprecated `-x`/`--execute`)
//! is the command to run, taken verbatim. It has to be cut off before the
//! tokenizer runs, otherwise its words would be parsed as options.

/// The argument list split at the first command separator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prescan {
    /// Arguments left for the tokenizer
    pub options: Vec<String>,
    /// Verbatim trailing command; `None` when nothing followed the separator
    pub trailing: Option<Vec<String>>,
    /// The separator was `-x`/`--execute` rather than `--`; holds its spelling
    pub execute_flag: Option<String>,
}

impl Prescan {
    pub fn execute(&self) -> bool {
        self.execute_flag.is_some()
    }
}

/// Split `args` (program name already removed) at the first `--`, `-x` or
/// `--execute`.
pub fn prescan(args: &[String]) -> Prescan {
    let Some(pos) = args
        .iter()
        .position(|a| a == "--" || a == "-x" || a == "--execute")
    else {
        return Prescan {
            options: args.to_vec(),
            ..Prescan::default()
        };
    };

    let separator = &args[pos];
    let after = &args[pos + 1..];
    Prescan {
        options: args[..pos].to_vec(),
        trailing: (!after.is_empty()).then(|| after.to_vec()),
        execute_flag: (separator != "--").then(|| separator.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_separator() {
        let scan = prescan(&args(&["--window", "--title", "t"]));
        assert_eq!(scan.options, args(&["--window", "--title", "t"]));
        assert_eq!(scan.trailing, None);
        assert!(!scan.execute());
    }

    #[test]
    fn test_double_dash() {
        let scan = prescan(&args(&["--maximize", "--", "vim", "-x", "--", "file"]));
        assert_eq!(scan.options, args(&["--maximize"]));
        assert_eq!(scan.trailing, Some(args(&["vim", "-x", "--", "file"])));
        assert!(!scan.execute());
    }

    #[test]
    fn test_execute_flag() {
        let scan = prescan(&args(&["-x", "htop", "--tree"]));
        assert!(scan.options.is_empty());
        assert_eq!(scan.trailing, Some(args(&["htop", "--tree"])));
        assert_eq!(scan.execute_flag.as_deref(), Some("-x"));

        let scan = prescan(&args(&["--tab", "--execute"]));
        assert_eq!(scan.options, args(&["--tab"]));
        assert_eq!(scan.trailing, None);
        assert!(scan.execute());
    }

    #[test]
    fn test_trailing_dash_dash_is_empty() {
        let scan = prescan(&args(&["--window", "--"]));
        assert_eq!(scan.options, args(&["--window"]));
        assert_eq!(scan.trailing, None);
        assert!(!scan.execute());
    }

    #[test]
    fn test_value_equal_to_separator_is_still_a_separator() {
        // The prescan runs before values are known, so a title of "--" splits.
        let scan = prescan(&args(&["--title", "--", "ls"]));
        assert_eq!(scan.options, args(&["--title"]));
        assert_eq!(scan.trailing, Some(args(&["ls"])));
    }
}
