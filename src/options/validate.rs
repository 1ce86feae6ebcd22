//! Value checks for options whose arguments have a fixed syntax.

use super::error::OptionError;
use regex::Regex;
use std::sync::OnceLock;

/// Margin used when deciding whether a zoom factor is at a bound
const ZOOM_EPSILON: f64 = 1e-6;

fn app_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_-][A-Za-z0-9_-]*(?:\.[A-Za-z_-][A-Za-z0-9_-]*)+$")
            .expect("app_id_regex: pattern is valid and should always compile")
    })
}

fn unique_bus_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^:[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)+$")
            .expect("unique_bus_name_regex: pattern is valid and should always compile")
    })
}

fn object_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:/|(?:/[A-Za-z0-9_]+)+)$")
            .expect("object_path_regex: pattern is valid and should always compile")
    })
}

/// Application ids are reverse-DNS style: at least two dot-separated
/// elements, none starting with a digit, 255 characters at most.
pub fn is_valid_app_id(value: &str) -> bool {
    value.len() <= 255 && app_id_regex().is_match(value)
}

/// Unique bus names look like `:1.42`.
pub fn is_unique_bus_name(value: &str) -> bool {
    value.len() <= 255 && unique_bus_name_regex().is_match(value)
}

/// Object paths look like `/org/example/Screen/0`.
pub fn is_object_path(value: &str) -> bool {
    object_path_regex().is_match(value)
}

/// Parse a zoom factor.
///
/// The machine format (`1.5`) is tried first, then the comma decimal
/// separator people type in many locales (`1,5`). Non-finite values are
/// rejected.
pub fn parse_zoom(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let parsed = value.parse::<f64>().ok().or_else(|| {
        if value.contains(',') && !value.contains('.') {
            value.replacen(',', ".", 1).parse::<f64>().ok()
        } else {
            None
        }
    })?;
    parsed.is_finite().then_some(parsed)
}

/// Outcome of clamping a zoom factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomClamp {
    InRange(f64),
    TooSmall(f64),
    TooLarge(f64),
}

impl ZoomClamp {
    pub fn value(self) -> f64 {
        match self {
            ZoomClamp::InRange(v) | ZoomClamp::TooSmall(v) | ZoomClamp::TooLarge(v) => v,
        }
    }
}

/// Clamp a zoom factor into `[minimum, maximum]`.
///
/// Values within the epsilon margin of a bound snap to that bound.
pub fn clamp_zoom(zoom: f64, minimum: f64, maximum: f64) -> ZoomClamp {
    if zoom < minimum + ZOOM_EPSILON {
        ZoomClamp::TooSmall(minimum)
    } else if zoom > maximum - ZOOM_EPSILON {
        ZoomClamp::TooLarge(maximum)
    } else {
        ZoomClamp::InRange(zoom)
    }
}

/// Parse a file descriptor number for `--fd`.
///
/// The standard streams cannot be forwarded.
pub fn parse_fd(option: &str, value: &str) -> Result<i32, OptionError> {
    let fd = value
        .trim_start()
        .parse::<i64>()
        .ok()
        .filter(|v| *v >= 0)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| {
            OptionError::bad_value(
                option,
                format!("Failed to parse “{value}” as file descriptor number"),
            )
        })?;

    let stream = match fd {
        0 => "stdin",
        1 => "stdout",
        2 => "stderr",
        _ => return Ok(fd),
    };
    Err(OptionError::bad_value(
        option,
        format!("FD passing of {stream} is not supported"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_ids() {
        assert!(is_valid_app_id("org.example.Terminal"));
        assert!(is_valid_app_id("a.b"));
        assert!(is_valid_app_id("_private.my-app"));
        assert!(!is_valid_app_id("single"));
        assert!(!is_valid_app_id(".org.example"));
        assert!(!is_valid_app_id("org.example."));
        assert!(!is_valid_app_id("org..example"));
        assert!(!is_valid_app_id("org.1example"));
        assert!(!is_valid_app_id("org.exa mple"));
        assert!(!is_valid_app_id(""));

        let long = format!("org.{}", "a".repeat(252));
        assert!(!is_valid_app_id(&long));
    }

    #[test]
    fn test_bus_names_and_object_paths() {
        assert!(is_unique_bus_name(":1.42"));
        assert!(!is_unique_bus_name("org.example.Terminal"));
        assert!(!is_unique_bus_name(":1"));

        assert!(is_object_path("/"));
        assert!(is_object_path("/org/example/Screen/0"));
        assert!(!is_object_path("org/example"));
        assert!(!is_object_path("/org/example/"));
        assert!(!is_object_path("/org//example"));
    }

    #[test]
    fn test_parse_zoom() {
        assert_eq!(parse_zoom("1.0"), Some(1.0));
        assert_eq!(parse_zoom("1.5"), Some(1.5));
        assert_eq!(parse_zoom("1,5"), Some(1.5));
        assert_eq!(parse_zoom("abc"), None);
        assert_eq!(parse_zoom("1.5x"), None);
        assert_eq!(parse_zoom("inf"), None);
        assert_eq!(parse_zoom("NaN"), None);
        assert_eq!(parse_zoom(""), None);
    }

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(clamp_zoom(1.0, 0.25, 4.0), ZoomClamp::InRange(1.0));
        assert_eq!(clamp_zoom(0.1, 0.25, 4.0), ZoomClamp::TooSmall(0.25));
        assert_eq!(clamp_zoom(9.0, 0.25, 4.0), ZoomClamp::TooLarge(4.0));
        assert_eq!(clamp_zoom(0.2500001, 0.25, 4.0).value(), 0.25);
        assert_eq!(clamp_zoom(3.9999999, 0.25, 4.0).value(), 4.0);
    }

    #[test]
    fn test_parse_fd() {
        assert_eq!(parse_fd("--fd", "5").unwrap(), 5);
        assert_eq!(parse_fd("--fd", "2147483647").unwrap(), i32::MAX);

        for bad in ["-1", "-7", "x", "", "3.5", "2147483648"] {
            let err = parse_fd("--fd", bad).unwrap_err();
            assert!(err.to_string().contains("as file descriptor number"), "{bad}");
        }

        assert_eq!(
            parse_fd("--fd", "0").unwrap_err().to_string(),
            "FD passing of stdin is not supported"
        );
        assert_eq!(
            parse_fd("--fd", "1").unwrap_err().to_string(),
            "FD passing of stdout is not supported"
        );
        assert_eq!(
            parse_fd("--fd", "2").unwrap_err().to_string(),
            "FD passing of stderr is not supported"
        );
    }
}
