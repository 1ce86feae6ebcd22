//! Escape handling for key-file values.
//!
//! Two layers exist. Key-file values use their own small escape set
//! (`\s \n \t \r \\`, plus `\;` inside lists). Values that hold paths or
//! command lines are additionally written with C-style escapes, which
//! [`compress`] decodes.

/// Decode the key-file escapes of a scalar value.
///
/// Returns `None` when the value contains an unknown escape or ends in a
/// lone backslash.
pub(crate) fn unescape_value(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        out.push(decode_value_escape(chars.next()?)?);
    }
    Some(out)
}

/// Split and decode a `;`-separated list value.
///
/// `\;` is a literal separator character. A trailing separator is optional;
/// an empty value is an empty list.
pub(crate) fn parse_list(raw: &str) -> Option<Vec<String>> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            ';' => items.push(std::mem::take(&mut current)),
            '\\' => match chars.next()? {
                ';' => current.push(';'),
                other => current.push(decode_value_escape(other)?),
            },
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        items.push(current);
    }
    Some(items)
}

fn decode_value_escape(c: char) -> Option<char> {
    match c {
        's' => Some(' '),
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\\' => Some('\\'),
        _ => None,
    }
}

/// Decode C-style escapes: `\b \f \n \r \t \v \\ \" \'` and octal `\ooo`
/// (one to three digits).
///
/// Any other escaped character stands for itself. Octal escapes produce raw
/// bytes, so multi-byte UTF-8 sequences written as octal decode correctly;
/// invalid UTF-8 is replaced rather than rejected.
pub fn compress(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        i += 1;
        if b != b'\\' {
            out.push(b);
            continue;
        }
        let Some(&next) = bytes.get(i) else {
            // A lone trailing backslash is kept.
            out.push(b'\\');
            break;
        };
        i += 1;
        match next {
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'0'..=b'7' => {
                let mut value = u32::from(next - b'0');
                let mut digits = 1;
                while digits < 3
                    && let Some(&d) = bytes.get(i)
                    && (b'0'..=b'7').contains(&d)
                {
                    value = value * 8 + u32::from(d - b'0');
                    i += 1;
                    digits += 1;
                }
                out.push((value & 0xff) as u8);
            }
            other => out.push(other),
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_value() {
        assert_eq!(unescape_value(r"a\sb\tc").as_deref(), Some("a b\tc"));
        assert_eq!(unescape_value(r"C:\\dir").as_deref(), Some(r"C:\dir"));
        assert_eq!(unescape_value("plain").as_deref(), Some("plain"));
        assert!(unescape_value(r"bad\q").is_none());
        assert!(unescape_value("trailing\\").is_none());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("a;b;").unwrap(), ["a", "b"]);
        assert_eq!(parse_list("a;b").unwrap(), ["a", "b"]);
        assert_eq!(parse_list(r"x\;y;z").unwrap(), ["x;y", "z"]);
        assert_eq!(parse_list("a;;b").unwrap(), ["a", "", "b"]);
        assert!(parse_list("").unwrap().is_empty());
        assert!(parse_list(r"a\").is_none());
    }

    #[test]
    fn test_compress_named_escapes() {
        assert_eq!(compress(r"a\nb"), "a\nb");
        assert_eq!(compress(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(compress(r"\'q\'"), "'q'");
        assert_eq!(compress(r"back\\slash"), r"back\slash");
        assert_eq!(compress(r"\x"), "x");
    }

    #[test]
    fn test_compress_octal() {
        assert_eq!(compress(r"\101\102"), "AB");
        assert_eq!(compress(r"\0"), "\0");
        assert_eq!(compress(r"\1010"), "A0");
        // UTF-8 for 'é' written byte by byte
        assert_eq!(compress(r"caf\303\251"), "café");
    }

    #[test]
    fn test_compress_trailing_backslash() {
        assert_eq!(compress("dir\\"), "dir\\");
    }
}
