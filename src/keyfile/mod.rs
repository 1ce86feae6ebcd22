//! Reader for the key-file format used by saved session documents.
//!
//! The format is the familiar desktop-entry style:
//!
//! ```text
//! # comment
//! [Group Name]
//! Key=value
//! List=one;two;three;
//! ```
//!
//! Values are stored raw and decoded on access by the typed getters. When a
//! key repeats within a group the last value wins; a repeated group header
//! continues the earlier group.

mod escape;

pub use escape::compress;

/// Errors raised while reading a key-file document or decoding its values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyFileError {
    #[error("line {line}: malformed group header")]
    InvalidGroupHeader { line: usize },

    #[error("line {line}: key/value pair appears before any group")]
    EntryOutsideGroup { line: usize },

    #[error("line {line}: expected \"key=value\"")]
    InvalidLine { line: usize },

    #[error("key “{key}” in group “{group}” contains an invalid escape sequence")]
    InvalidEscape { group: String, key: String },

    #[error("key “{key}” in group “{group}” has value “{value}” which is not a valid {expected}")]
    InvalidValue {
        group: String,
        key: String,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
struct Group {
    name: String,
    entries: Vec<(String, String)>,
}

impl Group {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }
}

/// A parsed key-file document
#[derive(Debug, Clone, Default)]
pub struct KeyFile {
    groups: Vec<Group>,
}

impl KeyFile {
    /// Parse a document from text.
    pub fn parse(text: &str) -> Result<Self, KeyFileError> {
        let mut key_file = KeyFile::default();
        let mut current: Option<usize> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim_start();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .trim_end()
                    .strip_suffix(']')
                    .filter(|name| !name.is_empty() && !name.contains(['[', ']']))
                    .ok_or(KeyFileError::InvalidGroupHeader { line: line_no })?;
                current = Some(key_file.group_index_or_insert(name));
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or(KeyFileError::InvalidLine { line: line_no })?;
            let key = key.trim_end();
            if key.is_empty() {
                return Err(KeyFileError::InvalidLine { line: line_no });
            }

            let group = current.ok_or(KeyFileError::EntryOutsideGroup { line: line_no })?;
            key_file.groups[group].set(key, value.trim_start());
        }

        Ok(key_file)
    }

    fn group_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(index) = self.groups.iter().position(|g| g.name == name) {
            return index;
        }
        self.groups.push(Group {
            name: name.to_string(),
            entries: Vec::new(),
        });
        self.groups.len() - 1
    }

    fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.group(group).is_some()
    }

    pub fn has_key(&self, group: &str, key: &str) -> bool {
        self.raw_value(group, key).is_some()
    }

    /// The undecoded value of a key
    pub fn raw_value(&self, group: &str, key: &str) -> Option<&str> {
        self.group(group).and_then(|g| g.get(key))
    }

    /// A string value with key-file escapes decoded.
    pub fn get_string(&self, group: &str, key: &str) -> Result<Option<String>, KeyFileError> {
        let Some(raw) = self.raw_value(group, key) else {
            return Ok(None);
        };
        escape::unescape_value(raw)
            .map(Some)
            .ok_or_else(|| KeyFileError::InvalidEscape {
                group: group.to_string(),
                key: key.to_string(),
            })
    }

    /// A `;`-separated list value.
    pub fn get_string_list(
        &self,
        group: &str,
        key: &str,
    ) -> Result<Option<Vec<String>>, KeyFileError> {
        let Some(raw) = self.raw_value(group, key) else {
            return Ok(None);
        };
        escape::parse_list(raw)
            .map(Some)
            .ok_or_else(|| KeyFileError::InvalidEscape {
                group: group.to_string(),
                key: key.to_string(),
            })
    }

    pub fn get_integer(&self, group: &str, key: &str) -> Result<Option<i64>, KeyFileError> {
        let Some(raw) = self.raw_value(group, key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| self.invalid_value(group, key, raw, "integer"))
    }

    /// A boolean value: `true`, `false`, `1` or `0`.
    pub fn get_boolean(&self, group: &str, key: &str) -> Result<Option<bool>, KeyFileError> {
        let Some(raw) = self.raw_value(group, key) else {
            return Ok(None);
        };
        match raw.trim() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(self.invalid_value(group, key, raw, "boolean")),
        }
    }

    fn invalid_value(&self, group: &str, key: &str, raw: &str, expected: &'static str) -> KeyFileError {
        KeyFileError::InvalidValue {
            group: group.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
            expected,
        }
    }
}
