//! The `---` delimited header block at the top of a note.
//!
//! ```text
//! ---
//! date: 2024-03-05
//! title: "Spring cleaning"
//! ---
//! Body text...
//! ```
//!
//! Only the simple `key: value` line shape is understood. Nested YAML,
//! lists and multi-line values are not interpreted; such lines are kept as
//! whatever `key: value` pair their first colon produces, or ignored.

/// Line that opens and closes the header block.
pub const HEADER_MARKER: &str = "---";

/// A single `key: value` line from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderEntry<'a> {
    /// Key text with surrounding whitespace removed. Case-sensitive.
    pub key: &'a str,
    /// Value text with surrounding whitespace removed, quotes untouched.
    pub raw_value: &'a str,
}

impl<'a> HeaderEntry<'a> {
    /// Returns the value with one matching pair of surrounding quotes removed.
    pub fn value(&self) -> &'a str {
        strip_quotes(self.raw_value)
    }
}

/// The parsed header block of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    entries: Vec<HeaderEntry<'a>>,
    body: Option<&'a str>,
}

impl<'a> Frontmatter<'a> {
    /// Parses the header block at the start of `text`.
    ///
    /// Returns `None` when the first line is not the header marker. A block
    /// that is never closed extends to the end of the text; in that case
    /// [`Frontmatter::body`] is `None`.
    pub fn parse(text: &'a str) -> Option<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text.split_inclusive('\n');

        let first = lines.next()?;
        if first.trim_end() != HEADER_MARKER {
            return None;
        }

        let mut offset = first.len();
        let mut entries = Vec::new();

        for line in lines {
            offset += line.len();
            let trimmed = line.trim();

            if trimmed == HEADER_MARKER {
                return Some(Self {
                    entries,
                    body: Some(&text[offset..]),
                });
            }

            if let Some((key, value)) = trimmed.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    entries.push(HeaderEntry {
                        key,
                        raw_value: value.trim(),
                    });
                }
            }
        }

        Some(Self {
            entries,
            body: None,
        })
    }

    /// All header entries in file order.
    pub fn entries(&self) -> &[HeaderEntry<'a>] {
        &self.entries
    }

    /// Returns the unquoted value of the first entry with `key`.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(HeaderEntry::value)
    }

    /// Returns the first entry with `key` whose raw value is not empty.
    ///
    /// A line such as `date:` with nothing after the colon does not count
    /// as a value, so a later `date:` line can still supply one.
    pub fn first_non_empty(&self, key: &str) -> Option<&HeaderEntry<'a>> {
        self.entries
            .iter()
            .find(|entry| entry.key == key && !entry.raw_value.is_empty())
    }

    /// Text after the closing marker line, or `None` if the block is unterminated.
    pub fn body(&self) -> Option<&'a str> {
        self.body
    }

    /// Returns true if the closing marker was found.
    pub fn is_closed(&self) -> bool {
        self.body.is_some()
    }
}

/// Removes one matching pair of `"` or `'` around `value`.
pub fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
