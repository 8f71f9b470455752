//! Value types shared with the note storage layer

use std::fmt;

/// Raw content of a single note entry
///
/// The bytes are not interpreted here; a note may hold a review request or
/// any other kind of metadata sharing the same notes ref.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Note(Vec<u8>);

impl Note {
    /// Borrow the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Note {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Note {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<String> for Note {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&str> for Note {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Name of a git notes reference, e.g. `refs/notes/devtools/reviews`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotesRef(String);

impl NotesRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotesRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NotesRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Split the content of a git note into its entries
///
/// Each non-blank line is one entry. Trailing `\r` is dropped so notes
/// edited on Windows still parse.
pub fn split_notes(content: &[u8]) -> Vec<Note> {
    content
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(Note::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_notes() {
        let notes = split_notes(b"{\"a\":1}\n\nplain text\r\n  \n{\"b\":2}\n");
        assert_eq!(
            notes,
            vec![
                Note::from("{\"a\":1}"),
                Note::from("plain text"),
                Note::from("{\"b\":2}"),
            ]
        );
    }

    #[test]
    fn test_split_notes_empty() {
        assert!(split_notes(b"").is_empty());
        assert!(split_notes(b"\n\n").is_empty());
    }

    #[test]
    fn test_split_notes_keeps_binary_lines() {
        let notes = split_notes(&[0xff, 0xfe, b'\n', b'x']);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].as_bytes(), &[0xff, 0xfe]);
    }

    #[test]
    fn test_note_display_is_lossy() {
        assert_eq!(Note::from("hello").to_string(), "hello");
        assert_eq!(Note::from(vec![b'a', 0xff]).to_string(), "a\u{fffd}");
    }

    #[test]
    fn test_notes_ref_display() {
        let notes_ref = NotesRef::from("refs/notes/devtools/reviews");
        assert_eq!(notes_ref.to_string(), "refs/notes/devtools/reviews");
        assert_eq!(notes_ref.as_str(), "refs/notes/devtools/reviews");
    }
}
