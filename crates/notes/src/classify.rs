//! Deciding which directory entries are notes.

use std::path::Path;

use walkdir::DirEntry;

/// File extension (without the dot) recognised as a note.
pub const NOTE_EXTENSION: &str = "md";

/// What the scanner should do with a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Descend into it; never a note itself.
    Directory,
    /// A note candidate to read and parse.
    Note,
    /// Anything else; skipped silently.
    Other,
}

impl EntryKind {
    /// Classifies an entry from its directory flag and path.
    pub fn of(path: &Path, is_dir: bool) -> Self {
        if is_dir {
            EntryKind::Directory
        } else if is_note_file(path) {
            EntryKind::Note
        } else {
            EntryKind::Other
        }
    }

    /// Classifies a walked directory entry.
    pub fn of_entry(entry: &DirEntry) -> Self {
        Self::of(entry.path(), entry.file_type().is_dir())
    }

    /// Returns true for [`EntryKind::Note`].
    pub fn is_note(self) -> bool {
        self == EntryKind::Note
    }
}

/// Returns true if `path` has the note extension, ignoring case.
///
/// Only the extension is checked, so `.md` directories are not excluded here;
/// use [`EntryKind::of`] when the directory flag is known.
pub fn is_note_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NOTE_EXTENSION))
}
