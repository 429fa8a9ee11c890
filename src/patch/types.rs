use crate::levenshtein::Edit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a Hunk cut out of an edit script.
/// Please note that `changes` will include at most `context` Keep edits on
/// each side of the non-Keep run, and this is reflected in the start values.
/// Both starts are zero based token positions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hunk<T> {
    pub source_start: usize,
    pub target_start: usize,
    pub changes: Vec<Edit<T>>,
}

impl<T> Hunk<T> {
    /// Number of source tokens the hunk covers.
    pub fn source_len(&self) -> usize {
        self.changes.iter().filter(|e| e.source_token().is_some()).count()
    }

    /// Number of target tokens the hunk covers.
    pub fn target_len(&self) -> usize {
        self.changes.iter().filter(|e| e.target_token().is_some()).count()
    }
}

/// How hunks are cut from an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkOptions {
    /// Keep edits shown around each change.
    pub context: usize,
}

impl Default for HunkOptions {
    fn default() -> Self {
        HunkOptions { context: 3 }
    }
}
