#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alias for a vector of Edit
/// Result of the edit script reconstruction, ordered left to right
pub type EditScript<T> = Vec<Edit<T>>;

/// Each element in an edit script can be
/// present in both sequences (Keep)
/// only in the source (Delete)
/// only in the target (Insert)
/// replaced at an aligned position (Swap, source token first)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edit<T> {
    Keep(T),
    Delete(T),
    Insert(T),
    Swap(T, T),
}

impl<T> Edit<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Edit::Keep(_))
    }

    /// Contribution of this edit to the distance.
    pub fn cost(&self) -> usize {
        if self.is_keep() {
            0
        } else {
            1
        }
    }

    /// The token this edit consumes from the source, if any.
    pub fn source_token(&self) -> Option<&T> {
        match self {
            Edit::Keep(t) | Edit::Delete(t) | Edit::Swap(t, _) => Some(t),
            Edit::Insert(_) => None,
        }
    }

    /// The token this edit produces in the target, if any.
    pub fn target_token(&self) -> Option<&T> {
        match self {
            Edit::Keep(t) | Edit::Insert(t) | Edit::Swap(_, t) => Some(t),
            Edit::Delete(_) => None,
        }
    }
}
