mod types;
pub use types::*;

use crate::levenshtein::Edit;
use crate::serialization::PatchError;
use std::collections::VecDeque;
use std::fmt::Debug;

struct HunkBuilder<T> {
    context: usize,
    source_line: usize,
    target_line: usize,
    current: Option<Hunk<T>>,
    // Keep edits seen since the last change of the open hunk
    trailing: Vec<Edit<T>>,
    context_buffer: VecDeque<Edit<T>>,
    hunks: Vec<Hunk<T>>,
}

impl<T> HunkBuilder<T> {
    fn new(options: HunkOptions) -> Self {
        HunkBuilder {
            context: options.context,
            source_line: 0,
            target_line: 0,
            current: None,
            trailing: vec![],
            context_buffer: VecDeque::new(),
            hunks: vec![],
        }
    }

    fn process(&mut self, edit: Edit<T>) {
        match edit {
            Edit::Keep(el) => {
                if self.current.is_some() {
                    self.trailing.push(Edit::Keep(el));
                    // a gap wider than both contexts splits the hunks
                    if self.trailing.len() > self.context.saturating_mul(2) {
                        self.close();
                    }
                } else {
                    self.push_context(Edit::Keep(el));
                }
                self.source_line += 1;
                self.target_line += 1;
            }
            modify => {
                let (source_step, target_step) = match modify {
                    Edit::Insert(_) => (0, 1),
                    Edit::Delete(_) => (1, 0),
                    _ => (1, 1),
                };
                if let Some(ref mut c) = self.current {
                    c.changes.append(&mut self.trailing);
                    c.changes.push(modify);
                } else {
                    let leading = self.context_buffer.len();
                    let mut changes: Vec<Edit<T>> = self.context_buffer.drain(..).collect();
                    changes.push(modify);
                    self.current = Some(Hunk {
                        source_start: self.source_line - leading,
                        target_start: self.target_line - leading,
                        changes,
                    });
                }
                self.source_line += source_step;
                self.target_line += target_step;
            }
        }
    }

    fn push_context(&mut self, edit: Edit<T>) {
        if self.context == 0 {
            return;
        }
        self.context_buffer.push_back(edit);
        while self.context_buffer.len() > self.context {
            self.context_buffer.pop_front();
        }
    }

    fn close(&mut self) {
        if let Some(mut c) = self.current.take() {
            let rest = self.trailing.split_off(self.context.min(self.trailing.len()));
            c.changes.append(&mut self.trailing);
            self.hunks.push(c);
            for edit in rest {
                self.push_context(edit);
            }
        }
    }

    fn finish(mut self) -> Vec<Hunk<T>> {
        self.close();
        self.hunks
    }
}

/// Groups an edit script into hunks with the default amount of context.
///
/// # Examples
///
/// ```
/// use editpath::{edits, Edit};
/// use editpath::patch::hunks;
///
/// let result = hunks(edits(&[1, 2, 3, 4, 5], &[1, 2, 9, 4, 5]));
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].changes[2], Edit::Swap(3, 9));
/// ```
pub fn hunks<T>(edits: Vec<Edit<T>>) -> Vec<Hunk<T>> {
    hunks_with(edits, HunkOptions::default())
}

/// Groups an edit script into hunks. Changes separated by at most
/// `2 * options.context` Keep edits share a hunk.
pub fn hunks_with<T>(edits: Vec<Edit<T>>, options: HunkOptions) -> Vec<Hunk<T>> {
    let mut builder = HunkBuilder::new(options);
    for edit in edits {
        builder.process(edit);
    }
    let result = builder.finish();
    tracing::trace!(hunks = result.len(), context = options.context, "cut hunks");
    result
}

/// Replays the source side of an edit script.
pub fn source_of<T: Clone>(edits: &[Edit<T>]) -> Vec<T> {
    edits.iter().filter_map(|e| e.source_token().cloned()).collect()
}

/// Replays the target side of an edit script.
pub fn target_of<T: Clone>(edits: &[Edit<T>]) -> Vec<T> {
    edits.iter().filter_map(|e| e.target_token().cloned()).collect()
}

/// Rebuilds the target sequence from `source` and a list of hunks, checking
/// every token a hunk expects to find in `source` and that each hunk starts at
/// its declared target position.
pub fn apply<T: PartialEq + Clone + Debug>(
    source: &[T],
    hunks: &[Hunk<T>],
) -> Result<Vec<T>, PatchError> {
    let mut result = vec![];
    let mut source_line = 0;

    for hunk in hunks {
        if hunk.source_start < source_line || hunk.source_start > source.len() {
            tracing::debug!(
                start = hunk.source_start,
                position = source_line,
                "hunk out of order"
            );
            return Err(PatchError::InvalidFormat(format!(
                "Cannot apply hunk starting at {} from position {}",
                hunk.source_start, source_line
            )));
        }
        result.extend_from_slice(&source[source_line..hunk.source_start]);
        source_line = hunk.source_start;
        if hunk.target_start != result.len() {
            tracing::debug!(
                start = hunk.target_start,
                position = result.len(),
                "hunk target offset mismatch"
            );
            return Err(PatchError::InvalidFormat(format!(
                "Hunk at source {} declares target {} but output is at {}",
                hunk.source_start,
                hunk.target_start,
                result.len()
            )));
        }

        for change in &hunk.changes {
            if let Some(expected) = change.source_token() {
                match source.get(source_line) {
                    Some(found) if found == expected => {}
                    found => {
                        tracing::debug!(line = source_line, "context mismatch");
                        return Err(PatchError::ContextMismatch {
                            line: source_line,
                            expected: format!("{:?}", expected),
                            found: found
                                .map_or_else(|| "end of input".to_string(), |f| format!("{:?}", f)),
                        });
                    }
                }
                source_line += 1;
            }
            if let Some(produced) = change.target_token() {
                result.push(produced.clone());
            }
        }
    }
    result.extend_from_slice(&source[source_line..]);

    Ok(result)
}
