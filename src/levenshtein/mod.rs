mod table;
pub mod types;
pub use table::DistanceTable;
pub use types::*;

/// A computed distance between two token sequences, keeping the table so the
/// edit script can be derived without recomputation.
#[derive(Debug, Clone)]
pub struct Path<T> {
    source: Vec<T>,
    target: Vec<T>,
    table: DistanceTable,
}

impl<T: PartialEq + Clone> Path<T> {
    /// Builds the distance table between `source` and `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use editpath::{Edit, Path};
    ///
    /// let path = Path::new(vec!["Dum", "vita", "est"], vec!["spes", "est"]);
    /// assert_eq!(path.score(), 2);
    /// assert_eq!(path.edits(), vec![
    ///     Edit::Delete("Dum"),
    ///     Edit::Swap("vita", "spes"),
    ///     Edit::Keep("est"),
    /// ]);
    /// ```
    pub fn new(source: Vec<T>, target: Vec<T>) -> Self {
        let table = DistanceTable::build(&source, &target);
        Path {
            source,
            target,
            table,
        }
    }

    pub fn score(&self) -> usize {
        self.table.score()
    }

    pub fn table(&self) -> &DistanceTable {
        &self.table
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn target(&self) -> &[T] {
        &self.target
    }

    /// The optimal edit script, left to right.
    pub fn edits(&self) -> EditScript<T> {
        reconstruct(&self.table, &self.source, &self.target)
    }

    /// Score and edit script in one go, consuming the path.
    pub fn into_parts(self) -> (usize, EditScript<T>) {
        let edits = self.edits();
        (self.score(), edits)
    }
}

/// Treats each `char` of the inputs as a token.
pub fn diff_chars(source: &str, target: &str) -> Path<char> {
    Path::new(source.chars().collect(), target.chars().collect())
}

/// Treats each whitespace separated word of the inputs as a token.
pub fn diff_words(source: &str, target: &str) -> Path<String> {
    let words = |s: &str| -> Vec<String> {
        s.split_whitespace().map(ToString::to_string).collect()
    };
    Path::new(words(source), words(target))
}

/// Treats each line of the inputs as a token.
///
/// Splits on `'\n'` only so that a trailing `'\r'` stays part of its line.
pub fn diff_lines(source: &str, target: &str) -> Path<String> {
    let lines = |s: &str| -> Vec<String> {
        s.split('\n').map(ToString::to_string).collect()
    };
    Path::new(lines(source), lines(target))
}

/// Computes the Levenshtein distance between two sequences.
///
/// ```
/// assert_eq!(editpath::score(&[1, 2, 3], &[1, 3]), 1);
/// ```
pub fn score<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    DistanceTable::build(source, target).score()
}

/// Computes the minimal edit script turning `source` into `target`.
///
/// When several scripts are optimal, the one preferring Keep/Swap over
/// Insert, and Insert over Delete, walking back from the end, is returned.
///
/// # Examples
///
/// ```
/// use editpath::{edits, Edit};
///
/// let source: Vec<char> = "kitten".chars().collect();
/// let target: Vec<char> = "sitting".chars().collect();
/// assert_eq!(edits(&source, &target), vec![
///     Edit::Swap('k', 's'),
///     Edit::Keep('i'),
///     Edit::Keep('t'),
///     Edit::Keep('t'),
///     Edit::Swap('e', 'i'),
///     Edit::Keep('n'),
///     Edit::Insert('g'),
/// ]);
/// ```
pub fn edits<T: PartialEq + Clone>(source: &[T], target: &[T]) -> EditScript<T> {
    let table = DistanceTable::build(source, target);
    reconstruct(&table, source, target)
}

/// Walks `table` back from the bottom right corner to the origin, emitting
/// one edit per step.
///
/// `table` must have been built from the same `source` and `target`.
pub fn reconstruct<T: Clone>(table: &DistanceTable, source: &[T], target: &[T]) -> EditScript<T> {
    debug_assert_eq!(table.rows(), source.len() + 1);
    debug_assert_eq!(table.cols(), target.len() + 1);

    let mut changes: EditScript<T> = Vec::with_capacity(source.len().max(target.len()));
    let mut i = source.len();
    let mut j = target.len();
    while i > 0 || j > 0 {
        let current = table.get(i, j);
        // an unreachable move gets a cost above every real option
        let insert = if j > 0 { table.get(i, j - 1) } else { current + 1 };
        let delete = if i > 0 { table.get(i - 1, j) } else { current + 1 };
        let diagonal = if i > 0 && j > 0 {
            table.get(i - 1, j - 1)
        } else {
            current + 1
        };
        let best = insert.min(delete).min(diagonal);

        if best == diagonal {
            if current == diagonal {
                changes.push(Edit::Keep(source[i - 1].clone()));
            } else {
                changes.push(Edit::Swap(source[i - 1].clone(), target[j - 1].clone()));
            }
            i -= 1;
            j -= 1;
        } else if best == insert {
            changes.push(Edit::Insert(target[j - 1].clone()));
            j -= 1;
        } else {
            changes.push(Edit::Delete(source[i - 1].clone()));
            i -= 1;
        }
    }

    changes.reverse();
    tracing::debug!(
        edits = changes.len(),
        score = table.score(),
        "reconstructed edit script"
    );
    changes
}
