/// Minimal edit costs between every prefix of a source and every prefix of a
/// target sequence.
///
/// `get(i, j)` is the number of single token inserts, deletes and swaps
/// needed to turn `source[..i]` into `target[..j]`. The table has
/// `source.len() + 1` rows and `target.len() + 1` columns and is never
/// modified once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    cells: Vec<usize>,
    rows: usize,
    cols: usize,
}

impl DistanceTable {
    /// Fills the table row by row using the Wagner-Fischer recurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use editpath::levenshtein::DistanceTable;
    ///
    /// let source: Vec<char> = "kitten".chars().collect();
    /// let target: Vec<char> = "sitting".chars().collect();
    /// let table = DistanceTable::build(&source, &target);
    /// assert_eq!(table.score(), 3);
    /// assert_eq!(table.get(6, 0), 6);
    /// ```
    pub fn build<T: PartialEq>(source: &[T], target: &[T]) -> Self {
        let rows = source.len() + 1;
        let cols = target.len() + 1;
        let mut cells = vec![0; rows * cols];

        for (j, cell) in cells.iter_mut().take(cols).enumerate() {
            *cell = j;
        }
        for i in 1..rows {
            cells[i * cols] = i;
            for j in 1..cols {
                let cost = if source[i - 1] == target[j - 1] { 0 } else { 1 };
                let delete = cells[(i - 1) * cols + j] + 1;
                let insert = cells[i * cols + j - 1] + 1;
                let diagonal = cells[(i - 1) * cols + j - 1] + cost;
                cells[i * cols + j] = delete.min(insert).min(diagonal);
            }
        }

        let table = DistanceTable { cells, rows, cols };
        tracing::trace!(rows, cols, score = table.score(), "built distance table");
        table
    }

    /// Cost of turning the first `i` source tokens into the first `j` target
    /// tokens.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows()` or `j >= cols()`.
    pub fn get(&self, i: usize, j: usize) -> usize {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        self.cells[i * self.cols + j]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The overall edit distance, i.e. the bottom right cell.
    pub fn score(&self) -> usize {
        self.cells[self.cells.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    proptest! {
        #[test]
        fn test_base_cases(source: Vec<u8>, target: Vec<u8>) {
            let table = DistanceTable::build(&source, &target);
            prop_assert_eq!(table.rows(), source.len() + 1);
            prop_assert_eq!(table.cols(), target.len() + 1);
            for i in 0..table.rows() {
                prop_assert_eq!(table.get(i, 0), i);
            }
            for j in 0..table.cols() {
                prop_assert_eq!(table.get(0, j), j);
            }
        }

        #[test]
        fn test_recurrence(
            source in prop::collection::vec(0u8..4, 0..12),
            target in prop::collection::vec(0u8..4, 0..12),
        ) {
            let table = DistanceTable::build(&source, &target);
            for i in 1..table.rows() {
                for j in 1..table.cols() {
                    let cost = usize::from(source[i - 1] != target[j - 1]);
                    let expected = (table.get(i - 1, j) + 1)
                        .min(table.get(i, j - 1) + 1)
                        .min(table.get(i - 1, j - 1) + cost);
                    prop_assert_eq!(table.get(i, j), expected);
                }
            }
        }
    }

    #[test]
    fn test_empty_inputs() {
        let table = DistanceTable::build::<char>(&[], &[]);
        assert_eq!(table.rows(), 1);
        assert_eq!(table.cols(), 1);
        assert_eq!(table.score(), 0);
    }

    #[test]
    fn test_kitten_sitting_last_row() {
        let table = DistanceTable::build(&chars("kitten"), &chars("sitting"));
        let last_row: Vec<usize> = (0..table.cols()).map(|j| table.get(6, j)).collect();
        assert_eq!(last_row, vec![6, 6, 5, 4, 3, 3, 2, 3]);
        assert_eq!(table.score(), 3);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds() {
        let table = DistanceTable::build(&chars("ab"), &chars("a"));
        table.get(3, 0);
    }
}
