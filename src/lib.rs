pub mod levenshtein;
pub mod patch;
pub mod serialization;

pub use levenshtein::{edits, score, Edit, EditScript, Path};
