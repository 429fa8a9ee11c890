use crate::levenshtein::Edit;
use crate::patch::Hunk;

/// Renders a value in a unified-diff-like text format, one token per line.
///
/// Tokens must not contain `'\n'`: a token spanning lines cannot be read back.
pub trait ToPatch: Sized {
    fn to_patch(&self, old_name: Option<&str>, new_name: Option<&str>) -> String;
}

pub trait FromPatch: Sized {
    fn from_patch(s: &str) -> Result<Self, PatchError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("invalid patch format: {0}")]
    InvalidFormat(String),
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("context mismatch at token {line}: expected {expected}, found {found}")]
    ContextMismatch {
        line: usize,
        expected: String,
        found: String,
    },
}

impl<T: ToString> ToPatch for Edit<T> {
    fn to_patch(&self, _: Option<&str>, _: Option<&str>) -> String {
        match self {
            Edit::Keep(el) => format!(" {}", el.to_string()),
            Edit::Insert(el) => format!("+{}", el.to_string()),
            Edit::Delete(el) => format!("-{}", el.to_string()),
            Edit::Swap(old, new) => format!("<{}\n>{}", old.to_string(), new.to_string()),
        }
    }
}

impl FromPatch for Edit<String> {
    fn from_patch(s: &str) -> Result<Self, PatchError> {
        let mut lines = s.split('\n');
        let edit = parse_edit(lines.next().unwrap_or(""), &mut lines)?;
        match lines.next() {
            None => Ok(edit),
            Some(extra) => Err(PatchError::UnexpectedToken(extra.to_string())),
        }
    }
}

// A Swap spans two lines, so the second one is pulled from `rest`.
fn parse_edit<'a>(
    line: &str,
    rest: &mut impl Iterator<Item = &'a str>,
) -> Result<Edit<String>, PatchError> {
    match line.chars().next() {
        Some(' ') => Ok(Edit::Keep(line[1..].to_string())),
        Some('+') => Ok(Edit::Insert(line[1..].to_string())),
        Some('-') => Ok(Edit::Delete(line[1..].to_string())),
        Some('<') => match rest.next() {
            Some(next) if next.starts_with('>') => {
                Ok(Edit::Swap(line[1..].to_string(), next[1..].to_string()))
            }
            Some(next) => Err(PatchError::UnexpectedToken(next.to_string())),
            None => Err(PatchError::InvalidFormat(format!(
                "swap without replacement: {}",
                line
            ))),
        },
        _ => Err(PatchError::UnexpectedToken(line.to_string())),
    }
}

impl<T: ToString> ToPatch for Hunk<T> {
    fn to_patch(&self, _old_name: Option<&str>, _new_name: Option<&str>) -> String {
        let header = format!(
            "@@ -{},{} +{},{} @@",
            self.source_start,
            self.source_len(),
            self.target_start,
            self.target_len()
        );
        let body = self
            .changes
            .iter()
            .map(|e| e.to_patch(None, None))
            .collect::<Vec<String>>();

        format!("{}\n{}", header, body.join("\n"))
    }
}

impl<T: ToString> ToPatch for Vec<Hunk<T>> {
    fn to_patch(&self, old_name: Option<&str>, new_name: Option<&str>) -> String {
        if self.is_empty() {
            return String::new();
        }

        let header = format!(
            "--- {}\n+++ {}\n",
            old_name.unwrap_or("old"),
            new_name.unwrap_or("new")
        );
        let hunks = self
            .iter()
            .map(|h| h.to_patch(None, None))
            .collect::<Vec<String>>();
        format!("{}{}", header, hunks.join("\n"))
    }
}

impl FromPatch for Vec<Hunk<String>> {
    fn from_patch(s: &str) -> Result<Self, PatchError> {
        if s.is_empty() {
            return Ok(vec![]);
        }

        // can't use `.lines()` because of Windows \r
        // would break the roundtrip property
        let mut lines = s.split('\n');
        let first_line = lines.next().unwrap_or("");
        let second_line = lines.next().unwrap_or("");
        if !first_line.starts_with("---") || !second_line.starts_with("+++") {
            return Err(PatchError::InvalidFormat(format!(
                "{}\n{}",
                first_line, second_line
            )));
        }

        let mut current: Option<(HunkHeader, Hunk<String>)> = None;
        let mut hunks = vec![];

        while let Some(e) = lines.next() {
            if e.starts_with("@@") {
                if let Some((header, hunk)) = current.take() {
                    hunks.push(header.check(hunk)?);
                }
                let header = parse_hunk_header(e)?;
                let hunk = Hunk {
                    source_start: header.source_start,
                    target_start: header.target_start,
                    changes: vec![],
                };
                current = Some((header, hunk));
            } else if let Some((_, ref mut hunk)) = current {
                hunk.changes.push(parse_edit(e, &mut lines)?);
            } else {
                return Err(PatchError::InvalidFormat(e.to_string()));
            }
        }

        if let Some((header, hunk)) = current {
            hunks.push(header.check(hunk)?);
        }

        tracing::trace!(hunks = hunks.len(), "parsed patch");
        Ok(hunks)
    }
}

struct HunkHeader {
    source_start: usize,
    source_len: usize,
    target_start: usize,
    target_len: usize,
}

impl HunkHeader {
    fn check(&self, hunk: Hunk<String>) -> Result<Hunk<String>, PatchError> {
        if hunk.source_len() != self.source_len || hunk.target_len() != self.target_len {
            return Err(PatchError::InvalidFormat(format!(
                "hunk at -{} +{} declares {},{} tokens but holds {},{}",
                self.source_start,
                self.target_start,
                self.source_len,
                self.target_len,
                hunk.source_len(),
                hunk.target_len()
            )));
        }
        Ok(hunk)
    }
}

fn parse_hunk_header(s: &str) -> Result<HunkHeader, PatchError> {
    // s = "@@ -1,4 +1,4 @@"
    let trimmed = s.trim_start_matches("@@ ").trim_end_matches(" @@");
    let invalid = || PatchError::InvalidFormat(s.to_string());
    let mut parts = trimmed.split(' ');
    // parts = ["-1,4", "+1,4"]
    let (source_start, source_len) = parse_range(parts.next(), '-').ok_or_else(invalid)?;
    let (target_start, target_len) = parse_range(parts.next(), '+').ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(HunkHeader {
        source_start,
        source_len,
        target_start,
        target_len,
    })
}

fn parse_range(part: Option<&str>, sign: char) -> Option<(usize, usize)> {
    let (start, len) = part?.strip_prefix(sign)?.split_once(',')?;
    Some((start.parse().ok()?, len.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levenshtein::{diff_words, edits};
    use crate::patch::{apply, hunks, Hunk};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_serialization_roundtrip(
            old in prop::collection::vec("[^\n]*", 0..20usize),
            new in prop::collection::vec("[^\n]*", 0..20usize),
        ) {
            let hunks = hunks(edits(&old, &new));
            let patch = hunks.to_patch(None, None);

            prop_assert_eq!(Vec::<Hunk<String>>::from_patch(&patch).unwrap(), hunks);
        }
    }

    #[test]
    fn test_render_edits() {
        assert_eq!(Edit::Keep('a').to_patch(None, None), " a");
        assert_eq!(Edit::Delete('a').to_patch(None, None), "-a");
        assert_eq!(Edit::Insert('a').to_patch(None, None), "+a");
        assert_eq!(Edit::Swap('a', 'b').to_patch(None, None), "<a\n>b");
    }

    #[test]
    fn test_parse_swap() {
        assert_eq!(
            Edit::<String>::from_patch("<vita\n>spes"),
            Ok(Edit::Swap("vita".to_string(), "spes".to_string()))
        );
        assert!(matches!(
            Edit::<String>::from_patch("<vita"),
            Err(PatchError::InvalidFormat(_))
        ));
        assert!(matches!(
            Edit::<String>::from_patch("<vita\n+spes"),
            Err(PatchError::UnexpectedToken(_))
        ));
    }

    #[test]
    fn test_render_word_patch() {
        let path = diff_words("Dum vita est", "spes est");
        let patch = hunks(path.edits()).to_patch(Some("a.txt"), Some("b.txt"));
        assert_eq!(
            patch,
            "--- a.txt\n+++ b.txt\n@@ -0,3 +0,2 @@\n-Dum\n<vita\n>spes\n est"
        );

        let parsed = Vec::<Hunk<String>>::from_patch(&patch).unwrap();
        assert_eq!(apply(path.source(), &parsed).as_deref(), Ok(path.target()));
    }

    #[test]
    fn test_no_hunks() {
        let empty: Vec<Hunk<String>> = vec![];
        assert_eq!(empty.to_patch(None, None), "");
        assert_eq!(Vec::<Hunk<String>>::from_patch(""), Ok(vec![]));
    }

    #[test]
    fn test_missing_file_header() {
        assert!(matches!(
            Vec::<Hunk<String>>::from_patch("@@ -0,1 +0,1 @@\n a"),
            Err(PatchError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_bad_hunk_header() {
        assert!(matches!(
            Vec::<Hunk<String>>::from_patch("--- old\n+++ new\n@@ -x,1 +0,1 @@\n a"),
            Err(PatchError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_header_length_mismatch() {
        assert!(matches!(
            Vec::<Hunk<String>>::from_patch("--- old\n+++ new\n@@ -0,2 +0,1 @@\n a"),
            Err(PatchError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_unexpected_line() {
        assert_eq!(
            Vec::<Hunk<String>>::from_patch("--- old\n+++ new\n@@ -0,1 +0,1 @@\n*a"),
            Err(PatchError::UnexpectedToken("*a".to_string()))
        );
    }

    #[test]
    fn test_error_display() {
        let err = PatchError::ContextMismatch {
            line: 2,
            expected: "\"a\"".to_string(),
            found: "\"b\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "context mismatch at token 2: expected \"a\", found \"b\""
        );
    }
}
