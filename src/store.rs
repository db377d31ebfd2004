//! Append-only reflection log.
//!
//! Each record is three physical lines:
//!
//! ```text
//! 작성자: <author>
//! <comment>
//!
//! ```
//!
//! Readers reconstruct records with [`parse_reflections`], which also copes
//! with hand-edited files: comments spread over several lines, records with
//! no author line, and a last record missing its closing blank line. Only a
//! line whose first characters are the marker opens a record; an indented
//! marker is ordinary comment text.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ClassroomError, Result};
use crate::models::Reflection;

pub const AUTHOR_MARKER: &str = "작성자:";
pub const DEFAULT_STORE_PATH: &str = "data.txt";

pub trait ReflectionLog {
    fn append(&mut self, reflection: &Reflection) -> Result<()>;

    /// Raw store contents, `None` when nothing has been written yet.
    fn read_text(&self) -> Result<Option<String>>;

    fn read_all(&self) -> Result<Vec<Reflection>> {
        Ok(self
            .read_text()?
            .map(|text| parse_reflections(&text))
            .unwrap_or_default())
    }
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReflectionLog for FileStore {
    fn append(&mut self, reflection: &Reflection) -> Result<()> {
        let record = format_record(reflection);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.as_bytes())?;
        file.flush()?;
        info!(path = %self.path.display(), bytes = record.len(), "appended reflection");
        Ok(())
    }

    fn read_text(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                debug!(path = %self.path.display(), bytes = text.len(), "read store");
                Ok(Some(text))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store not created yet");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory log using the same on-disk text format.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    text: Option<String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[cfg(test)]
impl ReflectionLog for MemoryStore {
    fn append(&mut self, reflection: &Reflection) -> Result<()> {
        self.text
            .get_or_insert_with(String::new)
            .push_str(&format_record(reflection));
        Ok(())
    }

    fn read_text(&self) -> Result<Option<String>> {
        Ok(self.text.clone())
    }
}

/// Validates and appends one reflection. Nothing is written on rejection.
pub fn submit<L: ReflectionLog + ?Sized>(
    log: &mut L,
    author: &str,
    comment: &str,
) -> Result<Reflection> {
    let author = collapse_lines(author);
    let comment = collapse_lines(comment);

    if author.is_empty() || comment.is_empty() {
        warn!(
            author_missing = author.is_empty(),
            comment_missing = comment.is_empty(),
            "rejected reflection"
        );
        return Err(ClassroomError::MissingInput);
    }

    if comment.starts_with(AUTHOR_MARKER) {
        warn!("rejected reflection starting with the author marker");
        return Err(ClassroomError::MarkerInComment(AUTHOR_MARKER));
    }

    let reflection = Reflection::new(author, comment);
    log.append(&reflection)?;
    Ok(reflection)
}

pub fn format_record(reflection: &Reflection) -> String {
    format!(
        "{} {}\n{}\n\n",
        AUTHOR_MARKER, reflection.author, reflection.comment
    )
}

/// Trims every line, drops blank ones and joins the rest with single spaces.
fn collapse_lines(input: &str) -> String {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

enum ParseState {
    Idle,
    Accumulating(Reflection),
}

impl ParseState {
    fn flush_into(self, out: &mut Vec<Reflection>) {
        if let ParseState::Accumulating(current) = self {
            if !current.is_empty() {
                out.push(current);
            }
        }
    }
}

pub fn parse_reflections(text: &str) -> Vec<Reflection> {
    let mut reflections = Vec::new();
    let mut state = ParseState::Idle;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(author) = line.strip_prefix(AUTHOR_MARKER) {
            state.flush_into(&mut reflections);
            state = ParseState::Accumulating(Reflection::new(author.trim(), ""));
        } else if trimmed.is_empty() {
            state = match state {
                ParseState::Accumulating(current) if current.is_empty() => {
                    ParseState::Accumulating(current)
                }
                other => {
                    other.flush_into(&mut reflections);
                    ParseState::Idle
                }
            };
        } else {
            let mut current = match state {
                ParseState::Idle => Reflection::default(),
                ParseState::Accumulating(current) => current,
            };
            current.comment.push_str(trimmed);
            current.comment.push(' ');
            state = ParseState::Accumulating(current);
        }
    }

    state.flush_into(&mut reflections);
    reflections
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "작성자: Alice\nI love AI ethics\n\n작성자: Bob\nAI AI ethics rocks\n\n";

    #[test]
    fn parses_sample_store() {
        let reflections = parse_reflections(SAMPLE);
        assert_eq!(
            reflections,
            vec![
                Reflection::new("Alice", "I love AI ethics "),
                Reflection::new("Bob", "AI AI ethics rocks "),
            ]
        );
    }

    #[test]
    fn joins_multiline_comments_with_spaces() {
        let text = "작성자: Kiara\n  first line \nsecond line\n\n";
        let reflections = parse_reflections(text);
        assert_eq!(reflections.len(), 1);
        assert_eq!(reflections[0].comment, "first line second line ");
    }

    #[test]
    fn record_without_marker_is_anonymous() {
        let reflections = parse_reflections("just a thought\n\n작성자: Jules\nhello\n");
        assert_eq!(reflections[0].author, "");
        assert_eq!(reflections[0].display_author(), crate::models::ANONYMOUS_LABEL);
        assert_eq!(reflections[1], Reflection::new("Jules", "hello "));
    }

    #[test]
    fn trailing_record_without_blank_line_is_kept() {
        let reflections = parse_reflections("작성자: Avery\nlast words");
        assert_eq!(reflections, vec![Reflection::new("Avery", "last words ")]);
    }

    #[test]
    fn consecutive_markers_flush_previous_record() {
        let reflections = parse_reflections("작성자: A\n작성자: B\ncomment\n");
        assert_eq!(
            reflections,
            vec![Reflection::new("A", ""), Reflection::new("B", "comment ")]
        );
    }

    #[test]
    fn indented_marker_is_comment_text() {
        let reflections = parse_reflections("작성자: Kiara\n  작성자: quoted\n");
        assert_eq!(
            reflections,
            vec![Reflection::new("Kiara", "작성자: quoted ")]
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_reflections("").is_empty());
        assert!(parse_reflections("\n\n   \n").is_empty());
    }

    #[test]
    fn submit_rejects_blank_fields_without_writing() {
        let mut log = MemoryStore::new();
        for (author, comment) in [("", "x"), ("x", ""), ("", ""), ("  ", "\n\t")] {
            let err = submit(&mut log, author, comment).unwrap_err();
            assert!(matches!(err, ClassroomError::MissingInput));
        }
        assert_eq!(log.read_text().unwrap(), None);
    }

    #[test]
    fn submit_rejects_comment_opening_with_marker() {
        let mut log = MemoryStore::new();
        let err = submit(&mut log, "Alice", "  작성자: 라는 단어가 재밌어요").unwrap_err();
        assert!(matches!(err, ClassroomError::MarkerInComment(AUTHOR_MARKER)));
        assert!(err.is_validation());
        assert_eq!(log.read_text().unwrap(), None);

        submit(&mut log, "Alice", "단어 작성자: 가 재밌어요").unwrap();
        assert_eq!(
            log.read_all().unwrap(),
            vec![Reflection::new("Alice", "단어 작성자: 가 재밌어요 ")]
        );
    }

    #[test]
    fn submitted_reflection_round_trips() {
        let mut log = MemoryStore::new();
        submit(&mut log, " Alice ", "I love\n\n  AI ethics ").unwrap();
        let reflections = log.read_all().unwrap();
        assert_eq!(reflections.len(), 1);
        assert_eq!(reflections[0].author, "Alice");
        assert_eq!(reflections[0].comment.trim_end(), "I love AI ethics");
    }

    #[test]
    fn file_store_appends_in_submission_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data.txt"));

        submit(&mut store, "Alice", "I love AI ethics").unwrap();
        submit(&mut store, "Bob", "AI AI ethics rocks").unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, SAMPLE);
        let authors: Vec<_> = store
            .read_all()
            .unwrap()
            .into_iter()
            .map(|r| r.author)
            .collect();
        assert_eq!(authors, vec!["Alice", "Bob"]);
    }

    #[test]
    fn rejected_submit_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data.txt"));
        submit(&mut store, "Alice", "hello").unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        assert!(submit(&mut store, "", "x").is_err());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.txt"));
        assert_eq!(store.read_text().unwrap(), None);
        assert!(store.read_all().unwrap().is_empty());
    }
}
