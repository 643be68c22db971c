// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git log stream parsing
//!
//! This module turns the output of a single `git log -p` invocation (see
//! [`crate::source::LOG_FORMAT`]) into a lazy sequence of [`Commit`] records.
//!
//! Each commit section of the stream looks like this:
//!
//! ```text
//! 1945ab9c752534e733c38ba0109dc3b741f0a6eb
//! title,Fix parser
//! date,2026-01-17T02:33:06+01:00
//! name,Test Author
//! email,test@example.com
//! Body line one
//!
//! Body line three
//!
//! \0
//!
//! diff --git a/src/lib.rs b/src/lib.rs
//! ...
//! ```
//!
//! The hash line starts a record, the four metadata lines follow in a fixed
//! order, the message body runs up to a line holding a single NUL byte, and
//! the patch runs up to the next hash line or the end of the stream.
//!
//! A patch body never contains a bare hash line: every line of a diff body
//! starts with a prefix character (` `, `+`, `-`, `\`) and header lines start
//! with a keyword. The parser relies on this and does not track hunks.

use std::io::{self, BufRead};

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::commit::Commit;
use crate::error::GitError;

/// Line that terminates the message block (emitted by `%x00`)
pub const MESSAGE_END: &[u8] = b"\0";

/// Iterator over the lines of a byte reader, with `\n` terminators removed
///
/// Lines are returned as raw bytes; decoding is left to the consumer since
/// patch content is arbitrary file data.
#[derive(Debug)]
pub struct ByteLines<R> {
    reader: R,
}

impl<R: BufRead> ByteLines<R> {
    /// Wrap a buffered reader
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Iterator for ByteLines<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                Some(Ok(buf))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Parse a complete log stream from a reader
///
/// # Example
///
/// ```
/// use gitlogfeed_git::parser::parse_log;
///
/// let log = "1945ab9c752534e733c38ba0109dc3b741f0a6eb\n\
///            title,Initial commit\n\
///            date,2026-01-17T02:33:06+00:00\n\
///            name,Test Author\n\
///            email,test@example.com\n\
///            \n\
///            \0\n";
/// let commits: Vec<_> = parse_log(log.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(commits.len(), 1);
/// assert_eq!(commits[0].title, "Initial commit");
/// assert!(commits[0].message.is_empty());
/// ```
pub fn parse_log<R: BufRead>(reader: R) -> LogParser<ByteLines<R>> {
    LogParser::new(ByteLines::new(reader))
}

/// Metadata fields, in the order they appear after the hash line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Date,
    Name,
    Email,
}

impl Field {
    fn key(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Date => "date",
            Field::Name => "name",
            Field::Email => "email",
        }
    }

    fn next(self) -> Option<Field> {
        match self {
            Field::Title => Some(Field::Date),
            Field::Date => Some(Field::Name),
            Field::Name => Some(Field::Email),
            Field::Email => None,
        }
    }
}

/// Parser states; every state past `AwaitingHash` owns the record being built
#[derive(Debug)]
enum State {
    AwaitingHash,
    ReadingMetadata(Field, Draft),
    ReadingMessage(Draft),
    ReadingPatch(Draft),
}

/// A commit record being filled in field by field
#[derive(Debug)]
struct Draft {
    hash: String,
    title: Option<String>,
    date: Option<DateTime<FixedOffset>>,
    author_name: Option<String>,
    author_email: Option<String>,
    message: Vec<String>,
    patch: Vec<Vec<u8>>,
}

impl Draft {
    fn new(hash: String) -> Self {
        Self {
            hash,
            title: None,
            date: None,
            author_name: None,
            author_email: None,
            message: Vec::new(),
            patch: Vec::new(),
        }
    }

    fn set(&mut self, field: Field, value: &str, line: usize) -> Result<(), GitError> {
        match field {
            Field::Title => self.title = Some(value.to_string()),
            Field::Date => {
                let date = DateTime::parse_from_rfc3339(value).map_err(|e| {
                    GitError::malformed(line, format!("invalid date `{value}`: {e}"))
                })?;
                self.date = Some(date);
            }
            Field::Name => self.author_name = Some(value.to_string()),
            Field::Email => self.author_email = Some(value.to_string()),
        }
        Ok(())
    }

    fn into_commit(mut self, line: usize) -> Result<Commit, GitError> {
        while self.patch.last().is_some_and(|l| l.is_empty()) {
            self.patch.pop();
        }

        let missing =
            |field: Field| GitError::malformed(line, format!("missing `{}`", field.key()));

        Ok(Commit {
            title: self.title.ok_or_else(|| missing(Field::Title))?,
            date: self.date.ok_or_else(|| missing(Field::Date))?,
            author_name: self.author_name.ok_or_else(|| missing(Field::Name))?,
            author_email: self.author_email.ok_or_else(|| missing(Field::Email))?,
            hash: self.hash,
            message: self.message,
            patch: self.patch,
        })
    }
}

/// Lazy parser turning a stream of log lines into [`Commit`] records
///
/// The parser reads one line past the end of each patch (the next hash
/// line) and keeps it for the following record. After the first error it
/// yields `None`.
#[derive(Debug)]
pub struct LogParser<I> {
    lines: I,
    line_no: usize,
    pending_hash: Option<String>,
    done: bool,
}

impl<I> LogParser<I>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    /// Create a parser over a line iterator
    #[must_use]
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            line_no: 0,
            pending_hash: None,
            done: false,
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    fn next_line(&mut self) -> Result<Option<Vec<u8>>, GitError> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn decode(&self, line: Vec<u8>) -> Result<String, GitError> {
        String::from_utf8(line).map_err(|_| GitError::malformed(self.line_no, "not valid UTF-8"))
    }

    fn parse_record(&mut self) -> Result<Option<Commit>, GitError> {
        let mut state = match self.pending_hash.take() {
            Some(hash) => State::ReadingMetadata(Field::Title, Draft::new(hash)),
            None => State::AwaitingHash,
        };

        loop {
            let Some(line) = self.next_line()? else {
                return self.end_of_stream(state);
            };

            state = match state {
                State::AwaitingHash => {
                    if line.is_empty() {
                        State::AwaitingHash
                    } else {
                        let text = self.decode(line)?;
                        if !Commit::is_valid_hash(&text) {
                            return Err(GitError::malformed(
                                self.line_no,
                                format!("expected a commit hash, found `{text}`"),
                            ));
                        }
                        State::ReadingMetadata(Field::Title, Draft::new(text))
                    }
                }
                State::ReadingMetadata(field, mut draft) => {
                    let text = self.decode(line)?;
                    let Some((key, value)) = text.split_once(',') else {
                        return Err(GitError::malformed(
                            self.line_no,
                            format!("expected `{},<value>`, found `{text}`", field.key()),
                        ));
                    };
                    if key != field.key() {
                        return Err(GitError::malformed(
                            self.line_no,
                            format!("expected key `{}`, found `{key}`", field.key()),
                        ));
                    }
                    draft.set(field, value, self.line_no)?;
                    match field.next() {
                        Some(next) => State::ReadingMetadata(next, draft),
                        None => State::ReadingMessage(draft),
                    }
                }
                State::ReadingMessage(mut draft) => {
                    if line == MESSAGE_END {
                        while draft.message.last().is_some_and(|l| l.trim().is_empty()) {
                            draft.message.pop();
                        }
                        State::ReadingPatch(draft)
                    } else {
                        let text = self.decode(line)?;
                        draft.message.push(text);
                        State::ReadingMessage(draft)
                    }
                }
                State::ReadingPatch(mut draft) => {
                    if let Some(hash) = as_hash(&line) {
                        self.pending_hash = Some(hash.to_string());
                        return self.finish(draft).map(Some);
                    }
                    // Separator lines between the message and the first diff line
                    if !(line.is_empty() && draft.patch.is_empty()) {
                        draft.patch.push(line);
                    }
                    State::ReadingPatch(draft)
                }
            };
        }
    }

    fn end_of_stream(&self, state: State) -> Result<Option<Commit>, GitError> {
        match state {
            State::AwaitingHash => Ok(None),
            State::ReadingPatch(draft) => self.finish(draft).map(Some),
            State::ReadingMetadata(field, draft) => Err(GitError::malformed(
                self.line_no,
                format!(
                    "log ended before `{}` of commit {}",
                    field.key(),
                    draft.hash
                ),
            )),
            State::ReadingMessage(draft) => Err(GitError::malformed(
                self.line_no,
                format!("log ended inside the message of commit {}", draft.hash),
            )),
        }
    }

    fn finish(&self, draft: Draft) -> Result<Commit, GitError> {
        let commit = draft.into_commit(self.line_no)?;
        debug!(
            hash = %commit.short_hash(),
            message_lines = commit.message.len(),
            patch_lines = commit.patch.len(),
            "Parsed commit"
        );
        Ok(commit)
    }
}

impl<I> Iterator for LogParser<I>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    type Item = Result<Commit, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.parse_record() {
            Ok(Some(commit)) => Some(Ok(commit)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<I> std::iter::FusedIterator for LogParser<I> where I: Iterator<Item = io::Result<Vec<u8>>> {}

fn as_hash(line: &[u8]) -> Option<&str> {
    std::str::from_utf8(line)
        .ok()
        .filter(|text| Commit::is_valid_hash(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const HASH_A: &str = "1945ab9c752534e733c38ba0109dc3b741f0a6eb";
    const HASH_B: &str = "c460aeb7fb2d109c17e43de0ce681faec0b7374d";
    const DATE: &str = "2026-01-17T02:33:06+01:00";

    /// Build one commit section the way `git log -p` prints it
    fn section(hash: &str, title: &str, body: &[&str], patch: &[&str]) -> String {
        let mut out = format!(
            "{hash}\ntitle,{title}\ndate,{DATE}\nname,Test Author\nemail,test@example.com\n"
        );
        for line in body {
            out.push_str(line);
            out.push('\n');
        }
        // `%n` before the terminator
        out.push_str("\n\0\n");
        if !patch.is_empty() {
            out.push('\n');
            for line in patch {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    fn parse_all(input: &str) -> Result<Vec<Commit>, GitError> {
        parse_log(input.as_bytes()).collect()
    }

    fn sample_patch() -> Vec<&'static str> {
        vec![
            "diff --git a/x b/x",
            "index 1..2 100644",
            "--- a/x",
            "+++ b/x",
            "@@ -1 +1 @@",
            "-old",
            "+new",
        ]
    }

    #[test]
    fn test_parse_single_commit() {
        let input = section(HASH_A, "Fix parser", &["Body line"], &sample_patch());
        let commits = parse_all(&input).expect("Should parse");

        assert_eq!(commits.len(), 1);
        let commit = &commits[0];
        assert_eq!(commit.hash, HASH_A);
        assert_eq!(commit.title, "Fix parser");
        assert_eq!(commit.date.to_rfc3339(), DATE);
        assert_eq!(commit.author_name, "Test Author");
        assert_eq!(commit.author_email, "test@example.com");
        assert_eq!(commit.message, vec!["Body line".to_string()]);
        let expected: Vec<Vec<u8>> = sample_patch()
            .into_iter()
            .map(|l| l.as_bytes().to_vec())
            .collect();
        assert_eq!(commit.patch, expected);
    }

    #[test]
    fn test_parse_multiple_commits_in_order() {
        let input = format!(
            "{}{}",
            section(HASH_A, "second commit", &[], &sample_patch()),
            section(HASH_B, "first commit", &[], &sample_patch())
        );
        let commits = parse_all(&input).expect("Should parse");

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].hash, HASH_A);
        assert_eq!(commits[0].title, "second commit");
        assert_eq!(commits[1].hash, HASH_B);
        assert_eq!(commits[1].title, "first commit");
        assert_eq!(commits[0].patch.len(), 7);
        assert_eq!(commits[1].patch.len(), 7);
    }

    #[test]
    fn test_empty_message_block() {
        let input = section(HASH_A, "only a title", &[], &[]);
        let commits = parse_all(&input).expect("Should parse");
        assert!(commits[0].message.is_empty());
    }

    #[test]
    fn test_message_keeps_embedded_blank_lines() {
        let input = section(
            HASH_A,
            "title",
            &["first paragraph", "", "second paragraph"],
            &[],
        );
        let commits = parse_all(&input).expect("Should parse");
        assert_eq!(
            commits[0].message,
            vec![
                "first paragraph".to_string(),
                String::new(),
                "second paragraph".to_string()
            ]
        );
    }

    #[test]
    fn test_message_line_that_looks_like_a_hash() {
        let input = section(HASH_A, "Revert", &["This reverts", HASH_B], &[]);
        let commits = parse_all(&input).expect("Should parse");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message[1], HASH_B);
    }

    #[test]
    fn test_metadata_value_with_comma() {
        let input = section(HASH_A, "a,b", &[], &[]);
        let commits = parse_all(&input).expect("Should parse");
        assert_eq!(commits[0].title, "a,b");
    }

    #[test]
    fn test_empty_title() {
        let input = section(HASH_A, "", &[], &[]);
        let commits = parse_all(&input).expect("Should parse");
        assert_eq!(commits[0].title, "");
    }

    #[test]
    fn test_commit_without_patch_is_emitted() {
        let input = format!(
            "{}{}",
            section(HASH_A, "merge", &[], &[]),
            section(HASH_B, "change", &[], &sample_patch())
        );
        let commits = parse_all(&input).expect("Should parse");

        assert_eq!(commits.len(), 2);
        assert!(commits[0].patch.is_empty());
        assert_eq!(commits[1].patch.len(), 7);
    }

    #[test]
    fn test_patch_lines_that_look_like_metadata() {
        let patch = [
            "diff --git a/log.txt b/log.txt",
            "--- a/log.txt",
            "+++ b/log.txt",
            "@@ -1,3 +1,3 @@",
            " title,unchanged",
            "-date,old",
            "+date,new",
            "\\ No newline at end of file",
        ];
        let input = section(HASH_A, "title", &[], &patch);
        let commits = parse_all(&input).expect("Should parse");

        let lines: Vec<&[u8]> = commits[0].patch.iter().map(Vec::as_slice).collect();
        let expected: Vec<&[u8]> = patch.iter().map(|l| l.as_bytes()).collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_patch_keeps_inner_blank_lines() {
        let patch = ["diff --git a/x b/x", "@@ -1 +1 @@", "", "+new"];
        let input = section(HASH_A, "title", &[], &patch);
        let commits = parse_all(&input).expect("Should parse");
        assert_eq!(commits[0].patch.len(), 4);
        assert!(commits[0].patch[2].is_empty());
    }

    #[test]
    fn test_patch_with_invalid_utf8_is_kept_raw() {
        let mut input = section(HASH_A, "binary-ish", &[], &["diff --git a/x b/x"]).into_bytes();
        input.extend_from_slice(b"+caf\xe9\n");
        let commits: Vec<Commit> = parse_log(input.as_slice())
            .collect::<Result<_, _>>()
            .expect("Should parse");
        assert_eq!(commits[0].patch[1], b"+caf\xe9".to_vec());
    }

    #[test]
    fn test_duplicate_hash_sections_are_not_merged() {
        let input = format!(
            "{}{}",
            section(HASH_A, "one", &[], &[]),
            section(HASH_A, "two", &[], &[])
        );
        let commits = parse_all(&input).expect("Should parse");
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].title, "one");
        assert_eq!(commits[1].title, "two");
    }

    #[test]
    fn test_sha256_hashes() {
        let hash = "ab12".repeat(16);
        let input = section(&hash, "sha256 repo", &[], &sample_patch());
        let commits = parse_all(&input).expect("Should parse");
        assert_eq!(commits[0].hash, hash);
    }

    #[test]
    fn test_empty_stream() {
        let commits = parse_all("").expect("Should parse");
        assert!(commits.is_empty());
    }

    #[test]
    fn test_leading_blank_lines_skipped() {
        let input = format!("\n\n{}", section(HASH_A, "title", &[], &[]));
        let commits = parse_all(&input).expect("Should parse");
        assert_eq!(commits.len(), 1);
    }

    #[test]
    fn test_truncated_metadata_is_malformed() {
        let input = format!("{HASH_A}\ntitle,cut short\ndate,{DATE}\n");
        let mut parser = parse_log(input.as_bytes());

        match parser.next() {
            Some(Err(GitError::MalformedLog { reason, .. })) => {
                assert!(reason.contains("`name`"), "unexpected reason: {reason}");
            }
            other => panic!("Expected MalformedLog, got {other:?}"),
        }
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_truncated_message_is_malformed() {
        let input = format!(
            "{HASH_A}\ntitle,t\ndate,{DATE}\nname,n\nemail,e\nbody without terminator\n"
        );
        let result = parse_all(&input);
        assert!(matches!(result, Err(GitError::MalformedLog { .. })));
    }

    #[test]
    fn test_truncated_second_commit_emits_first_then_error() {
        let input = format!(
            "{}{HASH_B}\ntitle,cut\n",
            section(HASH_A, "complete", &[], &sample_patch())
        );
        let mut parser = parse_log(input.as_bytes());

        let first = parser.next().expect("first item").expect("first commit");
        assert_eq!(first.hash, HASH_A);
        assert!(matches!(
            parser.next(),
            Some(Err(GitError::MalformedLog { .. }))
        ));
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_out_of_order_key_is_malformed() {
        let input = format!("{HASH_A}\ndate,{DATE}\ntitle,t\nname,n\nemail,e\n\n\0\n");
        match parse_all(&input) {
            Err(GitError::MalformedLog { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("expected key `title`"));
            }
            other => panic!("Expected MalformedLog, got {other:?}"),
        }
    }

    #[test]
    fn test_metadata_without_comma_is_malformed() {
        let input = format!("{HASH_A}\ntitle no comma\n");
        match parse_all(&input) {
            Err(GitError::MalformedLog { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected MalformedLog, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_date_is_malformed() {
        let input = format!("{HASH_A}\ntitle,t\ndate,yesterday\nname,n\nemail,e\n\n\0\n");
        match parse_all(&input) {
            Err(GitError::MalformedLog { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("yesterday"));
            }
            other => panic!("Expected MalformedLog, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_before_first_hash_is_malformed() {
        let input = format!("warning: something\n{}", section(HASH_A, "t", &[], &[]));
        match parse_all(&input) {
            Err(GitError::MalformedLog { line, .. }) => assert_eq!(line, 1),
            other => panic!("Expected MalformedLog, got {other:?}"),
        }
    }

    #[test]
    fn test_io_error_is_propagated() {
        let lines = vec![
            Ok(HASH_A.as_bytes().to_vec()),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")),
        ];
        let mut parser = LogParser::new(lines.into_iter());

        assert!(matches!(parser.next(), Some(Err(GitError::Io(_)))));
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_lines_read_counts_consumed_lines() {
        let input = section(HASH_A, "t", &[], &["diff --git a/x b/x"]);
        let mut parser = parse_log(input.as_bytes());
        while parser.next().is_some() {}
        assert_eq!(parser.lines_read(), input.lines().count());
    }

    #[test]
    fn test_byte_lines_without_trailing_newline() {
        let lines: Vec<Vec<u8>> = ByteLines::new(&b"one\ntwo"[..])
            .collect::<io::Result<_>>()
            .expect("Should read");
        assert_eq!(lines, vec![b"one".to_vec(), b"two".to_vec()]);
    }
}
