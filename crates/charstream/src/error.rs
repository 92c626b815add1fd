use std::io;

use thiserror::Error;

/// The configured line separator is empty or longer than two characters.
///
/// Raised when a [`LineSeparator`](crate::LineSeparator) is constructed,
/// never during streaming: a reader only ever holds an already-validated
/// separator.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid line separator: expected 1 to 2 characters, got {len}")]
pub struct InvalidLineSeparator {
    /// Number of characters in the rejected sequence.
    pub len: usize,
}

/// Failure of [`CharInputReader::skip_lines`](crate::CharInputReader::skip_lines).
#[derive(Debug, Error)]
pub enum SkipError {
    /// The input ran out before the requested number of line separators was
    /// seen. The stream is left at end of input, not rolled back.
    #[error("unable to skip {requested} lines from line {from_line}: end of input reached")]
    EndOfInput {
        /// Number of lines the caller asked to skip.
        requested: usize,
        /// Line count at the moment the skip started.
        from_line: usize,
    },
    /// The underlying source failed while the skip was advancing.
    #[error(transparent)]
    Io(#[from] io::Error),
}
