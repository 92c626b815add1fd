//! Buffered, newline-normalizing character stream reading.
//!
//! This crate is the character-level engine that record and field
//! tokenizers consume one character at a time: a refillable window of
//! characters, one character of lookahead, detection of one- or
//! two-character line separators irrespective of window boundaries,
//! collapse of a detected two-character separator into a single normalized
//! character, and running line/character counters for diagnostics.
//!
//! The window is supplied by a pluggable [`BufferSource`]:
//! [`ReadSource`] decodes UTF-8 from any [`std::io::Read`] implementor,
//! [`StringSource`] serves in-memory input in fixed-size windows, and
//! [`PrefetchSource`] wraps any other source with a prefetching worker
//! thread behind the same contract.
//!
//! ```
//! use charstream::{CharInputReader, LineSeparator, ReaderOptions, StringSource, EOF_CHAR};
//!
//! let mut reader = CharInputReader::new(ReaderOptions {
//!     line_separator: LineSeparator::CRLF,
//!     normalized_newline: '\n',
//! });
//! reader.start(StringSource::new("a\r\nb"))?;
//!
//! assert_eq!(reader.next_char()?, 'a');
//! assert_eq!(reader.next_char()?, '\n');
//! assert_eq!(reader.next_char()?, 'b');
//! assert_eq!(reader.next_char()?, EOF_CHAR);
//! assert_eq!(reader.line_count(), 1);
//! assert_eq!(reader.char_count(), 4);
//! # Ok::<(), std::io::Error>(())
//! ```

mod error;
mod options;
mod reader;
mod source;

pub use error::{InvalidLineSeparator, SkipError};
pub use options::{LineSeparator, ReaderOptions};
pub use reader::{CharInputReader, EOF_CHAR};
pub use source::{BufferSource, PrefetchSource, ReadSource, Refill, StringSource};
