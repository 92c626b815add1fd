//! The buffered lookahead reader.
//!
//! The reader keeps one window of characters supplied by a
//! [`BufferSource`] plus a single character of lookahead, which is enough to
//! detect a two-character line separator without backtracking. Detection is
//! value-based against the lookahead rather than position-based within the
//! window, so a separator split across two physically distinct windows is
//! still collapsed into one normalized character, counted as one line, and
//! counted as two raw characters.
//!
//! Counting is retrospective: a window's contribution to the character count
//! is finalized when the next refill replaces it, and `char_count()` adds
//! the in-window cursor on top. The count follows the untranslated input, so
//! normalization never changes it.


use std::io;

use crate::error::SkipError;
use crate::options::{LineSeparator, ReaderOptions};
use crate::source::{BufferSource, Refill};

/// Sentinel returned by [`CharInputReader::next_char`] once the input is
/// exhausted. Exhaustion is steady state, not an error: every later call
/// keeps returning this value.
pub const EOF_CHAR: char = '\0';

/// A buffered character reader that normalizes line separators and tracks
/// line and character positions.
///
/// Windows of raw characters come from a [`BufferSource`] attached via
/// [`start`](CharInputReader::start); the reader advances through them one
/// character at a time, refilling transparently. The reader is
/// single-threaded and synchronous; a refill may block on the source.
///
/// ```
/// use charstream::{CharInputReader, LineSeparator, ReaderOptions, StringSource, EOF_CHAR};
///
/// let mut reader = CharInputReader::new(ReaderOptions {
///     line_separator: LineSeparator::CRLF,
///     normalized_newline: '\n',
/// });
/// reader.start(StringSource::new("a\r\nb"))?;
///
/// assert_eq!(reader.next_char()?, 'a');
/// assert_eq!(reader.next_char()?, '\n');
/// assert_eq!(reader.next_char()?, 'b');
/// assert_eq!(reader.next_char()?, EOF_CHAR);
/// assert_eq!(reader.line_count(), 1);
/// assert_eq!(reader.char_count(), 4);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct CharInputReader<S> {
    source: Option<S>,
    buffer: Vec<char>,
    /// Index of the next unread character in `buffer`.
    pos: usize,
    /// Terminal once set; no further refill is attempted.
    exhausted: bool,
    /// The character last returned to the caller.
    current: char,
    /// The character physically one ahead of `current`.
    next: char,
    separator: LineSeparator,
    normalized: char,
    line_count: usize,
    char_count: usize,
}

impl<S: BufferSource> CharInputReader<S> {
    /// Creates a reader with no source attached.
    ///
    /// The separator in `options` is already validated, so construction
    /// cannot fail; until [`start`](CharInputReader::start) attaches a
    /// source, [`next_char`](CharInputReader::next_char) reports exhaustion.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            source: None,
            buffer: Vec::new(),
            pos: 0,
            exhausted: false,
            current: EOF_CHAR,
            next: EOF_CHAR,
            separator: options.line_separator,
            normalized: options.normalized_newline,
            line_count: 0,
            char_count: 0,
        }
    }

    /// Attaches `source` and primes the lookahead with its first character.
    ///
    /// Any previously attached source is closed first. Counters reset to
    /// zero. A source that is exhausted from the outset leaves the stream
    /// terminal with no characters available.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the initial refill.
    pub fn start(&mut self, source: S) -> io::Result<()> {
        self.stop();
        self.source = Some(source);
        self.line_count = 0;
        self.char_count = 0;
        self.exhausted = false;
        self.current = EOF_CHAR;
        self.next = EOF_CHAR;
        self.buffer.clear();
        self.pos = 0;

        self.refill()?;
        if self.pos < self.buffer.len() {
            self.next = self.buffer[self.pos];
            self.pos += 1;
        }
        Ok(())
    }

    /// Requests the next window from the source, finalizing the consumed
    /// window's contribution to the character count first.
    fn refill(&mut self) -> io::Result<()> {
        self.char_count += self.pos;
        self.pos = 0;

        let outcome = match self.source.as_mut() {
            Some(source) => source.refill(&mut self.buffer)?,
            None => Refill::Exhausted,
        };
        if outcome == Refill::Exhausted || self.buffer.is_empty() {
            self.buffer.clear();
            self.exhausted = true;
            self.stop();
        }
        Ok(())
    }

    /// Returns the next character of the normalized stream, or [`EOF_CHAR`]
    /// once the input is exhausted.
    ///
    /// A detected two-character separator is collapsed into the configured
    /// normalized character and counts one line. A single-character
    /// separator also counts one line but is returned verbatim, never
    /// rewritten.
    ///
    /// # Errors
    ///
    /// Propagates a refill failure from the attached source. Ordinary end of
    /// input is not an error.
    pub fn next_char(&mut self) -> io::Result<char> {
        self.current = self.next;

        if self.pos >= self.buffer.len() {
            if self.exhausted {
                return Ok(EOF_CHAR);
            }
            self.refill()?;
        }
        self.next = self.advance();

        if self.current == self.separator.primary() {
            let second = self.separator.secondary();
            if second.is_none() || second == Some(self.next) {
                self.line_count += 1;
                if second.is_some() {
                    // Collapse the pair: report the normalized character and
                    // swallow the second separator character so it is not
                    // also returned on its own. The extra fetch may itself
                    // cross a window boundary.
                    self.current = self.normalized;
                    if self.pos >= self.buffer.len() && !self.exhausted {
                        self.refill()?;
                    }
                    self.next = self.advance();
                }
            }
        }

        Ok(self.current)
    }

    /// Next raw character from the window, or the sentinel when none
    /// remains.
    fn advance(&mut self) -> char {
        if self.pos < self.buffer.len() {
            let ch = self.buffer[self.pos];
            self.pos += 1;
            ch
        } else {
            EOF_CHAR
        }
    }

    /// Number of separator sequences consumed so far.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of characters consumed from the untranslated input so far.
    ///
    /// A collapsed two-character separator contributes two even though it is
    /// delivered as one character. The prefetched lookahead is included as
    /// soon as it has been taken from the window.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.char_count + self.pos
    }

    /// Skips the next `lines` logical lines by advancing the stream.
    ///
    /// `skip_lines(0)` is a no-op. On success the stream rests just past the
    /// last skipped separator.
    ///
    /// # Errors
    ///
    /// [`SkipError::EndOfInput`] when the input runs out before `lines`
    /// separators were seen; the stream is then left at end of input, not
    /// rolled back. A refill failure surfaces as [`SkipError::Io`].
    pub fn skip_lines(&mut self, lines: usize) -> Result<(), SkipError> {
        if lines == 0 {
            return Ok(());
        }
        let from_line = self.line_count;
        let target = from_line + lines;
        loop {
            let ch = self.next_char()?;
            if self.line_count >= target {
                return Ok(());
            }
            if ch == EOF_CHAR {
                return Err(SkipError::EndOfInput {
                    requested: lines,
                    from_line,
                });
            }
        }
    }

    /// Closes and detaches the attached source.
    ///
    /// Safe to call multiple times; also invoked internally when exhaustion
    /// is observed and by [`start`](CharInputReader::start) for a prior
    /// source.
    pub fn stop(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.close();
        }
    }
}
