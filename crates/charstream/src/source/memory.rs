use std::io;

use crate::source::{BufferSource, Refill};

/// An in-memory [`BufferSource`] serving a string in fixed-size windows.
///
/// A window of one or two characters forces a refill at nearly every
/// position, which is how buffer-boundary behavior gets pinned down in
/// tests. [`StringSource::new`] serves the whole input as a single window.
#[derive(Debug, Clone)]
pub struct StringSource {
    chars: Vec<char>,
    pos: usize,
    window: usize,
}

impl StringSource {
    /// Serves `input` as one window.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_window(input, usize::MAX)
    }

    /// Serves `input` in windows of at most `window` characters.
    ///
    /// A `window` of zero is treated as one so that refills always make
    /// progress.
    #[must_use]
    pub fn with_window(input: &str, window: usize) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            window: window.max(1),
        }
    }
}

impl From<&str> for StringSource {
    fn from(input: &str) -> Self {
        Self::new(input)
    }
}

impl BufferSource for StringSource {
    fn refill(&mut self, buffer: &mut Vec<char>) -> io::Result<Refill> {
        buffer.clear();
        if self.pos >= self.chars.len() {
            return Ok(Refill::Exhausted);
        }
        let end = self.chars.len().min(self.pos.saturating_add(self.window));
        buffer.extend_from_slice(&self.chars[self.pos..end]);
        self.pos = end;
        Ok(Refill::Chars(buffer.len()))
    }

    fn close(&mut self) {
        self.pos = self.chars.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_fixed_windows_then_exhausts() {
        let mut source = StringSource::with_window("abcde", 2);
        let mut buffer = Vec::new();

        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Chars(2));
        assert_eq!(buffer, vec!['a', 'b']);
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Chars(2));
        assert_eq!(buffer, vec!['c', 'd']);
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Chars(1));
        assert_eq!(buffer, vec!['e']);

        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Exhausted);
        assert!(buffer.is_empty());
        // Exhaustion is terminal.
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Exhausted);
    }

    #[test]
    fn close_drops_remaining_input() {
        let mut source = StringSource::new("abc");
        source.close();
        let mut buffer = Vec::new();
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Exhausted);
        source.close();
    }

    #[test]
    fn empty_input_is_immediately_exhausted() {
        let mut source = StringSource::new("");
        let mut buffer = Vec::new();
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Exhausted);
    }
}
