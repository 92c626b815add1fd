use std::io::{self, Read};

use crate::source::{BufferSource, Refill};

/// Default byte-window capacity.
const DEFAULT_CAPACITY: usize = 8 * 1024;

/// A synchronous [`BufferSource`] decoding UTF-8 from any [`Read`]
/// implementor.
///
/// Bytes are read in windows of a configurable capacity and decoded
/// incrementally. A multi-byte sequence split across two byte windows is
/// carried over and completed on the next read, so window boundaries never
/// corrupt the character stream. Invalid sequences decode to U+FFFD.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: Option<R>,
    /// Undecoded bytes carried between reads; at most an incomplete trailing
    /// UTF-8 sequence.
    pending: Vec<u8>,
    capacity: usize,
}

impl<R: Read> ReadSource<R> {
    /// Wraps `reader` with the default byte-window capacity.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_CAPACITY)
    }

    /// Wraps `reader`, reading at most `capacity` bytes per window.
    ///
    /// Capacities below four bytes are raised to four so that a window can
    /// always hold a complete UTF-8 sequence.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: Some(reader),
            pending: Vec::new(),
            capacity: capacity.max(4),
        }
    }
}

impl<R: Read> BufferSource for ReadSource<R> {
    fn refill(&mut self, buffer: &mut Vec<char>) -> io::Result<Refill> {
        buffer.clear();
        let Some(reader) = self.reader.as_mut() else {
            return Ok(Refill::Exhausted);
        };

        loop {
            let carried = self.pending.len();
            self.pending.resize(carried + self.capacity, 0);
            let read = reader.read(&mut self.pending[carried..])?;
            self.pending.truncate(carried + read);
            let at_eof = read == 0;

            let mut idx = 0;
            while idx < self.pending.len() {
                let rest = &self.pending[idx..];
                let (ch, size) = bstr::decode_utf8(rest);
                match ch {
                    Some(ch) => {
                        buffer.push(ch);
                        idx += size;
                    }
                    // A decode failure consuming the whole tail may be an
                    // incomplete sequence; keep it pending until more bytes
                    // arrive or end of input settles the question.
                    None if !at_eof && size == rest.len() => break,
                    None => {
                        buffer.push(char::REPLACEMENT_CHARACTER);
                        idx += size.max(1);
                    }
                }
            }
            self.pending.drain(..idx);

            if at_eof {
                self.reader = None;
                self.pending.clear();
                return if buffer.is_empty() {
                    Ok(Refill::Exhausted)
                } else {
                    Ok(Refill::Chars(buffer.len()))
                };
            }
            if !buffer.is_empty() {
                return Ok(Refill::Chars(buffer.len()));
            }
            // Everything read so far is a split sequence; read more.
        }
    }

    fn close(&mut self) {
        self.reader = None;
        self.pending.clear();
    }
}
