//! Buffer sources: suppliers of character windows for the reader.
//!
//! The reader owns the window buffer; a source clears and repopulates it
//! wholesale on each refill and reports the outcome as an explicit
//! [`Refill`] variant. Exhaustion is terminal and idempotent: once a source
//! reports [`Refill::Exhausted`], every later refill reports it again.

mod memory;
mod prefetch;
mod read;

pub use memory::StringSource;
pub use prefetch::PrefetchSource;
pub use read::ReadSource;

/// Outcome of a [`BufferSource::refill`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refill {
    /// The buffer was repopulated with this many characters, at least one.
    Chars(usize),
    /// No characters remain.
    Exhausted,
}

/// Supplier of character windows consumed by
/// [`CharInputReader`](crate::CharInputReader).
///
/// Implementors must uphold the refill contract: either clear and repopulate
/// the buffer with at least one character and return [`Refill::Chars`], or
/// leave it empty and return [`Refill::Exhausted`] on this and every later
/// call. Attachment to the raw provider happens at construction; the source
/// is then handed to [`CharInputReader::start`](crate::CharInputReader::start),
/// which owns its lifecycle from that point on.
pub trait BufferSource {
    /// Replaces the contents of `buffer` with the next window of characters.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying provider, such as an I/O error
    /// while reading bytes. Ordinary end of input is not an error.
    fn refill(&mut self, buffer: &mut Vec<char>) -> std::io::Result<Refill>;

    /// Releases any held resources. Safe to call multiple times.
    fn close(&mut self);
}
