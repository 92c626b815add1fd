use crate::error::InvalidLineSeparator;

/// A validated line-separator sequence of one or two characters.
///
/// The separator defines what counts as a newline in the raw input. A
/// two-character separator such as `"\r\n"` is collapsed into the configured
/// normalized character when read back; a single-character separator is
/// reported verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSeparator {
    primary: char,
    secondary: Option<char>,
}

impl LineSeparator {
    /// Line feed (`"\n"`), the Unix convention.
    pub const LF: LineSeparator = LineSeparator {
        primary: '\n',
        secondary: None,
    };

    /// Carriage return (`"\r"`), the classic Mac OS convention.
    pub const CR: LineSeparator = LineSeparator {
        primary: '\r',
        secondary: None,
    };

    /// Carriage return followed by line feed (`"\r\n"`), the Windows
    /// convention.
    pub const CRLF: LineSeparator = LineSeparator {
        primary: '\r',
        secondary: Some('\n'),
    };

    /// Validates `sequence` as a line separator.
    ///
    /// # Errors
    ///
    /// Fails when `sequence` is empty or longer than two characters. This is
    /// the only point where separator validation happens; streaming never
    /// re-checks it.
    pub fn new(sequence: &str) -> Result<Self, InvalidLineSeparator> {
        let mut chars = sequence.chars();
        let primary = chars.next().ok_or(InvalidLineSeparator { len: 0 })?;
        let secondary = chars.next();
        let excess = chars.count();
        if excess > 0 {
            return Err(InvalidLineSeparator { len: 2 + excess });
        }
        Ok(Self { primary, secondary })
    }

    /// First (or only) character of the separator sequence.
    #[must_use]
    pub fn primary(&self) -> char {
        self.primary
    }

    /// Second character of the sequence, when the separator is a pair.
    #[must_use]
    pub fn secondary(&self) -> Option<char> {
        self.secondary
    }
}

impl Default for LineSeparator {
    fn default() -> Self {
        Self::LF
    }
}

impl TryFrom<&str> for LineSeparator {
    type Error = InvalidLineSeparator;

    fn try_from(sequence: &str) -> Result<Self, Self::Error> {
        Self::new(sequence)
    }
}

/// Configuration options for [`CharInputReader`](crate::CharInputReader).
///
/// # Default
///
/// Line-feed separator, normalized newline `'\n'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// The one- or two-character sequence that counts as a newline in the
    /// raw input.
    pub line_separator: LineSeparator,

    /// The single character substituted for a detected two-character
    /// separator sequence.
    ///
    /// Single-character separators are never rewritten: a lone configured
    /// separator character needs no translation, so only the two-character
    /// case goes through this replacement.
    pub normalized_newline: char,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            line_separator: LineSeparator::default(),
            normalized_newline: '\n',
        }
    }
}
