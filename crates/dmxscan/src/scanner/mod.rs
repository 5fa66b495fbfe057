//! Line view and byte cursor.
//!
//! A configuration line ends at the first zero byte or newline, or at the end
//! of the slice if neither occurs. [`Line`] clips the raw buffer at that point
//! once, so nothing downstream can look past the terminator. [`Cursor`] then
//! walks the clipped bytes with `peek`/`bump`, where `None` means "at the
//! terminator".
//!
//! Invariants
//! - `Line::as_bytes()` never contains `0` or `b'\n'`.
//! - `Cursor::position()` never exceeds `Line::len()`.

use core::fmt;

use bstr::{BStr, ByteSlice};

/// Bytes that end a configuration line.
pub const TERMINATORS: &[u8] = b"\0\n";

/// One configuration line, clipped at its terminator.
///
/// ```rust
/// use dmxscan::Line;
///
/// let line = Line::new(b"SPI0,par,01,1\nnext line");
/// assert_eq!(line.as_bytes(), b"SPI0,par,01,1");
/// assert_eq!(Line::new(b"a\0b").len(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Line<'a> {
    bytes: &'a [u8],
}

impl<'a> Line<'a> {
    /// Clips `raw` at its first terminator.
    #[must_use]
    pub fn new(raw: &'a [u8]) -> Self {
        let end = raw.find_byteset(TERMINATORS).unwrap_or(raw.len());
        Self { bytes: &raw[..end] }
    }

    /// The bytes before the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Number of bytes before the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` when the line terminates immediately.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn cursor(self) -> Cursor<'a> {
        Cursor {
            bytes: self.bytes,
            pos: 0,
        }
    }
}

impl<'a> From<&'a [u8]> for Line<'a> {
    fn from(raw: &'a [u8]) -> Self {
        Self::new(raw)
    }
}

impl<'a> From<&'a str> for Line<'a> {
    fn from(raw: &'a str) -> Self {
        Self::new(raw.as_bytes())
    }
}

impl fmt::Debug for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Line").field(&BStr::new(self.bytes)).finish()
    }
}

/// Forward-only reader over a [`Line`].
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// The next byte, or `None` at the terminator.
    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consumes and returns the next byte.
    #[inline]
    pub(crate) fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Consumes the next byte if it equals `expected`.
    #[inline]
    pub(crate) fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `prefix` if the remaining input starts with it. On mismatch
    /// nothing is consumed.
    pub(crate) fn eat_prefix(&mut self, prefix: &[u8]) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// Unread bytes up to the terminator.
    #[inline]
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    /// Byte offset of the next unread byte from the start of the line.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Consumes up to `limit` bytes while `pred` holds, returning the run.
    pub(crate) fn take_while_max(&mut self, limit: usize, pred: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.pos;
        let run = self.rest().iter().take(limit).take_while(|&&b| pred(b)).count();
        self.pos += run;
        &self.bytes[start..self.pos]
    }
}
