//! `key=value` line scanning.
//!
//! Both scanners share the same key discipline: the key must match the start
//! of the line byte for byte and be followed directly by `=`. Anything else is
//! [`KeyScan::NoMatch`], which tells the caller to try its next key.

#[cfg(feature = "tracing")]
use bstr::BStr;

use crate::{
    classify::is_digit,
    scanner::{Cursor, Line},
};

/// Numeric outcome of a key/value scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ScanStatus {
    /// The line does not start with the key.
    NoMatch = 0,
    /// The key matched but the value is empty, malformed, or out of range.
    MatchedNoValue = 1,
    /// The key matched and the value was decoded.
    Success = 2,
}

impl ScanStatus {
    /// Wire code of this status.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<ScanStatus> for u8 {
    fn from(status: ScanStatus) -> Self {
        status.code()
    }
}

/// Result of matching one key against one line.
///
/// ```rust
/// use dmxscan::{KeyScan, ScanStatus, scan_u8};
///
/// assert_eq!(scan_u8("FOO=255\n", "FOO"), KeyScan::Value(255));
/// assert_eq!(scan_u8("FOO=256\n", "FOO"), KeyScan::NoValue);
/// assert_eq!(scan_u8("BAR=1\n", "FOO").status(), ScanStatus::NoMatch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyScan<T> {
    /// The line does not start with `key=`.
    NoMatch,
    /// The key matched but no usable value follows it.
    NoValue,
    /// The decoded value.
    Value(T),
}

impl<T> KeyScan<T> {
    /// The numeric status of this outcome.
    #[must_use]
    pub const fn status(&self) -> ScanStatus {
        match self {
            KeyScan::NoMatch => ScanStatus::NoMatch,
            KeyScan::NoValue => ScanStatus::MatchedNoValue,
            KeyScan::Value(_) => ScanStatus::Success,
        }
    }

    /// `true` when the key was recognised, with or without a value.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        !matches!(self, KeyScan::NoMatch)
    }

    /// The decoded value, if any.
    #[must_use]
    pub fn value(self) -> Option<T> {
        match self {
            KeyScan::Value(v) => Some(v),
            KeyScan::NoMatch | KeyScan::NoValue => None,
        }
    }

    /// Maps the decoded value, keeping the status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> KeyScan<U> {
        match self {
            KeyScan::NoMatch => KeyScan::NoMatch,
            KeyScan::NoValue => KeyScan::NoValue,
            KeyScan::Value(v) => KeyScan::Value(f(v)),
        }
    }
}

/// Matches `key` followed by `=` at the start of `line`, leaving the cursor on
/// the first value byte.
fn match_key<'a>(line: Line<'a>, key: &[u8]) -> Option<Cursor<'a>> {
    let mut cursor = line.cursor();
    for &expected in key {
        match cursor.bump() {
            // the line's key ends at its first '='
            Some(b) if b == expected && b != b'=' => {}
            _ => return None,
        }
    }
    cursor.eat(b'=').then_some(cursor)
}

/// Scans `key=<decimal>` into a byte.
///
/// The value must be a non-empty run of decimal digits reaching the end of
/// the line. The run is accumulated in full before the range check, so
/// `FOO=0000255` still decodes to 255 while `FOO=1000` is rejected only after
/// the last digit has been read.
#[must_use]
pub fn scan_u8(line: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> KeyScan<u8> {
    let key = key.as_ref();
    let Some(cursor) = match_key(Line::new(line.as_ref()), key) else {
        return KeyScan::NoMatch;
    };

    let digits = cursor.rest();
    if !digits.first().copied().is_some_and(is_digit) {
        trace_event!(trace, key = %BStr::new(key), "value is not numeric");
        return KeyScan::NoValue;
    }

    let mut acc: u32 = 0;
    for &b in digits {
        if !is_digit(b) {
            trace_event!(trace, key = %BStr::new(key), byte = b, "non-digit in value");
            return KeyScan::NoValue;
        }
        acc = acc.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }

    if let Ok(v) = u8::try_from(acc) {
        KeyScan::Value(v)
    } else {
        trace_event!(trace, key = %BStr::new(key), value = acc, "value out of range");
        KeyScan::NoValue
    }
}

/// Scans `key=<bytes>` into `out`.
///
/// Copies the value verbatim until the end of the line or until `out` is full,
/// whichever comes first, and returns the filled prefix of `out`. The content
/// is not validated. An empty value yields [`KeyScan::NoValue`] and leaves
/// `out` untouched.
///
/// ```rust
/// use dmxscan::{KeyScan, scan_span};
///
/// let mut buf = [0u8; 3];
/// assert_eq!(scan_span("NAME=hello\n", "NAME", &mut buf), KeyScan::Value(&b"hel"[..]));
/// ```
#[must_use]
pub fn scan_span(
    line: impl AsRef<[u8]>,
    key: impl AsRef<[u8]>,
    out: &mut [u8],
) -> KeyScan<&[u8]> {
    let key = key.as_ref();
    let Some(cursor) = match_key(Line::new(line.as_ref()), key) else {
        return KeyScan::NoMatch;
    };

    let value = cursor.rest();
    if value.is_empty() {
        trace_event!(trace, key = %BStr::new(key), "empty value");
        return KeyScan::NoValue;
    }

    let n = value.len().min(out.len());
    out[..n].copy_from_slice(&value[..n]);
    KeyScan::Value(&out[..n])
}
