//! Byte classifiers shared by the scanners.

/// Returns `true` for ASCII `0` through `9`.
#[inline]
#[must_use]
pub const fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Returns `true` for decimal digits and `A`-`F` in either case.
#[inline]
#[must_use]
pub const fn is_hex_digit(c: u8) -> bool {
    hex_value(c).is_some()
}

/// Decodes one hexadecimal digit into its nibble value.
///
/// ```rust
/// use dmxscan::classify::hex_value;
///
/// assert_eq!(hex_value(b'7'), Some(7));
/// assert_eq!(hex_value(b'c'), Some(12));
/// assert_eq!(hex_value(b'C'), Some(12));
/// assert_eq!(hex_value(b'g'), None);
/// ```
#[inline]
#[must_use]
pub const fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
