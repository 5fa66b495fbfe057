//! Device descriptor lines: `SPI<v>,<name>,<address>,<start>[ trailing]`.

use core::{
    fmt,
    hash::{Hash, Hasher},
};

use bstr::BStr;

use crate::{
    DescriptorErrorKind, ScanError, ScanOptions,
    classify::{hex_value, is_digit},
    scanner::{Cursor, Line},
};

/// Name capacity of [`DeviceDescriptor`] when none is given.
pub const DEFAULT_NAME_CAPACITY: usize = 32;

const PROTOCOL_PREFIX: &[u8] = b"SPI";

/// A decoded descriptor line with its name stored inline.
///
/// `N` is the name capacity in bytes. When the name is shorter than `N` the
/// byte after it is zero, so `name_with_nul` hands out a C-style string.
#[derive(Clone, Copy)]
pub struct DeviceDescriptor<const N: usize = DEFAULT_NAME_CAPACITY> {
    variant: u8,
    name: [u8; N],
    name_len: usize,
    address: u8,
    start_address: u16,
}

impl<const N: usize> DeviceDescriptor<N> {
    /// An all-zero descriptor to scan into.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            variant: 0,
            name: [0; N],
            name_len: 0,
            address: 0,
            start_address: 0,
        }
    }

    /// Protocol variant, the digit after `SPI`.
    #[must_use]
    pub const fn variant(&self) -> u8 {
        self.variant
    }

    /// Device name as scanned.
    #[must_use]
    pub fn name(&self) -> &BStr {
        BStr::new(self.name_bytes())
    }

    /// Device name as raw bytes.
    #[must_use]
    pub fn name_bytes(&self) -> &[u8] {
        &self.name[..self.name_len]
    }

    /// Device name including its zero terminator, if there was room for one.
    #[must_use]
    pub fn name_with_nul(&self) -> Option<&[u8]> {
        self.name
            .get(..=self.name_len)
            .filter(|s| s.last() == Some(&0))
    }

    /// Bus address of the slave.
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// First channel the device occupies.
    #[must_use]
    pub const fn start_address(&self) -> u16 {
        self.start_address
    }
}

impl<const N: usize> Default for DeviceDescriptor<N> {
    fn default() -> Self {
        Self::new()
    }
}

// Bytes past `name_len` are scratch and do not take part in equality.
impl<const N: usize> PartialEq for DeviceDescriptor<N> {
    fn eq(&self, other: &Self) -> bool {
        self.variant == other.variant
            && self.name_bytes() == other.name_bytes()
            && self.address == other.address
            && self.start_address == other.start_address
    }
}

impl<const N: usize> Eq for DeviceDescriptor<N> {}

impl<const N: usize> Hash for DeviceDescriptor<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variant.hash(state);
        self.name_bytes().hash(state);
        self.address.hash(state);
        self.start_address.hash(state);
    }
}

// `name_len` is folded into `name`.
#[allow(clippy::missing_fields_in_debug)]
impl<const N: usize> fmt::Debug for DeviceDescriptor<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceDescriptor")
            .field("variant", &self.variant)
            .field("name", &self.name())
            .field("address", &format_args!("{:#04x}", self.address))
            .field("start_address", &self.start_address)
            .finish()
    }
}

/// Renders the canonical descriptor line, without a newline.
///
/// ```rust
/// use dmxscan::scan_descriptor;
///
/// let dev = scan_descriptor::<8>("SPI2,rgb,a,7 spare", 8).unwrap();
/// assert_eq!(dev.to_string(), "SPI2,rgb,0A,7");
/// ```
impl<const N: usize> fmt::Display for DeviceDescriptor<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SPI{},{},{:02X},{}",
            self.variant,
            self.name(),
            self.address,
            self.start_address
        )
    }
}

#[cfg(feature = "serde")]
impl<const N: usize> serde::Serialize for DeviceDescriptor<N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("DeviceDescriptor", 4)?;
        s.serialize_field("variant", &self.variant)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("address", &self.address)?;
        s.serialize_field("start_address", &self.start_address)?;
        s.end()
    }
}

/// Scanner for descriptor lines.
///
/// Fields are checked strictly left to right and the first violation wins:
///
/// | field    | accepted                                   | error                 |
/// |----------|--------------------------------------------|-----------------------|
/// | protocol | `SPI` + one decimal digit, then `,`        | `InvalidProtocol`     |
/// | name     | up to `name_max` bytes, then `,`           | `InvalidSlaveAddress` |
/// | address  | one or two hex digits, then `,`            | `InvalidSlaveAddress` |
/// | start    | one to three decimal digits                | `InvalidStartAddress` |
///
/// The start address stops at the end of the line, a space, or after its third
/// byte; whatever follows it is not inspected.
///
/// Output is written field by field as each one is accepted. When a later
/// field fails, earlier fields of the [`DeviceDescriptor`] already hold the new
/// values; only a successful scan leaves a consistent descriptor behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorScanner {
    options: ScanOptions,
}

impl DescriptorScanner {
    /// Creates a scanner with the given options.
    #[must_use]
    pub const fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// The options this scanner was built with.
    #[must_use]
    pub const fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scans `line` into a fresh descriptor.
    ///
    /// At most `name_max` bytes (and never more than `N`) are accepted for the
    /// name.
    ///
    /// # Errors
    ///
    /// Returns the first rule the line breaks, see [`DescriptorScanner`].
    pub fn scan<const N: usize>(
        &self,
        line: impl AsRef<[u8]>,
        name_max: usize,
    ) -> Result<DeviceDescriptor<N>, ScanError> {
        let mut out = DeviceDescriptor::new();
        self.scan_into(line, name_max, &mut out)?;
        Ok(out)
    }

    /// Scans `line` into caller-owned storage.
    ///
    /// Fields are committed to `out` one at a time. On error, the fields
    /// before the failing one have been overwritten and the rest keep their
    /// previous values, so `out` must only be trusted after `Ok`. A failing
    /// name field is the one exception: the bytes read so far are already
    /// stored, which leaves a too-long name behind truncated to `name_max`.
    ///
    /// # Errors
    ///
    /// Returns the first rule the line breaks, see [`DescriptorScanner`].
    pub fn scan_into<const N: usize>(
        &self,
        line: impl AsRef<[u8]>,
        name_max: usize,
        out: &mut DeviceDescriptor<N>,
    ) -> Result<(), ScanError> {
        let mut cursor = Line::new(line.as_ref()).cursor();
        let result = self.scan_fields(&mut cursor, name_max, out);

        #[cfg(feature = "tracing")]
        match &result {
            Ok(()) => tracing::debug!(
                variant = out.variant,
                name = %out.name(),
                address = out.address,
                start_address = out.start_address,
                "descriptor scanned"
            ),
            Err(err) => tracing::trace!(
                kind = %err.kind,
                column = err.column,
                code = err.code(),
                "descriptor rejected"
            ),
        }

        result
    }

    fn scan_fields<const N: usize>(
        self,
        cursor: &mut Cursor<'_>,
        name_max: usize,
        out: &mut DeviceDescriptor<N>,
    ) -> Result<(), ScanError> {
        out.variant = protocol(cursor)?;
        self.name(cursor, name_max, out)?;
        out.address = address(cursor)?;
        out.start_address = start_address(cursor)?;
        Ok(())
    }

    fn name<const N: usize>(
        self,
        cursor: &mut Cursor<'_>,
        name_max: usize,
        out: &mut DeviceDescriptor<N>,
    ) -> Result<(), ScanError> {
        let run = cursor.take_while_max(name_max.min(N), |b| b != b',');
        out.name[..run.len()].copy_from_slice(run);
        if let Some(nul) = out.name.get_mut(run.len()) {
            *nul = 0;
        }
        out.name_len = run.len();

        if cursor.eat(b',') {
            return Ok(());
        }
        let kind = if self.options.dedicated_name_error {
            DescriptorErrorKind::InvalidName
        } else {
            DescriptorErrorKind::InvalidSlaveAddress
        };
        Err(ScanError::new(kind, cursor.position()))
    }
}

/// Scans a descriptor line with default options.
///
/// ```rust
/// use dmxscan::scan_descriptor;
///
/// let dev = scan_descriptor::<8>("SPI1,dev1,1F,512\n", 8).unwrap();
/// assert_eq!((dev.variant(), dev.address(), dev.start_address()), (1, 0x1f, 512));
/// assert_eq!(dev.name(), "dev1");
/// ```
///
/// # Errors
///
/// See [`DescriptorScanner::scan`].
pub fn scan_descriptor<const N: usize>(
    line: impl AsRef<[u8]>,
    name_max: usize,
) -> Result<DeviceDescriptor<N>, ScanError> {
    DescriptorScanner::default().scan(line, name_max)
}

fn protocol(cursor: &mut Cursor<'_>) -> Result<u8, ScanError> {
    let fail = |column| Err(ScanError::new(DescriptorErrorKind::InvalidProtocol, column));

    if !cursor.eat_prefix(PROTOCOL_PREFIX) {
        return fail(cursor.position());
    }
    let column = cursor.position();
    let variant = match cursor.bump() {
        Some(d) if is_digit(d) => d - b'0',
        _ => return fail(column),
    };
    if !cursor.eat(b',') {
        return fail(cursor.position());
    }
    Ok(variant)
}

fn address(cursor: &mut Cursor<'_>) -> Result<u8, ScanError> {
    let fail = |column| Err(ScanError::new(DescriptorErrorKind::InvalidSlaveAddress, column));

    let start = cursor.position();
    let run = cursor.take_while_max(2, |b| b != b',');
    let mut value = 0u8;
    for (i, &b) in run.iter().enumerate() {
        let Some(nibble) = hex_value(b) else {
            return fail(start + i);
        };
        value = (value << 4) | nibble;
    }

    if run.is_empty() || !cursor.eat(b',') {
        return fail(cursor.position());
    }
    Ok(value)
}

fn start_address(cursor: &mut Cursor<'_>) -> Result<u16, ScanError> {
    let fail = |column| Err(ScanError::new(DescriptorErrorKind::InvalidStartAddress, column));

    let start = cursor.position();
    if !cursor.peek().is_some_and(is_digit) {
        return fail(start);
    }

    let run = cursor.take_while_max(3, |b| b != b' ');
    let mut value = 0u16;
    for (i, &b) in run.iter().enumerate() {
        if !is_digit(b) {
            return fail(start + i);
        }
        value = value * 10 + u16::from(b - b'0');
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::DescriptorErrorKind::*;

    fn scan(line: &str) -> Result<DeviceDescriptor<8>, ScanError> {
        scan_descriptor(line, 8)
    }

    #[test]
    fn scans_reference_line() {
        let dev = scan("SPI1,dev1,1F,512\n").unwrap();
        assert_eq!(dev.variant(), 1);
        assert_eq!(dev.name(), "dev1");
        assert_eq!(dev.address(), 0x1F);
        assert_eq!(dev.start_address(), 512);
        assert_eq!(dev.name_with_nul(), Some(&b"dev1\0"[..]));
    }

    #[rstest]
    #[case::single_hex_digit("SPI0,a,7,1", 0, "a", 0x07, 1)]
    #[case::lowercase_hex("SPI9,par,ff,999", 9, "par", 0xFF, 999)]
    #[case::mixed_case_hex("SPI3,x,aB,10", 3, "x", 0xAB, 10)]
    #[case::empty_name("SPI1,,00,0", 1, "", 0x00, 0)]
    #[case::name_at_limit("SPI1,12345678,10,5", 1, "12345678", 0x10, 5)]
    #[case::name_with_spaces("SPI1,a b=c,10,5", 1, "a b=c", 0x10, 5)]
    #[case::space_terminated_start("SPI1,d,10,12 comment, 3", 1, "d", 0x10, 12)]
    #[case::zero_terminated("SPI1,d,10,7\0ignored", 1, "d", 0x10, 7)]
    #[case::extra_digits_ignored("SPI1,d,10,5120", 1, "d", 0x10, 512)]
    #[case::leading_zeros("SPI1,d,10,007", 1, "d", 0x10, 7)]
    fn accepts(
        #[case] line: &str,
        #[case] variant: u8,
        #[case] name: &str,
        #[case] address: u8,
        #[case] start: u16,
    ) {
        let dev = scan(line).unwrap();
        assert_eq!(dev.variant(), variant);
        assert_eq!(dev.name(), name);
        assert_eq!(dev.address(), address);
        assert_eq!(dev.start_address(), start);
    }

    #[rstest]
    #[case::wrong_prefix("XYZ1,dev1,1F,512\n", InvalidProtocol, 0)]
    #[case::lowercase_prefix("spi1,dev1,1F,512", InvalidProtocol, 0)]
    #[case::short_prefix("SP1,dev1,1F,512", InvalidProtocol, 0)]
    #[case::missing_variant("SPI,dev1,1F,512", InvalidProtocol, 3)]
    #[case::letter_variant("SPIx,dev1,1F,512", InvalidProtocol, 3)]
    #[case::two_digit_variant("SPI10,dev1,1F,512", InvalidProtocol, 4)]
    #[case::marker_only("SPI1", InvalidProtocol, 4)]
    #[case::marker_then_newline("SPI1\n,dev1,1F,512", InvalidProtocol, 4)]
    #[case::empty("", InvalidProtocol, 0)]
    #[case::name_too_long("SPI1,device-one,1F,512", InvalidSlaveAddress, 13)]
    #[case::line_ends_in_name("SPI1,dev1", InvalidSlaveAddress, 9)]
    #[case::newline_in_name("SPI1,de\nv1,1F,512", InvalidSlaveAddress, 7)]
    #[case::bad_hex_first("SPI1,dev1,G1,512", InvalidSlaveAddress, 10)]
    #[case::bad_hex_second("SPI1,dev1,1G,512", InvalidSlaveAddress, 11)]
    #[case::empty_address("SPI1,dev1,,512", InvalidSlaveAddress, 10)]
    #[case::three_hex_digits("SPI1,dev1,1FF,512", InvalidSlaveAddress, 12)]
    #[case::address_unterminated("SPI1,dev1,1F", InvalidSlaveAddress, 12)]
    #[case::empty_start("SPI1,dev1,1F,\n", InvalidStartAddress, 13)]
    #[case::start_leading_space("SPI1,dev1,1F, 12", InvalidStartAddress, 13)]
    #[case::start_not_numeric("SPI1,dev1,1F,x", InvalidStartAddress, 13)]
    #[case::start_bad_second("SPI1,dev1,1F,5x2", InvalidStartAddress, 14)]
    #[case::start_bad_third("SPI1,dev1,1F,51\r\n", InvalidStartAddress, 15)]
    #[case::start_negative("SPI1,dev1,1F,-1", InvalidStartAddress, 13)]
    fn rejects(#[case] line: &str, #[case] kind: DescriptorErrorKind, #[case] column: usize) {
        let err = scan(line).unwrap_err();
        assert_eq!(err.kind(), kind, "{line:?}");
        assert_eq!(err.column(), column, "{line:?}");
    }

    #[test]
    fn dedicated_name_error_only_changes_name_failures() {
        let scanner = DescriptorScanner::new(ScanOptions {
            dedicated_name_error: true,
        });
        let mut dev = DeviceDescriptor::<8>::new();

        let err = scanner.scan_into("SPI1,device-one,1F,512", 8, &mut dev).unwrap_err();
        assert_eq!(err.kind(), InvalidName);
        assert_eq!(err.code(), 5);

        let err = scanner.scan_into("SPI1,dev1,G1,512", 8, &mut dev).unwrap_err();
        assert_eq!(err.kind(), InvalidSlaveAddress);
    }

    #[test]
    fn name_is_bounded_by_capacity_and_request() {
        // request larger than capacity
        let dev = scan_descriptor::<4>("SPI1,abcd,01,1", 64).unwrap();
        assert_eq!(dev.name(), "abcd");
        assert_eq!(dev.name_with_nul(), None);
        assert!(scan_descriptor::<4>("SPI1,abcde,01,1", 64).is_err());

        // request smaller than capacity
        let err = scan_descriptor::<32>("SPI1,abcd,01,1", 3).unwrap_err();
        assert_eq!(err.kind(), InvalidSlaveAddress);
    }

    #[test]
    fn status_codes_are_distinct() {
        let codes = [
            InvalidProtocol.code(),
            InvalidSlaveAddress.code(),
            InvalidStartAddress.code(),
            InvalidName.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, crate::DESCRIPTOR_OK);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_and_debug() {
        let dev = scan("SPI4,wash,3,40").unwrap();
        assert_eq!(std::format!("{dev}"), "SPI4,wash,03,40");
        assert_eq!(
            std::format!("{dev:?}"),
            "DeviceDescriptor { variant: 4, name: \"wash\", address: 0x03, start_address: 40 }"
        );
        let err = scan("SPI4,wash,3,").unwrap_err();
        assert_eq!(std::format!("{err}"), "invalid start address at column 12");
    }
}
