use thiserror::Error;

/// Status code reported for a successfully scanned descriptor line.
///
/// Distinct from every [`DescriptorErrorKind::code`].
pub const DESCRIPTOR_OK: u8 = 4;

/// A rejected descriptor line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at column {column}")]
pub struct ScanError {
    pub(crate) kind: DescriptorErrorKind,
    pub(crate) column: usize,
}

impl ScanError {
    pub(crate) const fn new(kind: DescriptorErrorKind, column: usize) -> Self {
        Self { kind, column }
    }

    /// Which rule the line broke.
    #[must_use]
    pub const fn kind(&self) -> DescriptorErrorKind {
        self.kind
    }

    /// Zero-based byte offset in the line where the problem was detected.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Numeric status code, see [`DescriptorErrorKind::code`].
    #[must_use]
    pub const fn code(&self) -> u8 {
        self.kind.code()
    }
}

/// Why a descriptor line was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DescriptorErrorKind {
    /// The first field is not `SPI` followed by a single digit and a comma.
    #[error("invalid protocol")]
    InvalidProtocol = 1,
    /// The address field is empty, not hexadecimal, longer than two digits, or
    /// not closed by a comma. Also reported when the name field is not closed
    /// by a comma, unless [`ScanOptions::dedicated_name_error`] is set.
    ///
    /// [`ScanOptions::dedicated_name_error`]: crate::ScanOptions::dedicated_name_error
    #[error("invalid slave address")]
    InvalidSlaveAddress = 2,
    /// The start address does not begin with a digit or contains a non-digit
    /// within its first three bytes.
    #[error("invalid start address")]
    InvalidStartAddress = 3,
    /// The name field is not closed by a comma. Only reported with
    /// [`ScanOptions::dedicated_name_error`].
    ///
    /// [`ScanOptions::dedicated_name_error`]: crate::ScanOptions::dedicated_name_error
    #[error("invalid name")]
    InvalidName = 5,
}

impl DescriptorErrorKind {
    /// Numeric status code. Never equal to [`DESCRIPTOR_OK`].
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<DescriptorErrorKind> for u8 {
    fn from(kind: DescriptorErrorKind) -> Self {
        kind.code()
    }
}
