/// Configuration options for the descriptor scanner.
///
/// # Examples
///
/// ```rust
/// use dmxscan::{DescriptorErrorKind, DescriptorScanner, DeviceDescriptor, ScanOptions};
///
/// let scanner = DescriptorScanner::new(ScanOptions {
///     dedicated_name_error: true,
///     ..Default::default()
/// });
/// let mut dev = DeviceDescriptor::<4>::new();
/// let err = scanner.scan_into("SPI0,toolong,1F,1", 4, &mut dev).unwrap_err();
/// assert_eq!(err.kind(), DescriptorErrorKind::InvalidName);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanOptions {
    /// Whether a name field that is not closed by a comma is reported as
    /// [`DescriptorErrorKind::InvalidName`].
    ///
    /// This happens when the name is longer than the requested maximum or the
    /// line ends inside the name. Existing configuration tooling expects that
    /// case to be reported as [`DescriptorErrorKind::InvalidSlaveAddress`], the
    /// code of the field that follows the name, which is what the scanner
    /// does when this is `false`.
    ///
    /// # Default
    ///
    /// `false`
    ///
    /// [`DescriptorErrorKind::InvalidName`]: crate::DescriptorErrorKind::InvalidName
    /// [`DescriptorErrorKind::InvalidSlaveAddress`]: crate::DescriptorErrorKind::InvalidSlaveAddress
    pub dedicated_name_error: bool,
}
