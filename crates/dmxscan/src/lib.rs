//! Allocation-free scanners for DMX device configuration lines.
//!
//! A configuration file is read line by line by the caller; each line is
//! handed to one of two scanners:
//!
//! - [`scan_u8`] and [`scan_span`] for `key=value` lines,
//! - [`scan_descriptor`] / [`DescriptorScanner`] for device lines such as
//!   `SPI1,dimmer,1F,512`.
//!
//! Lines end at the first zero byte or newline (or the end of the slice).
//! Nothing past that point is read, and no scanner allocates.

#![no_std]

#[cfg(test)]
extern crate std;

/// Emits a `tracing` event when the `tracing` feature is enabled.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)+);
    }};
}

pub mod classify;
mod descriptor;
mod error;
mod key_value;
mod options;
mod scanner;

#[cfg(test)]
mod tests;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct ReadmeDoctests;

pub use descriptor::{DEFAULT_NAME_CAPACITY, DescriptorScanner, DeviceDescriptor, scan_descriptor};
pub use error::{DESCRIPTOR_OK, DescriptorErrorKind, ScanError};
pub use key_value::{KeyScan, ScanStatus, scan_span, scan_u8};
pub use options::ScanOptions;
pub use scanner::{Line, TERMINATORS};
