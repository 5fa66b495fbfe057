#![no_main]

use arbitrary::Arbitrary;
use dmxscan::{
    DESCRIPTOR_OK, DescriptorScanner, DeviceDescriptor, KeyScan, Line, ScanOptions, scan_span,
    scan_u8,
};
use libfuzzer_sys::fuzz_target;

const NAME_CAPACITY: usize = 64;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    line: &'a [u8],
    key: &'a [u8],
    span_max: u8,
    name_max: u8,
    dedicated_name_error: bool,
}

fuzz_target!(|input: Input<'_>| {
    let line = Line::new(input.line);
    // Anything after the terminator must be invisible to every scanner.
    let mut extended = line.as_bytes().to_vec();
    extended.extend_from_slice(b"\n,SPI1,x,1,1\0");

    check_key_value(&input, line, &extended);
    check_descriptor(&input, line, &extended);
});

fn check_key_value(input: &Input<'_>, line: Line<'_>, extended: &[u8]) {
    let byte = scan_u8(input.line, input.key);
    assert_eq!(byte, scan_u8(extended, input.key));
    if byte.is_match() {
        assert!(line.as_bytes().starts_with(input.key));
    }

    let max = usize::from(input.span_max);
    let mut buf = [0u8; 256];
    let mut other = [0u8; 256];
    let span = scan_span(input.line, input.key, &mut buf[..max]);
    assert_eq!(span, scan_span(extended, input.key, &mut other[..max]));
    if let KeyScan::Value(span) = span {
        assert!(span.len() <= max);
        assert!(line.as_bytes()[input.key.len() + 1..].starts_with(span));
    }
}

fn check_descriptor(input: &Input<'_>, line: Line<'_>, extended: &[u8]) {
    let scanner = DescriptorScanner::new(ScanOptions {
        dedicated_name_error: input.dedicated_name_error,
    });
    let name_max = usize::from(input.name_max);

    let mut dev = DeviceDescriptor::<NAME_CAPACITY>::new();
    let result = scanner.scan_into(input.line, name_max, &mut dev);
    assert_eq!(
        result.map(|()| dev),
        scanner.scan::<NAME_CAPACITY>(extended, name_max)
    );

    match result {
        Ok(()) => {
            assert!(dev.variant() < 10);
            assert!(dev.start_address() < 1000);
            assert!(dev.name_bytes().len() <= name_max.min(NAME_CAPACITY));
            if std::str::from_utf8(dev.name_bytes()).is_ok() {
                let text = dev.to_string();
                assert_eq!(scanner.scan::<NAME_CAPACITY>(&text, name_max), Ok(dev));
            }
        }
        Err(err) => {
            assert!(err.column() <= line.len());
            assert_ne!(err.code(), DESCRIPTOR_OK);
        }
    }
}
