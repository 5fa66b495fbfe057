
/// Number of quickcheck cases per property.
fn property_tests() -> u64 {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    tests
}

#[test]
fn public_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<crate::DeviceDescriptor>();
    assert_send_sync::<crate::DescriptorScanner>();
    assert_send_sync::<crate::ScanError>();
    assert_send_sync::<crate::KeyScan<&[u8]>>();
    assert_send_sync::<crate::Line<'static>>();
}
