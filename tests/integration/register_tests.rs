//! Register access protocol against a recording bus.

use super::mock_bus::{BusCall, MockWire};
use flightcore::bus::{
    BusDevice, MAX_TRANSFER_LEN, RegisterRequest, read_register, read_register_vec,
};
use flightcore::error::BusError;

const ADDR: u8 = 0x77;

fn dev() -> BusDevice {
    BusDevice::new(ADDR).unwrap()
}

#[test]
fn zero_length_makes_no_bus_calls() {
    let mut bus = MockWire::new(ADDR).with_register(0xD0, &[0x58]);
    let mut empty: [u8; 0] = [];
    assert_eq!(
        read_register(&mut bus, dev(), 0xD0, &mut empty),
        Err(BusError::InvalidArgument)
    );
    assert!(bus.calls.is_empty(), "calls: {:?}", bus.calls);
}

#[test]
fn oversize_buffer_makes_no_bus_calls() {
    let mut bus = MockWire::new(ADDR);
    let mut big = [0u8; MAX_TRANSFER_LEN + 1];
    assert_eq!(
        read_register(&mut bus, dev(), 0x00, &mut big),
        Err(BusError::InvalidArgument)
    );
    assert!(bus.calls.is_empty());
}

#[test]
fn exact_read_forwards_bytes_unchanged() {
    let calib = [0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC];
    let mut bus = MockWire::new(ADDR).with_register(0x88, &calib);
    let mut buf = [0u8; 6];
    read_register(&mut bus, dev(), 0x88, &mut buf).unwrap();
    assert_eq!(buf, calib);
}

#[test]
fn transaction_sequence_uses_repeated_start() {
    let mut bus = MockWire::new(ADDR).with_register(0xD0, &[0x58]);
    let mut buf = [0u8; 1];
    read_register(&mut bus, dev(), 0xD0, &mut buf).unwrap();
    assert_eq!(
        bus.calls,
        vec![
            BusCall::Begin(ADDR),
            BusCall::Write(0xD0),
            BusCall::End { keep_claimed: true },
            BusCall::Request {
                address: ADDR,
                count: 1
            },
            BusCall::Read,
        ]
    );
}

#[test]
fn short_read_is_incomplete_and_buffer_untouched() {
    let mut bus = MockWire::new(ADDR).with_register(0xF7, &[1, 2, 3, 4, 5, 6]);
    bus.max_reply = Some(4);
    let mut buf = [0xEEu8; 6];
    assert_eq!(
        read_register(&mut bus, dev(), 0xF7, &mut buf),
        Err(BusError::IncompleteRead)
    );
    assert_eq!(buf, [0xEE; 6]);
    // Partial bytes are never drained.
    assert!(!bus.calls.contains(&BusCall::Read));
}

#[test]
fn disconnected_device_is_incomplete() {
    let mut bus = MockWire::new(0x76).with_register(0xD0, &[0x58]);
    let mut buf = [0u8; 1];
    assert_eq!(
        read_register(&mut bus, dev(), 0xD0, &mut buf),
        Err(BusError::IncompleteRead)
    );
    assert!(BusError::IncompleteRead.is_retriable());
}

#[test]
fn addressing_failure_aborts_before_read() {
    let mut bus = MockWire::new(ADDR).with_register(0xD0, &[0x58]);
    bus.nack = true;
    let mut buf = [0u8; 1];
    assert_eq!(
        read_register(&mut bus, dev(), 0xD0, &mut buf),
        Err(BusError::AddressingFailure)
    );
    assert_eq!(bus.request_count(), 0);
}

#[test]
fn no_internal_retry() {
    let mut bus = MockWire::new(ADDR).with_register(0xD0, &[0x58]);
    bus.max_reply = Some(0);
    let mut buf = [0u8; 1];
    let _ = read_register(&mut bus, dev(), 0xD0, &mut buf);
    assert_eq!(bus.request_count(), 1);
}

#[test]
fn vec_variant_returns_exact_length() {
    let mut bus = MockWire::new(ADDR).with_register(0x88, &[9, 8, 7, 6]);
    let req = RegisterRequest::new(dev(), 0x88, 3).unwrap();
    let bytes = read_register_vec(&mut bus, &req).unwrap();
    assert_eq!(bytes.as_slice(), &[9, 8, 7]);
    assert_eq!(req.device(), dev());
    assert_eq!(req.register(), 0x88);
}
