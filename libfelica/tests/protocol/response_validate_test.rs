#[path = "../common/mod.rs"]
mod common;

use libfelica::protocol::{ChecksumStatus, ReplyPhase, ResponseFrame, validate, validate_reply};
use libfelica::test_support::framed_reply;
use libfelica::Error;

#[test]
fn zero_length_is_empty_success() {
    let input = common::bytes("de ad be ef");
    let v = validate(&input, 0).unwrap();
    assert!(v.is_empty());
    assert_eq!(v.checksum, ChecksumStatus::Empty);
}

#[test]
fn flipped_checksum_still_returns_payload() {
    let mut data = framed_reply(&common::bytes("07 01 2e 4c d3 1a 2b 3c 4d 00 00"));
    let n = data.len();
    data[n - 2] ^= 0xff;
    let v = validate(&data, n as u32).unwrap();
    assert_eq!(v.checksum, ChecksumStatus::Mismatch);
    assert_eq!(v.payload, data.as_slice());
}

#[test]
fn declared_length_beyond_buffer() {
    let data = framed_reply(&[0x01, 0x02]);
    assert!(matches!(
        validate(&data, data.len() as u32 + 1),
        Err(Error::InvalidLength { .. })
    ));
}

#[test]
fn phase_selects_length_side_value() {
    let data = framed_reply(&[0x01, 0x02, 0x03]);
    let len = data.len() as u32;
    let reply = ResponseFrame::new(data, len | 0xabcd_0000, 0);
    let data_phase = validate_reply(&reply, ReplyPhase::Data).unwrap();
    assert_eq!(data_phase.checksum, ChecksumStatus::Valid);
    let select_phase = validate_reply(&reply, ReplyPhase::Select).unwrap();
    assert_eq!(select_phase.checksum, ChecksumStatus::Empty);
}
