#[path = "../common/mod.rs"]
mod common;

use libfelica::protocol::checksum::{compute, crc16, verify};

#[test]
fn xmodem_check_value() {
    assert_eq!(crc16(b"123456789"), 0x31c3);
    assert_eq!(compute(b"123456789"), (0x31, 0xc3));
}

#[test]
fn verify_captured_reply() {
    // Polling reply body with its checksum, as seen on the wire after the prefix
    let mut body = common::bytes("12 01 01 2e 4c d3 1a 2b 3c 4d");
    let (hi, lo) = compute(&body);
    body.extend_from_slice(&[hi, lo]);
    assert!(verify(&body));

    let last = body.len() - 1;
    body[last] ^= 0x01;
    assert!(!verify(&body));
}

#[test]
fn verify_needs_data_and_checksum() {
    assert!(!verify(&[]));
    assert!(!verify(&[0x00, 0x00]));
}
