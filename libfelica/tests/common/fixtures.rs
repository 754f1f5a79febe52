// fixtures.rs — provides commonly used test payloads/traces

use libfelica::test_support::lite_record;
use libfelica::types::{Idm, Pmm};

pub fn sample_idm_bytes() -> [u8; 8] {
    [0x01, 0x2e, 0x4c, 0xd3, 0x1a, 0x2b, 0x3c, 0x4d]
}

pub fn sample_pmm_bytes() -> [u8; 8] {
    [0x00, 0xf1, 0x00, 0x00, 0x00, 0x01, 0x43, 0x00]
}

pub fn sample_idm() -> Idm {
    Idm::from_bytes(sample_idm_bytes())
}

pub fn sample_pmm() -> Pmm {
    Pmm::from_bytes(sample_pmm_bytes())
}

/// Select reply body: IDm | code | NFCID2 | PMm | IC code | MRT | service code
pub fn card_identity_bytes() -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&sample_idm_bytes());
    v.extend_from_slice(&[0x01, 0x2e]);
    v.extend_from_slice(&[0x4c, 0xd3, 0x1a, 0x2b, 0x3c, 0x4d]);
    v.extend_from_slice(&sample_pmm_bytes());
    v.extend_from_slice(&[0x00, 0xf1]);
    v.extend_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x43, 0x00]);
    v.extend_from_slice(&[0x0b, 0x00]);
    v
}

/// Hex helper so fixtures read like captured traffic.
pub fn bytes(hex_text: &str) -> Vec<u8> {
    let compact: String = hex_text.split_whitespace().collect();
    hex::decode(compact).unwrap()
}

fn block(hex_text: &str) -> [u8; 16] {
    bytes(hex_text).try_into().unwrap()
}

/// A small but realistic FeliCa Lite dump.
pub fn lite_dump_trace() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend(lite_record(0x00, *b"Hello FeliCa Li "));
    t.extend(lite_record(
        0x0e,
        block("01 00 00 00 02 00 00 00 aa bb cc dd ee ff 00 11"),
    ));
    t.extend(lite_record(
        0x82,
        block("01 2e 4c d3 1a 2b 3c 4d 00 f1 00 00 00 00 00 00"),
    ));
    t.extend(lite_record(
        0x83,
        block("01 2e 4c d3 1a 2b 3c 4d 00 f1 00 00 00 01 43 00"),
    ));
    t.extend(lite_record(
        0x85,
        block("b4 88 00 00 00 00 00 00 00 00 00 00 00 00 00 00"),
    ));
    t.extend(lite_record(
        0x88,
        block("ff ff ff 01 07 00 00 00 00 00 00 00 00 00 00 00"),
    ));
    t.extend(lite_record(
        0x90,
        block("03 02 01 00 00 00 00 00 00 00 00 00 00 00 00 00"),
    ));
    t.extend(lite_record(
        0xa0,
        block("00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00"),
    ));
    t
}
