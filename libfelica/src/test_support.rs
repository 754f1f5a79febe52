//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup and Lite trace
//! construction so tests across the crate and tests/ directory can reuse
//! the same logic.
#![allow(dead_code)]

use crate::constants::{BLOCK_LEN, LITE_RECORD_LEN};
use crate::device::Device;
use crate::protocol::{ResponseFrame, checksum};
use crate::transport::mock::MockTransport;

/// Build one 19-byte Lite record with zero status bytes.
#[doc(hidden)]
pub fn lite_record(block_id: u8, data: [u8; BLOCK_LEN]) -> Vec<u8> {
    let mut rec = Vec::with_capacity(LITE_RECORD_LEN);
    rec.extend_from_slice(&[block_id, 0x00, 0x00]);
    rec.extend_from_slice(&data);
    rec
}

/// Concatenate records into a trace.
#[doc(hidden)]
pub fn lite_trace(records: &[(u8, [u8; BLOCK_LEN])]) -> Vec<u8> {
    records
        .iter()
        .flat_map(|(id, data)| lite_record(*id, *data))
        .collect()
}

/// A reply as the reader delivers it: 2-byte prefix, body, checksum (high, low).
#[doc(hidden)]
pub fn framed_reply(body: &[u8]) -> Vec<u8> {
    let mut v = vec![0xb2, 0x4d];
    v.extend_from_slice(body);
    let (hi, lo) = checksum::compute(body);
    v.push(hi);
    v.push(lo);
    v
}

/// Mock that acknowledges a Lite dump of `trace` after `timeouts` empty polls.
#[doc(hidden)]
pub fn mock_with_lite_trace(trace: Vec<u8>, timeouts: usize) -> MockTransport {
    let mut mock = MockTransport::new();
    mock.push_timeouts(timeouts);
    mock.push_ack(ResponseFrame::new(Vec::new(), 1, trace.len() as u32));
    mock.set_trace(trace);
    mock
}

/// Convenience: a Device backed by a MockTransport pre-seeded with data-phase replies.
#[doc(hidden)]
pub fn mock_device_with_replies(replies: Vec<Vec<u8>>) -> Device<MockTransport> {
    let mut mock = MockTransport::new();
    for r in replies {
        let len = r.len() as u32;
        mock.push_ack(ResponseFrame::new(r, len, 0));
    }
    Device::new(mock)
}
