// libfelica/src/protocol/responses/mod.rs

pub mod select;
pub mod service;

pub use select::{SelectStatus, decode_select};
pub use service::{ServiceReply, decode_request_service};

use log::warn;

use crate::constants::RESPONSE_PREFIX_LEN;
use crate::protocol::checksum;
use crate::protocol::frame::{ReplyPhase, ResponseFrame};
use crate::{Error, Result};

/// Outcome of checking a received frame's checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumStatus {
    /// Zero-length reply: nothing to check.
    Empty,
    Valid,
    /// Diagnostic only; the payload is still returned.
    Mismatch,
}

/// Payload slice of a received frame with its checksum verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPayload<'a> {
    pub payload: &'a [u8],
    pub checksum: ChecksumStatus,
}

impl ValidatedPayload<'_> {
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Validate `declared_len` bytes of `data`.
///
/// The first [`RESPONSE_PREFIX_LEN`] bytes are outside the checksum domain.
/// A checksum mismatch is logged and reported in the result, never raised.
/// Only a declared length larger than the received buffer is an error.
pub fn validate(data: &[u8], declared_len: u32) -> Result<ValidatedPayload<'_>> {
    let len = declared_len as usize;
    if len == 0 {
        return Ok(ValidatedPayload {
            payload: &[],
            checksum: ChecksumStatus::Empty,
        });
    }
    if len > data.len() {
        return Err(Error::InvalidLength {
            expected: len,
            actual: data.len(),
        });
    }

    let payload = &data[..len];
    let ok = payload
        .get(RESPONSE_PREFIX_LEN..)
        .is_some_and(|p| checksum::verify(p));
    let checksum = if ok {
        ChecksumStatus::Valid
    } else {
        warn!("CRC of received bytes is incorrect");
        ChecksumStatus::Mismatch
    };
    Ok(ValidatedPayload { payload, checksum })
}

/// Validate the part of `reply` that belongs to `phase`.
pub fn validate_reply(reply: &ResponseFrame, phase: ReplyPhase) -> Result<ValidatedPayload<'_>> {
    validate(&reply.data, reply.declared_len(phase))
}
