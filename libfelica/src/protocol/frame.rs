// libfelica/src/protocol/frame.rs

use bitflags::bitflags;

use crate::constants::{CHECKSUM_LEN, MAX_FRAME_LEN};
use crate::protocol::checksum;
use crate::{Error, Result};

bitflags! {
    /// Control options picked by the caller of a raw command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FrameOptions: u8 {
        /// Leave the field powered after the reply has been received.
        const KEEP_FIELD = 1 << 0;
        /// Power the field without running the select phase.
        const ACTIVE_NO_SELECT = 1 << 1;
        /// Power the field and run the select phase first.
        const ACTIVE_SELECT = 1 << 2;
        /// Transmit only; do not wait for any reply.
        const NO_REPLY = 1 << 3;
    }
}

bitflags! {
    /// Flags understood by the reader firmware for `Opcode::FelicaCommand`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FelicaFlags: u8 {
        const CONNECT = 1 << 0;
        const NO_DISCONNECT = 1 << 1;
        const RAW = 1 << 3;
        const APPEND_CRC = 1 << 5;
        const NO_SELECT = 1 << 6;
    }
}

/// Outbound raw command: payload bytes plus the options that drive the field.
///
/// The payload never exceeds [`MAX_FRAME_LEN`]. When `checksum_appended` is
/// set, its last two bytes are the checksum (high, low).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandFrame {
    payload: Vec<u8>,
    bit_length: Option<u16>,
    checksum_appended: bool,
    options: FrameOptions,
}

impl CommandFrame {
    pub fn new(payload: Vec<u8>, options: FrameOptions) -> Result<Self> {
        if payload.len() > MAX_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_FRAME_LEN,
                actual: payload.len(),
            });
        }
        Ok(Self {
            payload,
            bit_length: None,
            checksum_appended: false,
            options,
        })
    }

    /// Transmit only `bits` bits of the final byte.
    pub fn with_bit_length(mut self, bits: u16) -> Self {
        self.bit_length = Some(bits);
        self
    }

    /// Whether a checksum can still be appended without overrunning the buffer.
    pub fn checksum_fits(&self) -> bool {
        !self.payload.is_empty() && self.payload.len() < MAX_FRAME_LEN - CHECKSUM_LEN
    }

    /// Append the checksum of the current payload, high byte first.
    ///
    /// Returns `false` (and leaves the frame untouched) when the payload is
    /// empty or there is no room left for the two checksum bytes.
    pub fn append_checksum(&mut self) -> bool {
        if self.checksum_appended || !self.checksum_fits() {
            return false;
        }
        let (high, low) = checksum::compute(&self.payload);
        self.payload.push(high);
        self.payload.push(low);
        self.checksum_appended = true;
        true
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn bit_length(&self) -> Option<u16> {
        self.bit_length
    }

    pub fn checksum_appended(&self) -> bool {
        self.checksum_appended
    }

    pub fn options(&self) -> FrameOptions {
        self.options
    }

    pub fn expects_reply(&self) -> bool {
        !self.options.contains(FrameOptions::NO_REPLY)
    }

    /// Flags sent to the reader alongside the payload.
    pub fn wire_flags(&self) -> FelicaFlags {
        let mut flags = FelicaFlags::empty();
        let active = self.options.contains(FrameOptions::ACTIVE_NO_SELECT);
        if active || self.options.contains(FrameOptions::ACTIVE_SELECT) {
            flags |= FelicaFlags::CONNECT;
            if active {
                flags |= FelicaFlags::NO_SELECT;
            }
        }
        if self.options.contains(FrameOptions::KEEP_FIELD) {
            flags |= FelicaFlags::NO_DISCONNECT;
        }
        if !self.payload.is_empty() {
            flags |= FelicaFlags::RAW;
        }
        flags
    }

    /// Payload length in the low half, final-byte bit count in the high half.
    pub fn packed_length(&self) -> u32 {
        let len = (self.payload.len() & 0xffff) as u32;
        len | (u32::from(self.bit_length.unwrap_or(0)) << 16)
    }
}

/// Which length side value of a reply describes its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPhase {
    /// Reply to the select phase of an active-with-select request (`arg1`).
    Select,
    /// Reply to the transmitted payload (`arg0`).
    Data,
}

/// Inbound reply from the reader: raw bytes plus two 32-bit side values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseFrame {
    pub data: Vec<u8>,
    pub arg0: u32,
    pub arg1: u32,
}

impl ResponseFrame {
    pub fn new(data: Vec<u8>, arg0: u32, arg1: u32) -> Self {
        Self { data, arg0, arg1 }
    }

    /// Declared byte count for the given phase, truncated to 16 bits.
    pub fn declared_len(&self, phase: ReplyPhase) -> u32 {
        let raw = match phase {
            ReplyPhase::Select => self.arg1,
            ReplyPhase::Data => self.arg0,
        };
        raw & 0xffff
    }
}
