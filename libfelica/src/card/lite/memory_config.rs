// libfelica/src/card/lite/memory_config.rs

use std::fmt;

use crate::types::BlockData;
use crate::utils::bytes_to_bits;

/// Memory Configuration (MC) block of a FeliCa Lite card.
///
/// Each pad bitmap holds one bit per S_PAD block (bit N = pad N).
/// Displayed byte by byte as stored on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    pub pad_read_write: u16,
    /// Set only when the MC byte is exactly `0xFF`.
    pub writable: bool,
    pub ndef_compatible: bool,
    /// Three-bit RF parameter.
    pub rf_parameter: u8,
    /// MAC required to write the card key and its key version.
    pub key_write_requires_mac: bool,
    pub pad_read_after_auth: u16,
    pub pad_write_with_auth: u16,
    pub pad_write_with_mac: u16,
    /// MAC required to write the STATE block.
    pub state_write_requires_mac: bool,
}

impl MemoryConfig {
    pub fn from_block(data: &BlockData) -> Self {
        let b = data.as_bytes();
        Self {
            pad_read_write: u16::from_le_bytes(data.field(0)),
            writable: b[2] == 0xff,
            ndef_compatible: b[3] != 0,
            rf_parameter: b[4] & 0x07,
            key_write_requires_mac: b[5] != 0,
            pad_read_after_auth: u16::from_le_bytes(data.field(6)),
            pad_write_with_auth: u16::from_le_bytes(data.field(8)),
            pad_write_with_mac: u16::from_le_bytes(data.field(10)),
            state_write_requires_mac: b[12] != 0,
        }
    }
}

fn bits(map: u16) -> String {
    bytes_to_bits(&map.to_le_bytes())
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

impl fmt::Display for MemoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memory Configuration (MC):")?;
        writeln!(
            f,
            "MAC needed to write state: {}",
            on_off(self.state_write_requires_mac)
        )?;
        writeln!(f, "Write with MAC for S_PAD  : {}", bits(self.pad_write_with_mac))?;
        writeln!(f, "Write with AUTH for S_PAD : {}", bits(self.pad_write_with_auth))?;
        writeln!(f, "Read after AUTH for S_PAD : {}", bits(self.pad_read_after_auth))?;
        writeln!(
            f,
            "MAC needed to write CK and CKV: {}",
            on_off(self.key_write_requires_mac)
        )?;
        writeln!(f, "RF parameter: {:02x}", self.rf_parameter)?;
        writeln!(f, "Compatible with NDEF: {}", yes_no(self.ndef_compatible))?;
        writeln!(f, "Memory config writable : {}", yes_no(self.writable))?;
        write!(f, "RW access for S_PAD : {}", bits(self.pad_read_write))
    }
}
