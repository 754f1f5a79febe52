// libfelica/src/card/lite/block.rs

use std::fmt;

use super::memory_config::MemoryConfig;
use crate::types::{BlockData, Idm, Pmm, SystemCode};
use crate::utils::{bytes_to_hex, bytes_to_hex_spaced};

/// FeliCa Lite block numbers.
pub mod block_id {
    pub const S_PAD_LAST: u8 = 0x0d;
    pub const REG: u8 = 0x0e;
    pub const RC: u8 = 0x80;
    pub const MAC: u8 = 0x81;
    pub const ID: u8 = 0x82;
    pub const D_ID: u8 = 0x83;
    pub const SER_C: u8 = 0x84;
    pub const SYS_C: u8 = 0x85;
    pub const CKV: u8 = 0x86;
    pub const CK: u8 = 0x87;
    pub const MC: u8 = 0x88;
    pub const WCNT: u8 = 0x90;
    pub const MAC_A: u8 = 0x91;
    pub const STATE: u8 = 0x92;
    pub const CRC_CHECK: u8 = 0xa0;
}

/// Interpreted content of a single FeliCa Lite block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteBlock {
    /// S_PAD0 .. S_PAD13
    UserPad { index: u8, data: BlockData },
    Register { reg_a: u32, reg_b: u32, reg_c: [u8; 8] },
    RandomChallenge(BlockData),
    Mac(BlockData),
    Identity {
        idd: [u8; 8],
        device_class: u16,
        arbitration: [u8; 6],
    },
    DeviceId { idm: Idm, pmm: Pmm },
    SerialCounter(u16),
    SystemCode(SystemCode),
    KeyVersion(u16),
    CardKey(BlockData),
    MemoryConfig(MemoryConfig),
    /// 24-bit write counter.
    WriteCounter(u32),
    MacA(BlockData),
    State { authenticated: bool, polling_disabled: bool },
    /// Result of the card's own CRC check over every block.
    Integrity { all_blocks_match: bool },
    Unknown { id: u8, data: BlockData },
}

impl LiteBlock {
    pub fn decode(id: u8, data: &BlockData) -> Self {
        use block_id::*;

        let b = data.as_bytes();
        match id {
            0x00..=S_PAD_LAST => Self::UserPad {
                index: id,
                data: *data,
            },
            REG => Self::Register {
                reg_a: u32::from_le_bytes(data.field(0)),
                reg_b: u32::from_le_bytes(data.field(4)),
                reg_c: data.field(8),
            },
            RC => Self::RandomChallenge(*data),
            MAC => Self::Mac(*data),
            ID => Self::Identity {
                idd: data.field(0),
                device_class: u16::from_le_bytes(data.field(8)),
                arbitration: data.field(10),
            },
            D_ID => Self::DeviceId {
                idm: Idm::from_bytes(data.field(0)),
                pmm: Pmm::from_bytes(data.field(8)),
            },
            SER_C => Self::SerialCounter(u16::from_le_bytes(data.field(0))),
            SYS_C => Self::SystemCode(SystemCode::from_le_bytes(data.field(0))),
            CKV => Self::KeyVersion(u16::from_le_bytes(data.field(0))),
            CK => Self::CardKey(*data),
            MC => Self::MemoryConfig(MemoryConfig::from_block(data)),
            WCNT => Self::WriteCounter(u32::from_le_bytes([b[0], b[1], b[2], 0])),
            MAC_A => Self::MacA(*data),
            STATE => Self::State {
                authenticated: b[0] != 0,
                polling_disabled: b[8] != 0,
            },
            // 0xFF at [2] means at least one block failed the CRC check
            CRC_CHECK => Self::Integrity {
                all_blocks_match: b[2] != 0xff,
            },
            _ => Self::Unknown { id, data: *data },
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

impl fmt::Display for LiteBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserPad { index, data } => write!(
                f,
                "S_PAD{:<2} : {} | {}",
                index,
                data.to_hex(),
                data.to_ascii_safe()
            ),
            Self::Register {
                reg_a,
                reg_b,
                reg_c,
            } => {
                writeln!(f, "REG: regA: {}", reg_a)?;
                writeln!(f, "REG: regB: {}", reg_b)?;
                write!(f, "REG: regC: {}", bytes_to_hex_spaced(reg_c))
            }
            Self::RandomChallenge(data) => write!(f, "RC: {}", data.to_hex()),
            Self::Mac(data) => write!(f, "MAC (only after RC write): {}", data.to_hex()),
            Self::Identity {
                idd,
                device_class,
                arbitration,
            } => {
                writeln!(f, "ID Block IDd: 0x{}", bytes_to_hex(idd))?;
                writeln!(f, "ID Block DFC: 0x{:04x}", device_class)?;
                write!(f, "ID Block Arb: {}", bytes_to_hex(arbitration))
            }
            Self::DeviceId { idm, pmm } => {
                writeln!(f, "D_ID IDm: {}", idm.to_hex())?;
                write!(f, "D_ID PMm: {}", pmm.to_hex())
            }
            Self::SerialCounter(v) => write!(f, "SER_C: 0x{:04x}", v),
            Self::SystemCode(code) => write!(f, "SYS_C: {}", code),
            Self::KeyVersion(v) => write!(f, "CKV: 0x{:04x}", v),
            Self::CardKey(data) => write!(f, "CK: {}", data.to_hex()),
            Self::MemoryConfig(mc) => fmt::Display::fmt(mc, f),
            Self::WriteCounter(v) => write!(f, "WCNT: 0x{:06x}", v),
            Self::MacA(data) => write!(f, "MAC_A: {}", data.to_hex()),
            Self::State {
                authenticated,
                polling_disabled,
            } => {
                writeln!(
                    f,
                    "Ext Auth: {}",
                    if *authenticated { "authenticated" } else { "not authenticated" }
                )?;
                write!(
                    f,
                    "Polling disabled: {}",
                    if *polling_disabled { "yes" } else { "no" }
                )
            }
            Self::Integrity { all_blocks_match } => write!(
                f,
                "CRC of all blocks {}",
                if *all_blocks_match { "match" } else { "don't match" }
            ),
            Self::Unknown { id, data } => {
                write!(f, "unknown block 0x{:02x}: {}", id, data.to_hex())
            }
        }
    }
}
