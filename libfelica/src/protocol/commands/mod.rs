// libfelica/src/protocol/commands/mod.rs

pub mod raw;
pub mod service;
pub mod sniff;

pub use raw::{RawRequest, build_raw};
pub use service::{encode_request_service, parse_request_service, request_service_frame};
pub use sniff::{SniffParams, SniffRequest, parse_sniff};

use crate::protocol::frame::{CommandFrame, FelicaFlags};

pub const DUMP_USAGE: &str = "\
Usage: litedump [h]
Dumps an ISO/18092 FeliCa Lite tag. Press the reader button to abort,
otherwise the reader keeps trying for 200 seconds.
    h     : this help";

pub const READER_USAGE: &str = "\
Usage: reader [s]
Acts like an ISO/18092 FeliCa reader and prints the selected card.
    s     : silent, do not report select failures";

/// Reader command opcodes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    FelicaSniff = 0x0381,
    FelicaCommand = 0x0382,
    FelicaLiteDump = 0x0383,
}

/// One packet as handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPacket {
    pub opcode: Opcode,
    pub flags: u64,
    pub args: u64,
    pub payload: Vec<u8>,
}

/// High-level Command enum. Each variant knows its opcode and packing.
#[derive(Debug, Clone)]
pub enum Command {
    /// Power the field and select a card.
    Select,
    Raw(CommandFrame),
    Sniff(SniffParams),
    LiteDump,
}

impl Command {
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Select | Self::Raw(_) => Opcode::FelicaCommand,
            Self::Sniff(_) => Opcode::FelicaSniff,
            Self::LiteDump => Opcode::FelicaLiteDump,
        }
    }

    pub fn encode(&self) -> CommandPacket {
        let (flags, args, payload) = match self {
            Self::Select => (u64::from(FelicaFlags::CONNECT.bits()), 0, Vec::new()),
            Self::Raw(frame) => (
                u64::from(frame.wire_flags().bits()),
                u64::from(frame.packed_length()),
                frame.payload().to_vec(),
            ),
            Self::Sniff(p) => (
                u64::from(p.samples_to_skip),
                u64::from(p.triggers_to_skip),
                Vec::new(),
            ),
            Self::LiteDump => (0, 0, Vec::new()),
        };
        CommandPacket {
            opcode: self.opcode(),
            flags,
            args,
            payload,
        }
    }
}

/// `litedump` takes nothing but an optional help flag.
pub fn dump_wants_usage(cmd: &str) -> bool {
    cmd.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'h'))
}

/// `reader s` silences select failures; anything else is verbose.
pub fn reader_is_verbose(cmd: &str) -> bool {
    !cmd.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'s'))
}
