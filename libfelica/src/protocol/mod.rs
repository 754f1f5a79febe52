// libfelica/src/protocol/mod.rs

pub mod checksum;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use commands::{Command, CommandPacket, Opcode};
pub use frame::{CommandFrame, FelicaFlags, FrameOptions, ReplyPhase, ResponseFrame};
pub use responses::{ChecksumStatus, ValidatedPayload, validate, validate_reply};
