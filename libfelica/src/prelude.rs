// libfelica/src/prelude.rs

pub use crate::card::{CardIdentity, LiteBlock, LiteDump, LiteRecord, LiteTrace, MemoryConfig};
pub use crate::device::{Device, DeviceBuilder, RawExchange, RawReply, TransactionConfig};
pub use crate::protocol::commands::{RawRequest, SniffParams, SniffRequest, build_raw, parse_sniff};
pub use crate::protocol::{
    ChecksumStatus, Command, CommandFrame, FelicaFlags, FrameOptions, Opcode, ResponseFrame,
};
pub use crate::transport::{MockTransport, Transport};
pub use crate::{
    BlockData, Error, ExitStatus, Idm, Pmm, Result, ServiceCode, SystemCode,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, hex_dump, parse_hex};
