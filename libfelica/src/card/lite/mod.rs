// libfelica/src/card/lite/mod.rs

//! FeliCa Lite dump decoding.
//!
//! A dump trace is a flat sequence of 19-byte records:
//! block id(1) | status1(1) | status2(1) | block data(16).
//! Trailing bytes that do not form a whole record are ignored.

use std::fmt;
use std::iter::FusedIterator;
use std::slice::ChunksExact;

use log::warn;

use crate::constants::LITE_RECORD_LEN;
use crate::types::BlockData;
use crate::utils::hex_dump;

pub mod block;
mod memory_config;

pub use block::{LiteBlock, block_id};
pub use memory_config::MemoryConfig;

const DUMP_BYTES_PER_LINE: usize = 32;
const SEPARATOR: &str = "-----------------------------------------------------------------";

/// One record of a Lite dump trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteRecord {
    pub block_id: u8,
    pub status1: u8,
    pub status2: u8,
    pub data: BlockData,
}

impl LiteRecord {
    fn from_chunk(chunk: &[u8]) -> Self {
        let mut data = [0u8; 16];
        data.copy_from_slice(&chunk[3..LITE_RECORD_LEN]);
        Self {
            block_id: chunk[0],
            status1: chunk[1],
            status2: chunk[2],
            data: BlockData::from_bytes(data),
        }
    }

    pub fn decode(&self) -> LiteBlock {
        LiteBlock::decode(self.block_id, &self.data)
    }
}

impl fmt::Display for LiteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "block number {:02x}, status: {:02x} {:02x}",
            self.block_id, self.status1, self.status2
        )?;
        write!(f, "{}", self.decode())
    }
}

/// Borrowed view over a raw Lite dump trace.
#[derive(Debug, Clone, Copy)]
pub struct LiteTrace<'a>(&'a [u8]);

impl<'a> LiteTrace<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Number of whole records in the trace.
    pub fn record_count(&self) -> usize {
        self.0.len() / LITE_RECORD_LEN
    }

    /// Records in trace order. The iterator is `Clone`, so decoding can restart.
    pub fn records(&self) -> LiteRecords<'a> {
        LiteRecords {
            chunks: self.0.chunks_exact(LITE_RECORD_LEN),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiteRecords<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl Iterator for LiteRecords<'_> {
    type Item = LiteRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(LiteRecord::from_chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for LiteRecords<'_> {}
impl FusedIterator for LiteRecords<'_> {}

/// Owned Lite dump as fetched from the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteDump {
    trace: Vec<u8>,
}

impl LiteDump {
    pub fn new(trace: Vec<u8>) -> Self {
        Self { trace }
    }

    pub fn trace(&self) -> LiteTrace<'_> {
        LiteTrace::new(&self.trace)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.trace
    }

    /// Decode every record, logging blocks the decoder does not know.
    pub fn blocks(&self) -> Vec<(LiteRecord, LiteBlock)> {
        self.trace()
            .records()
            .map(|rec| {
                let block = rec.decode();
                if block.is_unknown() {
                    warn!("unknown lite block 0x{:02x}", rec.block_id);
                }
                (rec, block)
            })
            .collect()
    }
}

impl fmt::Display for LiteDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recorded Activity (trace len = {} bytes)", self.trace.len())?;
        writeln!(f, "{}", hex_dump(&self.trace, DUMP_BYTES_PER_LINE))?;
        writeln!(f, "{}", SEPARATOR)?;
        for (rec, _) in self.blocks() {
            writeln!(f, "{}", rec)?;
        }
        write!(f, "{}", SEPARATOR)
    }
}
