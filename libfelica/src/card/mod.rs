// libfelica/src/card/mod.rs

mod identity;
pub use identity::CardIdentity;

pub mod lite;
pub use lite::{LiteBlock, LiteDump, LiteRecord, LiteTrace, MemoryConfig, block_id};
