// libfelica/src/device/mod.rs

pub mod builder;
pub mod config;
pub mod handle;

pub use builder::DeviceBuilder;
pub use config::TransactionConfig;
pub use handle::{Device, RawExchange, RawReply, Transaction};
