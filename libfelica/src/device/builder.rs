// libfelica/src/device/builder.rs

use crate::device::config::TransactionConfig;
use crate::device::handle::Device;
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
pub struct DeviceBuilder<T: Transport = Box<dyn Transport>> {
    transport: Option<T>,
    config: TransactionConfig,
}

impl<T: Transport> Default for DeviceBuilder<T> {
    fn default() -> Self {
        Self {
            transport: None,
            config: TransactionConfig::default(),
        }
    }
}

impl<T: Transport> DeviceBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_config(mut self, config: TransactionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn reply_timeout_ms(mut self, ms: u64) -> Self {
        self.config.reply_timeout_ms = ms;
        self
    }

    pub fn dump_retry_limit(mut self, limit: u32) -> Self {
        self.config.dump_retry_limit = limit;
        self
    }

    /// Consume the builder. A transport is required.
    pub fn build(self) -> Result<Device<T>> {
        match self.transport {
            Some(t) => Ok(Device::with_config(t, self.config)),
            None => Err(Error::Transport("no transport configured".into())),
        }
    }
}
