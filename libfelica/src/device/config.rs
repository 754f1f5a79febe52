// libfelica/src/device/config.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timeouts and retry policy for one reader transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransactionConfig {
    /// Wait for each reply of a raw exchange.
    pub reply_timeout_ms: u64,
    /// Wait for the card-select reply.
    pub select_timeout_ms: u64,
    /// Wait per Lite dump acknowledgement poll.
    pub dump_poll_timeout_ms: u64,
    /// Failed acknowledgement polls tolerated before a hard timeout.
    pub dump_retry_limit: u32,
    /// Wait for the trace buffer download.
    pub fetch_timeout_ms: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            reply_timeout_ms: 2000,
            select_timeout_ms: 2500,
            dump_poll_timeout_ms: 2000,
            dump_retry_limit: 100,
            fetch_timeout_ms: 2500,
        }
    }
}

impl TransactionConfig {
    /// Upper bound on how long a Lite dump waits for its acknowledgement.
    pub fn dump_wait_budget_ms(&self) -> u64 {
        self.dump_poll_timeout_ms
            .saturating_mul(u64::from(self.dump_retry_limit) + 1)
    }
}
