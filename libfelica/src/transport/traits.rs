// libfelica/src/transport/traits.rs

use crate::Result;
use crate::protocol::{Opcode, ResponseFrame};

/// Transport trait abstracts the reader link away from protocol/device logic.
///
/// Waits are bounded by the caller-supplied timeout; `wait_for_ack`
/// returns `Ok(None)` when the timeout elapses without a reply.
pub trait Transport {
    /// Hand one command to the reader.
    fn send(&mut self, opcode: Opcode, flags: u64, args: u64, payload: &[u8]) -> Result<()>;

    /// Wait up to `timeout_ms` for the reader's acknowledgement.
    fn wait_for_ack(&mut self, timeout_ms: u64) -> Result<Option<ResponseFrame>>;

    /// Append up to `len` bytes of the reader's trace buffer to `out`.
    ///
    /// `out` is reserved by the caller; a short read is reported by the
    /// length of `out`, not by an error.
    fn fetch_buffer(
        &mut self,
        offset: usize,
        len: usize,
        timeout_ms: u64,
        out: &mut Vec<u8>,
    ) -> Result<()>;

    /// Switch the RF field off.
    fn drop_field(&mut self) -> Result<()>;

    /// Cooperative cancellation, checked once per poll.
    fn is_cancel_requested(&mut self) -> bool;

    /// Discard any stale replies before a new transaction. Transports
    /// without a command buffer keep the default no-op.
    fn clear_command_buffer(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, opcode: Opcode, flags: u64, args: u64, payload: &[u8]) -> Result<()> {
        (**self).send(opcode, flags, args, payload)
    }

    fn wait_for_ack(&mut self, timeout_ms: u64) -> Result<Option<ResponseFrame>> {
        (**self).wait_for_ack(timeout_ms)
    }

    fn fetch_buffer(
        &mut self,
        offset: usize,
        len: usize,
        timeout_ms: u64,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        (**self).fetch_buffer(offset, len, timeout_ms, out)
    }

    fn drop_field(&mut self) -> Result<()> {
        (**self).drop_field()
    }

    fn is_cancel_requested(&mut self) -> bool {
        (**self).is_cancel_requested()
    }

    fn clear_command_buffer(&mut self) -> Result<()> {
        (**self).clear_command_buffer()
    }
}
