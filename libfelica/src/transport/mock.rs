// libfelica/src/transport/mock.rs

use std::collections::VecDeque;

use crate::protocol::{CommandPacket, Opcode, ResponseFrame};
use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Mock transport for unit tests. It records sent packets and replays queued acknowledgements.
///
/// A queued `None` stands for one poll that timed out; an empty queue
/// also times out.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<CommandPacket>,
    pub acks: VecDeque<Option<ResponseFrame>>,
    /// Reader-side trace buffer served by `fetch_buffer`.
    pub trace: Vec<u8>,
    pub field_drops: usize,
    pub buffer_clears: usize,
    /// Timeouts passed to `wait_for_ack`, in call order.
    pub waits: Vec<u64>,
    /// Cancellation becomes visible once this many polls have been checked.
    pub cancel_after: Option<usize>,
    cancel_checks: usize,
    /// Testing hook: make the next `fetch_buffer` fail.
    pub fail_fetch: bool,
    /// Every `wait_for_ack` after this many calls fails with a transport error.
    pub fail_wait_after: Option<usize>,
    /// `drop_field` is still counted but reports a transport error.
    pub fail_drop: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ack(&mut self, frame: ResponseFrame) {
        self.acks.push_back(Some(frame));
    }

    /// Queue `n` polls that time out.
    pub fn push_timeouts(&mut self, n: usize) {
        self.acks.extend(std::iter::repeat_n(None, n));
    }

    pub fn set_trace(&mut self, trace: Vec<u8>) {
        self.trace = trace;
    }

    pub fn cancel_after(&mut self, polls: usize) {
        self.cancel_after = Some(polls);
    }

    pub fn last_sent(&self) -> Option<&CommandPacket> {
        self.sent.last()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, opcode: Opcode, flags: u64, args: u64, payload: &[u8]) -> Result<()> {
        self.sent.push(CommandPacket {
            opcode,
            flags,
            args,
            payload: payload.to_vec(),
        });
        Ok(())
    }

    fn wait_for_ack(&mut self, timeout_ms: u64) -> Result<Option<ResponseFrame>> {
        self.waits.push(timeout_ms);
        if self.fail_wait_after.is_some_and(|n| self.waits.len() > n) {
            return Err(Error::Transport("reader disconnected".into()));
        }
        Ok(self.acks.pop_front().flatten())
    }

    /// Serves what the trace holds, so a trace shorter than `len` is a short read.
    fn fetch_buffer(
        &mut self,
        offset: usize,
        len: usize,
        _timeout_ms: u64,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        if self.fail_fetch {
            self.fail_fetch = false;
            return Err(Error::Timeout);
        }
        if offset > self.trace.len() {
            return Err(Error::InvalidLength {
                expected: offset,
                actual: self.trace.len(),
            });
        }
        let end = offset.saturating_add(len).min(self.trace.len());
        out.extend_from_slice(&self.trace[offset..end]);
        Ok(())
    }

    fn drop_field(&mut self) -> Result<()> {
        self.field_drops += 1;
        if self.fail_drop {
            return Err(Error::Transport("field control failed".into()));
        }
        Ok(())
    }

    fn is_cancel_requested(&mut self) -> bool {
        self.cancel_checks += 1;
        self.cancel_after.is_some_and(|n| self.cancel_checks > n)
    }

    fn clear_command_buffer(&mut self) -> Result<()> {
        self.buffer_clears += 1;
        // Stale acks are kept so tests can pre-seed replies before a transaction.
        Ok(())
    }
}
