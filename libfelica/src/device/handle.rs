// libfelica/src/device/handle.rs

use log::{debug, info, warn};

use crate::card::{CardIdentity, LiteDump};
use crate::device::config::TransactionConfig;
use crate::protocol::commands::{
    Command, RawRequest, SniffParams, build_raw, parse_request_service, reader_is_verbose,
    request_service_frame,
};
use crate::protocol::frame::{CommandFrame, FrameOptions, ReplyPhase, ResponseFrame};
use crate::protocol::responses::{
    ChecksumStatus, ServiceReply, decode_request_service, decode_select, validate_reply,
};
use crate::transport::Transport;
use crate::types::Idm;
use crate::{Error, Result};

/// One validated reply of a raw exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub phase: ReplyPhase,
    /// Declared bytes of the reply, prefix included.
    pub payload: Vec<u8>,
    pub checksum: ChecksumStatus,
}

/// Replies collected for one raw command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawExchange {
    /// Present for active-with-select requests.
    pub select: Option<RawReply>,
    /// Present when a payload was transmitted.
    pub data: Option<RawReply>,
}

/// Scoped access to the reader for a single command.
///
/// Opening a transaction clears the reader's command buffer so stale
/// replies from an earlier command are never mistaken for this one.
pub struct Transaction<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
    config: &'a TransactionConfig,
}

impl<T: Transport + ?Sized> Transaction<'_, T> {
    pub fn send(&mut self, cmd: &Command) -> Result<()> {
        let packet = cmd.encode();
        debug!(
            "send {:?} flags={:#x} args={:#x} len={}",
            packet.opcode,
            packet.flags,
            packet.args,
            packet.payload.len()
        );
        self.transport
            .send(packet.opcode, packet.flags, packet.args, &packet.payload)
    }

    pub fn wait(&mut self, timeout_ms: u64) -> Result<Option<ResponseFrame>> {
        self.transport.wait_for_ack(timeout_ms)
    }

    /// Wait for one reply and validate the part belonging to `phase`.
    pub fn expect_reply(&mut self, phase: ReplyPhase) -> Result<RawReply> {
        let timeout = self.config.reply_timeout_ms;
        let reply = self.wait(timeout)?.ok_or(Error::Timeout)?;
        let checked = validate_reply(&reply, phase)?;
        Ok(RawReply {
            phase,
            payload: checked.payload.to_vec(),
            checksum: checked.checksum,
        })
    }

    pub fn drop_field(&mut self) -> Result<()> {
        self.transport.drop_field()
    }

    fn poll_dump_ack(&mut self) -> Result<ResponseFrame> {
        let mut failed_polls: u32 = 0;
        loop {
            if let Some(ack) = self.wait(self.config.dump_poll_timeout_ms)? {
                return Ok(ack);
            }
            failed_polls += 1;
            debug!("no dump acknowledgement after {} polls", failed_polls);

            if self.transport.is_cancel_requested() {
                info!("dump aborted by user");
                return Err(Error::Aborted);
            }
            if failed_polls > self.config.dump_retry_limit {
                warn!("timeout while waiting for dump acknowledgement");
                return Err(Error::Timeout);
            }
        }
    }
}

/// Reader handle: a transport plus the timing policy applied to it.
pub struct Device<T: Transport = Box<dyn Transport>> {
    transport: T,
    config: TransactionConfig,
}

impl<T: Transport> Device<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, TransactionConfig::default())
    }

    pub fn with_config(transport: T, config: TransactionConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &TransactionConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Begin a transaction, clearing the reader's command buffer.
    pub fn transaction(&mut self) -> Result<Transaction<'_, T>> {
        self.transport.clear_command_buffer()?;
        Ok(Transaction {
            transport: &mut self.transport,
            config: &self.config,
        })
    }

    /// Transmit a raw frame and collect the replies it asks for.
    pub fn raw(&mut self, frame: &CommandFrame) -> Result<RawExchange> {
        let mut tx = self.transaction()?;
        tx.send(&Command::Raw(frame.clone()))?;

        let mut exchange = RawExchange::default();
        if !frame.expects_reply() {
            return Ok(exchange);
        }
        if frame.options().contains(FrameOptions::ACTIVE_SELECT) {
            info!("active select wait for FeliCa");
            exchange.select = match tx.expect_reply(ReplyPhase::Select) {
                Ok(reply) => Some(reply),
                Err(Error::Timeout) => {
                    warn!("timeout while waiting for select reply");
                    None
                }
                Err(e) => return Err(e),
            };
        }
        if !frame.payload().is_empty() {
            exchange.data = Some(tx.expect_reply(ReplyPhase::Data)?);
        }
        Ok(exchange)
    }

    /// Parse a `raw` command line and run it. `Ok(None)` means usage was requested.
    pub fn raw_command(&mut self, cmd: &str) -> Result<Option<RawExchange>> {
        match build_raw(cmd)? {
            RawRequest::Usage => Ok(None),
            RawRequest::Transmit(frame) => self.raw(&frame).map(Some),
        }
    }

    /// Power the field and select whatever card answers.
    pub fn read_card(&mut self) -> Result<CardIdentity> {
        let timeout = self.config.select_timeout_ms;
        let mut tx = self.transaction()?;
        tx.send(&Command::Select)?;
        let reply = tx
            .wait(timeout)?
            .ok_or_else(|| Error::SelectFailed("no reply from reader".into()))?;
        decode_select(&reply)
    }

    /// `reader [s]`: select a card, logging failures unless silenced.
    pub fn reader(&mut self, cmd: &str) -> Result<CardIdentity> {
        let verbose = reader_is_verbose(cmd);
        self.read_card().inspect_err(|e| {
            if verbose {
                warn!("{}", e);
            }
        })
    }

    /// Start sniffing; the reader does not acknowledge.
    pub fn sniff(&mut self, params: SniffParams) -> Result<()> {
        let mut tx = self.transaction()?;
        tx.send(&Command::Sniff(params))?;
        info!(
            "sniffing (skip {} samples, {} triggers), press the reader button to stop",
            params.samples_to_skip, params.triggers_to_skip
        );
        Ok(())
    }

    /// Ask the card for the key versions of `node_codes`.
    pub fn request_service(&mut self, idm: Idm, node_codes: &[u16]) -> Result<ServiceReply> {
        let frame = request_service_frame(idm, node_codes)?;
        let exchange = self.raw(&frame)?;
        let reply = exchange
            .data
            .ok_or_else(|| Error::NoData("no reply to request service".into()))?;
        decode_request_service(&reply.payload)
    }

    /// `rqservice` command line: send as given and return the raw replies.
    pub fn request_service_command(&mut self, cmd: &str) -> Result<Option<RawExchange>> {
        match parse_request_service(cmd)? {
            RawRequest::Usage => Ok(None),
            RawRequest::Transmit(frame) => self.raw(&frame).map(Some),
        }
    }

    /// Dump a FeliCa Lite card.
    ///
    /// The acknowledgement is polled every `dump_poll_timeout_ms`. Any failed
    /// poll loop (cancellation, more than `dump_retry_limit` empty polls, a
    /// transport error) drops the field once and returns the poll's error.
    /// A trace shorter than announced is a `Timeout`.
    pub fn lite_dump(&mut self) -> Result<LiteDump> {
        let config = self.config;
        let mut tx = self.transaction()?;
        tx.send(&Command::LiteDump)?;
        info!("FeliCa Lite - dump started");

        let ack = match tx.poll_dump_ack() {
            Ok(ack) => ack,
            Err(e) => {
                if let Err(drop_err) = tx.drop_field() {
                    warn!("could not switch the field off: {}", drop_err);
                }
                return Err(e);
            }
        };

        if ack.arg0 == 0 {
            info!("button pressed, dump aborted on the reader");
            return Err(Error::Aborted);
        }
        let len = ack.arg1 as usize;
        if len == 0 {
            return Err(Error::NoData(
                "no trace data, maybe not a FeliCa Lite card".into(),
            ));
        }

        let mut trace = Vec::new();
        trace
            .try_reserve_exact(len)
            .map_err(|_| Error::AllocationFailure { requested: len })?;
        tx.transport
            .fetch_buffer(0, len, config.fetch_timeout_ms, &mut trace)
            .map_err(|e| {
                warn!("trace download failed: {}", e);
                Error::Timeout
            })?;
        if trace.len() != len {
            warn!(
                "trace download incomplete: {} of {} bytes",
                trace.len(),
                len
            );
            return Err(Error::Timeout);
        }
        info!("recorded activity (trace len = {} bytes)", trace.len());
        Ok(LiteDump::new(trace))
    }
}
