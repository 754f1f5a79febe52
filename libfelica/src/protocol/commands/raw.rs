// libfelica/src/protocol/commands/raw.rs

//! Textual raw command → [`CommandFrame`].
//!
//! Input is a mix of single-letter options (`-c`, `-b7`, ...) and hex digits.
//! Hex digits pair up into bytes regardless of the whitespace between them.

use log::warn;

use crate::constants::{MAX_FRAME_LEN, OPTION_MARKER};
use crate::protocol::frame::{CommandFrame, FrameOptions};
use crate::{Error, Result};

pub const USAGE: &str = "\
Usage: raw [-h] [-r] [-c] [-p] [-a] [-s] [-b<bits>] <0A 0B 0C ... hex>
       -h    this help
       -r    do not read response
       -c    calculate and append CRC
       -p    leave the signal field ON after receive
       -a    active signal field ON without select
       -s    active signal field ON with select
       -b    number of bits to send from the last byte (e.g. -b7)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Help,
    NoReply,
    AppendChecksum,
    KeepField,
    ActiveNoSelect,
    ActiveSelect,
    BitLength,
}

impl OptionKind {
    fn from_letter(c: char) -> Option<Self> {
        Some(match c {
            'h' | 'H' => Self::Help,
            'r' => Self::NoReply,
            'c' => Self::AppendChecksum,
            'p' => Self::KeepField,
            'a' => Self::ActiveNoSelect,
            's' => Self::ActiveSelect,
            'b' => Self::BitLength,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Option(OptionKind, Option<u16>),
    HexByte(u8),
}

/// Lexer over a raw command string. Stops after the first error.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
    nibble: Option<u8>,
}

impl<'a> Tokens<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            nibble: None,
        }
    }

    fn fail(&mut self, err: Error) -> Option<Result<Token>> {
        self.rest = "";
        self.nibble = None;
        Some(Err(err))
    }

    /// Decimal argument glued to the option letter, up to the next whitespace.
    fn embedded_decimal(&mut self) -> Result<u16> {
        let end = self
            .rest
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(self.rest.len());
        let (arg, rest) = self.rest.split_at(end);
        self.rest = rest;
        if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedInput(format!(
                "option -b needs a decimal bit count, got '{}'",
                arg
            )));
        }
        let value: u64 = arg
            .parse()
            .map_err(|e| Error::MalformedInput(format!("bit count '{}': {}", arg, e)))?;
        Ok((value & 0xffff) as u16)
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let Some(c) = chars.next() else {
                if let Some(n) = self.nibble.take() {
                    warn!("dropping trailing half byte '{:x}'", n);
                }
                return None;
            };
            self.rest = chars.as_str();

            if c.is_ascii_whitespace() {
                continue;
            }

            if c == OPTION_MARKER {
                let mut chars = self.rest.chars();
                let letter = chars.next();
                self.rest = chars.as_str();
                let kind = match letter.map(|l| (l, OptionKind::from_letter(l))) {
                    Some((_, Some(kind))) => kind,
                    Some((l, None)) => return self.fail(Error::UnknownOption(l)),
                    None => {
                        return self.fail(Error::MalformedInput(
                            "option marker without a letter".into(),
                        ));
                    }
                };
                if kind == OptionKind::BitLength {
                    return match self.embedded_decimal() {
                        Ok(bits) => Some(Ok(Token::Option(kind, Some(bits)))),
                        Err(e) => self.fail(e),
                    };
                }
                return Some(Ok(Token::Option(kind, None)));
            }

            let Some(value) = c.to_digit(16) else {
                return self.fail(Error::MalformedInput(format!(
                    "invalid character '{}' on input",
                    c
                )));
            };
            let value = value as u8;
            match self.nibble.take() {
                Some(high) => return Some(Ok(Token::HexByte((high << 4) | value))),
                None => self.nibble = Some(value),
            }
        }
    }
}

/// Result of parsing a raw command: either show usage or transmit a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRequest {
    Usage,
    Transmit(CommandFrame),
}

impl RawRequest {
    pub fn frame(&self) -> Option<&CommandFrame> {
        match self {
            RawRequest::Transmit(f) => Some(f),
            RawRequest::Usage => None,
        }
    }
}

/// Parse a raw command string into a frame ready for transmission.
///
/// Parsing stops once the payload fills [`MAX_FRAME_LEN`]; anything after
/// that point is ignored.
pub fn build_raw(cmd: &str) -> Result<RawRequest> {
    if cmd.len() < 2 {
        return Err(Error::MalformedInput(
            "raw command needs at least two characters".into(),
        ));
    }

    let mut payload = Vec::with_capacity(MAX_FRAME_LEN);
    let mut options = FrameOptions::empty();
    let mut append_checksum = false;
    let mut bit_length = None;

    for token in Tokens::new(cmd) {
        match token? {
            Token::Option(OptionKind::Help, _) => return Ok(RawRequest::Usage),
            Token::Option(OptionKind::NoReply, _) => options |= FrameOptions::NO_REPLY,
            Token::Option(OptionKind::AppendChecksum, _) => append_checksum = true,
            Token::Option(OptionKind::KeepField, _) => options |= FrameOptions::KEEP_FIELD,
            Token::Option(OptionKind::ActiveNoSelect, _) => {
                options |= FrameOptions::ACTIVE_NO_SELECT
            }
            Token::Option(OptionKind::ActiveSelect, _) => options |= FrameOptions::ACTIVE_SELECT,
            Token::Option(OptionKind::BitLength, bits) => bit_length = bits,
            Token::HexByte(b) => {
                payload.push(b);
                if payload.len() >= MAX_FRAME_LEN {
                    break;
                }
            }
        }
    }

    let mut frame = CommandFrame::new(payload, options)?;
    if let Some(bits) = bit_length {
        frame = frame.with_bit_length(bits);
    }
    if append_checksum && !frame.append_checksum() && !frame.payload().is_empty() {
        warn!("buffer is full, the CRC cannot be added to this data");
    }
    Ok(RawRequest::Transmit(frame))
}
