// libfelica/src/protocol/commands/service.rs

use crate::constants::FELICA_CMD_REQUEST_SERVICE;
use crate::protocol::commands::raw::{OptionKind, RawRequest, Token, Tokens};
use crate::protocol::frame::{CommandFrame, FrameOptions};
use crate::types::Idm;
use crate::{Error, Result};

pub const USAGE: &str = "\
Usage: rqservice [-h] [-c] <IDm hex> <number of nodes hex> <node code list hex (little endian)> [<CRC hex>]
Verifies the existence of Areas and Services and acquires their Key Version.
  - an existing Area or Service answers with its Key Version
  - a missing one answers with FFFFh
       -h    this help
       -c    calculate and append CRC
Example: rqservice -c 01100910c11bc407 01 FFFF";

/// Maximum node count accepted by a single Request Service command.
pub const MAX_NODES: usize = 32;

/// Encode Request Service (FeliCa command code 0x02).
/// Layout: len(1) + command_code(1) + idm(8) + node_count(1) + node_code_list(2*N)
/// `len` counts every byte including itself; the checksum is not added here.
pub fn encode_request_service(idm: Idm, node_codes: &[u16]) -> Result<Vec<u8>> {
    if node_codes.is_empty() || node_codes.len() > MAX_NODES {
        return Err(Error::MalformedInput(format!(
            "node count must be 1..={}, got {}",
            MAX_NODES,
            node_codes.len()
        )));
    }
    let len = 1 + 1 + 8 + 1 + 2 * node_codes.len();
    let mut buf = Vec::with_capacity(len);
    buf.push(len as u8);
    buf.push(FELICA_CMD_REQUEST_SERVICE);
    buf.extend_from_slice(idm.as_bytes());
    buf.push(node_codes.len() as u8);
    for n in node_codes {
        buf.extend_from_slice(&n.to_le_bytes());
    }
    Ok(buf)
}

/// Request Service as a selected-card raw frame, checksum appended.
pub fn request_service_frame(idm: Idm, node_codes: &[u16]) -> Result<CommandFrame> {
    let mut frame = CommandFrame::new(
        encode_request_service(idm, node_codes)?,
        FrameOptions::ACTIVE_SELECT,
    )?;
    frame.append_checksum();
    Ok(frame)
}

fn option_letter(kind: OptionKind) -> char {
    match kind {
        OptionKind::Help => 'h',
        OptionKind::NoReply => 'r',
        OptionKind::AppendChecksum => 'c',
        OptionKind::KeepField => 'p',
        OptionKind::ActiveNoSelect => 'a',
        OptionKind::ActiveSelect => 's',
        OptionKind::BitLength => 'b',
    }
}

/// Parse `rqservice` arguments: IDm, node count and little-endian node codes.
///
/// Without `-c`, two trailing bytes after the node list are taken as a
/// caller-supplied checksum and sent unchanged.
pub fn parse_request_service(cmd: &str) -> Result<RawRequest> {
    if cmd.len() < 2 {
        return Err(Error::MalformedInput(
            "rqservice needs an IDm and a node list".into(),
        ));
    }

    let mut append_checksum = false;
    let mut bytes = Vec::new();
    for token in Tokens::new(cmd) {
        match token? {
            Token::Option(OptionKind::Help, _) => return Ok(RawRequest::Usage),
            Token::Option(OptionKind::AppendChecksum, _) => append_checksum = true,
            Token::Option(kind, _) => return Err(Error::UnknownOption(option_letter(kind))),
            Token::HexByte(b) => bytes.push(b),
        }
    }

    if bytes.len() < 9 {
        return Err(Error::InvalidLength {
            expected: 9,
            actual: bytes.len(),
        });
    }
    let idm = Idm::try_from(&bytes[..8])?;
    let count = bytes[8] as usize;
    let list_end = 9 + 2 * count;
    if bytes.len() < list_end {
        return Err(Error::InvalidLength {
            expected: list_end,
            actual: bytes.len(),
        });
    }
    let nodes: Vec<u16> = bytes[9..list_end]
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    let trailer = &bytes[list_end..];

    let frame = if append_checksum {
        if !trailer.is_empty() {
            return Err(Error::MalformedInput(format!(
                "{} unexpected bytes after the node list",
                trailer.len()
            )));
        }
        request_service_frame(idm, &nodes)?
    } else {
        if !trailer.is_empty() && trailer.len() != 2 {
            return Err(Error::MalformedInput(
                "only a two-byte CRC may follow the node list".into(),
            ));
        }
        let mut payload = encode_request_service(idm, &nodes)?;
        payload.extend_from_slice(trailer);
        CommandFrame::new(payload, FrameOptions::ACTIVE_SELECT)?
    };
    Ok(RawRequest::Transmit(frame))
}
