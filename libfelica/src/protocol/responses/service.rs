// libfelica/src/protocol/responses/service.rs

use crate::constants::{FELICA_RESP_REQUEST_SERVICE, KEY_VERSION_MISSING, RESPONSE_PREFIX_LEN};
use crate::protocol::parser;
use crate::types::Idm;
use crate::Result;

/// Decoded Request Service reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReply {
    pub idm: Idm,
    /// One key version per requested node, in request order.
    pub key_versions: Vec<u16>,
}

impl ServiceReply {
    /// Nodes that answered with `FFFFh` do not exist on the card.
    pub fn exists(&self, index: usize) -> bool {
        self.key_versions
            .get(index)
            .is_some_and(|&v| v != KEY_VERSION_MISSING)
    }
}

/// Decode a validated Request Service reply.
/// Layout: prefix(2) + len(1) + response_code(1) + idm(8) + count(1) + versions(N*2) [+ crc(2)]
pub fn decode_request_service(data: &[u8]) -> Result<ServiceReply> {
    let code_at = RESPONSE_PREFIX_LEN + 1;
    parser::ensure_len(data, code_at + 1 + 8 + 1)?;
    parser::expect_response_code(data, code_at, FELICA_RESP_REQUEST_SERVICE)?;

    let idm = parser::idm_at(data, code_at + 1)?;
    let count = parser::byte_at(data, code_at + 9)? as usize;
    let first = code_at + 10;
    parser::ensure_len(data, first + count * 2)?;

    let key_versions = (0..count)
        .map(|i| parser::le_u16_at(data, first + i * 2))
        .collect::<Result<Vec<u16>>>()?;

    Ok(ServiceReply { idm, key_versions })
}
