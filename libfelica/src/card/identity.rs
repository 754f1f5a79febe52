// libfelica/src/card/identity.rs

use std::fmt;

use crate::constants::CARD_IDENTITY_LEN;
use crate::protocol::parser;
use crate::types::{Idm, Pmm, ServiceCode};
use crate::utils::bytes_to_hex_spaced;
use crate::Result;

/// What the reader learned about a card during selection.
///
/// Wire layout (34 bytes): IDm(8) | code(2) | NFCID2(6) | PMm(8) | IC code(2) | MRT(6) | service code(2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardIdentity {
    idm: Idm,
    code: [u8; 2],
    uid: [u8; 6],
    pmm: Pmm,
    ic_code: [u8; 2],
    mrt: [u8; 6],
    service_code: [u8; 2],
}

impl CardIdentity {
    pub fn parse(data: &[u8]) -> Result<Self> {
        parser::ensure_len(data, CARD_IDENTITY_LEN)?;
        Ok(Self {
            idm: parser::idm_at(data, 0)?,
            code: parser::array_at(data, 8)?,
            uid: parser::array_at(data, 10)?,
            pmm: parser::pmm_at(data, 16)?,
            ic_code: parser::array_at(data, 24)?,
            mrt: parser::array_at(data, 26)?,
            service_code: parser::array_at(data, 32)?,
        })
    }

    pub fn idm(&self) -> &Idm {
        &self.idm
    }

    /// Manufacturer code (first two IDm bytes).
    pub fn manufacturer_code(&self) -> &[u8; 2] {
        &self.code
    }

    /// NFCID2 card identification number.
    pub fn uid(&self) -> &[u8; 6] {
        &self.uid
    }

    pub fn pmm(&self) -> &Pmm {
        &self.pmm
    }

    pub fn ic_code(&self) -> &[u8; 2] {
        &self.ic_code
    }

    /// Maximum response time parameters.
    pub fn max_response_time(&self) -> &[u8; 6] {
        &self.mrt
    }

    pub fn service_code(&self) -> ServiceCode {
        ServiceCode::new(u16::from_le_bytes(self.service_code))
    }
}

impl fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FeliCa tag info")?;
        writeln!(f, "IDm  {}", bytes_to_hex_spaced(self.idm.as_bytes()))?;
        writeln!(f, "  - CODE    {}", bytes_to_hex_spaced(&self.code))?;
        writeln!(f, "  - NFCID2  {}", bytes_to_hex_spaced(&self.uid))?;
        writeln!(f, "Parameter (PAD) | {}", bytes_to_hex_spaced(self.pmm.as_bytes()))?;
        writeln!(f, "  - IC CODE {}", bytes_to_hex_spaced(&self.ic_code))?;
        writeln!(f, "  - MRT     {}", bytes_to_hex_spaced(&self.mrt))?;
        write!(f, "SERVICE CODE {}", bytes_to_hex_spaced(&self.service_code))
    }
}
