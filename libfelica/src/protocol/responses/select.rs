// libfelica/src/protocol/responses/select.rs

use crate::card::CardIdentity;
use crate::protocol::frame::ResponseFrame;
use crate::{Error, Result};

/// Select outcome reported by the reader in `arg0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectStatus {
    Selected,
    CardTimeout,
    WrongAnswer,
    CrcFailed,
    Unknown(u32),
}

impl From<u32> for SelectStatus {
    fn from(v: u32) -> Self {
        match v {
            0 => Self::Selected,
            1 => Self::CardTimeout,
            2 => Self::WrongAnswer,
            3 => Self::CrcFailed,
            other => Self::Unknown(other),
        }
    }
}

/// Decode the reader's reply to a select request.
pub fn decode_select(reply: &ResponseFrame) -> Result<CardIdentity> {
    match SelectStatus::from(reply.arg0) {
        SelectStatus::Selected => CardIdentity::parse(&reply.data),
        SelectStatus::CardTimeout => Err(Error::Timeout),
        SelectStatus::WrongAnswer => Err(Error::SelectFailed("card answered wrong".into())),
        SelectStatus::CrcFailed => Err(Error::SelectFailed("CRC check failed".into())),
        SelectStatus::Unknown(s) => Err(Error::SelectFailed(format!(
            "unexpected select status {}",
            s
        ))),
    }
}
