// libfelica/src/error.rs

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("unknown option '-{0}'")]
    UnknownOption(char),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    #[error("timeout while waiting for reply")]
    Timeout,

    #[error("operation aborted by user")]
    Aborted,

    #[error("no data: {0}")]
    NoData(String),

    #[error("card select failed: {0}")]
    SelectFailed(String),

    #[error("cannot allocate {requested} bytes for trace buffer")]
    AllocationFailure { requested: usize },

    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Map the error onto the process outcome reported to the shell.
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Error::MalformedInput(_) | Error::UnknownOption(_) => ExitStatus::InvalidArgument,
            Error::Timeout => ExitStatus::Timeout,
            Error::Aborted => ExitStatus::Aborted,
            Error::AllocationFailure { .. } => ExitStatus::AllocationFailure,
            Error::InvalidLength { .. }
            | Error::UnexpectedResponse { .. }
            | Error::NoData(_)
            | Error::SelectFailed(_)
            | Error::Transport(_) => ExitStatus::SoftFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Distinct process outcomes for a finished command.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    SoftFailure = 1,
    InvalidArgument = 2,
    Timeout = 3,
    Aborted = 4,
    AllocationFailure = 5,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl<T> From<&Result<T>> for ExitStatus {
    fn from(res: &Result<T>) -> Self {
        match res {
            Ok(_) => ExitStatus::Success,
            Err(e) => e.exit_status(),
        }
    }
}
