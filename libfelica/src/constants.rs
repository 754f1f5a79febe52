// libfelica/src/constants.rs
//! Common protocol constants used across the crate

/// Size of the reader's command data buffer. Outbound payloads never exceed it.
pub const MAX_FRAME_LEN: usize = 512;

/// Number of bytes taken by an appended checksum.
pub const CHECKSUM_LEN: usize = 2;

/// Fixed prefix in front of every received FeliCa frame (not covered by the checksum).
pub const RESPONSE_PREFIX_LEN: usize = 2;

/// One FeliCa Lite dump record: block id(1) + status1(1) + status2(1) + data(16)
pub const LITE_RECORD_LEN: usize = 19;

/// Data bytes carried by a single FeliCa block
pub const BLOCK_LEN: usize = 16;

/// Byte length of the reader's card-select reply
pub const CARD_IDENTITY_LEN: usize = 34;

/// FeliCa command codes issued through the raw path
pub const FELICA_CMD_REQUEST_SERVICE: u8 = 0x02;
pub const FELICA_RESP_REQUEST_SERVICE: u8 = 0x03;

/// Key version reported for an area or service that does not exist
pub const KEY_VERSION_MISSING: u16 = 0xffff;

/// Option marker in command strings
pub const OPTION_MARKER: char = '-';
