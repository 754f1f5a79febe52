// libfelica/src/protocol/checksum.rs

use crc::{CRC_16_XMODEM, Crc};

use crate::constants::CHECKSUM_LEN;

/// FeliCa frame CRC: poly 0x1021, init 0x0000, no reflection, no final xor.
const FELICA_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Raw 16-bit FeliCa CRC over `data`.
pub fn crc16(data: &[u8]) -> u16 {
    FELICA_CRC.checksum(data)
}

/// Compute the frame checksum, returned as `(high, low)`.
///
/// This is also the order in which the two bytes go on the wire.
pub fn compute(data: &[u8]) -> (u8, u8) {
    let [high, low] = crc16(data).to_be_bytes();
    (high, low)
}

/// Verify a buffer whose last two bytes are its checksum (high, low).
///
/// Needs at least one data byte; shorter buffers never verify.
pub fn verify(data: &[u8]) -> bool {
    if data.len() <= CHECKSUM_LEN {
        return false;
    }
    let (body, tail) = data.split_at(data.len() - CHECKSUM_LEN);
    compute(body) == (tail[0], tail[1])
}
