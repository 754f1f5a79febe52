// libfelica/src/protocol/parser.rs

use crate::types::{Idm, Pmm};
use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    let end = idx.checked_add(len).ok_or(Error::InvalidLength {
        expected: usize::MAX,
        actual: data.len(),
    })?;
    ensure_len(data, end)?;
    Ok(&data[idx..end])
}

/// Copy a fixed-size field at `idx`.
pub fn array_at<const N: usize>(data: &[u8], idx: usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice_at(data, idx, N)?);
    Ok(out)
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Read a little-endian u16 at given index, with bounds checking.
pub fn le_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    array_at::<2>(data, idx).map(u16::from_le_bytes)
}

/// Parse an Idm (8 bytes) at `start` index with bounds checking.
pub fn idm_at(data: &[u8], start: usize) -> Result<Idm> {
    array_at::<8>(data, start).map(Idm::from_bytes)
}

/// Parse a PMm (8 bytes) at `start` index with bounds checking.
pub fn pmm_at(data: &[u8], start: usize) -> Result<Pmm> {
    array_at::<8>(data, start).map(Pmm::from_bytes)
}

/// Ensure the byte at `idx` (a FeliCa response code) equals `expected`.
pub fn expect_response_code(data: &[u8], idx: usize, expected: u8) -> Result<()> {
    let actual = byte_at(data, idx)?;
    if actual != expected {
        return Err(Error::UnexpectedResponse { expected, actual });
    }
    Ok(())
}
