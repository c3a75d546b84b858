//! NIST SP 800-185 §2.3 string encodings.
//!
//! All integers are encoded big-endian with an explicit byte-count `n`
//! (1..=8, since every encoded value here is a `u64`):
//!
//! ```text
//! left_encode(x)   = n || x[0] .. x[n-1]
//! right_encode(x)  = x[0] .. x[n-1] || n
//! encode_string(S) = left_encode(bitlen(S)) || S
//! bytepad(X, w)    = left_encode(w) || X || 0x00 .. (to a multiple of w bytes)
//! ```

use crate::error::{KmacError, KmacResult};

/// Minimal big-endian bytes of `x`; zero still takes one byte.
fn be_bytes(x: u64) -> ([u8; 8], usize) {
    let n = ((64 - x.leading_zeros() as usize) + 7) / 8;
    (x.to_be_bytes(), n.max(1))
}

pub fn left_encode(x: u64) -> Vec<u8> {
    let (bytes, n) = be_bytes(x);
    let mut out = Vec::with_capacity(n + 1);
    out.push(n as u8);
    out.extend_from_slice(&bytes[8 - n..]);
    out
}

pub fn right_encode(x: u64) -> Vec<u8> {
    let (bytes, n) = be_bytes(x);
    let mut out = Vec::with_capacity(n + 1);
    out.extend_from_slice(&bytes[8 - n..]);
    out.push(n as u8);
    out
}

/// Length of `data` in bits, or `InputTooLong` if that overflows `u64`.
pub fn bit_len(data: &[u8]) -> KmacResult<u64> {
    u64::try_from(data.len())
        .ok()
        .and_then(|n| n.checked_mul(8))
        .ok_or(KmacError::InputTooLong { bytes: data.len() })
}

/// `left_encode(bit length of s) || s`.
pub fn encode_string(s: &[u8]) -> KmacResult<Vec<u8>> {
    let mut out = left_encode(bit_len(s)?);
    out.extend_from_slice(s);
    Ok(out)
}

/// `left_encode(w) || x`, zero-padded to a multiple of `w` bytes.
pub fn bytepad(x: &[u8], w: usize) -> KmacResult<Vec<u8>> {
    if w == 0 {
        return Err(KmacError::ZeroPadWidth);
    }
    let mut out = left_encode(w as u64);
    out.extend_from_slice(x);
    let rem = out.len() % w;
    if rem != 0 {
        out.resize(out.len() + (w - rem), 0);
    }
    Ok(out)
}

fn be_value(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

fn check_len_byte(n: u8) -> KmacResult<usize> {
    match n {
        1..=8 => Ok(n as usize),
        _ => Err(KmacError::MalformedEncoding(n)),
    }
}

/// Decode a `left_encode` from the front of `buf`.
///
/// Returns the value and the number of bytes consumed.
pub fn left_decode(buf: &[u8]) -> KmacResult<(u64, usize)> {
    let (&n, rest) = buf.split_first().ok_or(KmacError::TruncatedEncoding)?;
    let n = check_len_byte(n)?;
    if rest.len() < n {
        return Err(KmacError::TruncatedEncoding);
    }
    Ok((be_value(&rest[..n]), n + 1))
}

/// Decode a `right_encode` from the back of `buf`.
///
/// Returns the value and the number of trailing bytes consumed.
pub fn right_decode(buf: &[u8]) -> KmacResult<(u64, usize)> {
    let (&n, rest) = buf.split_last().ok_or(KmacError::TruncatedEncoding)?;
    let n = check_len_byte(n)?;
    if rest.len() < n {
        return Err(KmacError::TruncatedEncoding);
    }
    Ok((be_value(&rest[rest.len() - n..]), n + 1))
}
