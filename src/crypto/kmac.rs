//! KMAC256 and KMACXOF256 (NIST SP 800-185 §4).
//!
//! # Construction
//!
//! ```text
//! newX = bytepad(encode_string(K), 136) || X || right_encode(L')
//! out  = cSHAKE256(newX, L, "KMAC", S)
//! ```
//!
//! `L' = L` for fixed-length KMAC256 and `L' = 0` for KMACXOF256, so the two
//! produce unrelated outputs for the same key, message and customization,
//! and KMACXOF256 output for a shorter `L` is a prefix of the output for a
//! longer one.

use log::debug;
use zeroize::Zeroizing;

use super::cshake::{customized_sponge, output_buffer};
use super::encoding::{bytepad, encode_string, right_encode};
use super::sponge::{Sponge, CSHAKE_PAD, SHAKE256_RATE};
use crate::error::KmacResult;

/// Function name fed to cSHAKE256 for every KMAC variant.
pub const KMAC_NAME: &[u8] = b"KMAC";

/// cSHAKE256 sponge with the "KMAC" prefix, the padded key block and the
/// message absorbed. Key-bearing temporaries are wiped on return.
fn keyed_sponge(key: &[u8], message: &[u8], custom: &[u8]) -> KmacResult<Sponge> {
    let mut sponge = customized_sponge(KMAC_NAME, custom)?;

    let encoded_key = Zeroizing::new(encode_string(key)?);
    let key_block = Zeroizing::new(bytepad(&encoded_key, SHAKE256_RATE)?);
    sponge.absorb(&key_block);
    sponge.absorb(message);
    Ok(sponge)
}

/// KMACXOF256(K, X, L, S) with `L` in bits.
///
/// Returns exactly `L / 8` bytes. Fails with an invalid-parameter error
/// if `L` is not a multiple of 8, and with `OutputTooLarge` if the buffer
/// cannot be allocated.
///
/// ```
/// use kmacxof256::kmac_xof256;
///
/// let tag = kmac_xof256(b"key", b"message", 256, b"app").unwrap();
/// assert_eq!(tag.len(), 32);
/// assert!(kmac_xof256(b"key", b"message", 255, b"app").is_err());
/// ```
pub fn kmac_xof256(key: &[u8], message: &[u8], output_bits: u64, custom: &[u8]) -> KmacResult<Vec<u8>> {
    let mut out = output_buffer(output_bits)?;
    kmac_xof256_fill(key, message, custom, &mut out)?;
    Ok(out)
}

/// KMACXOF256 filling `output` completely (`L = 8 * output.len()`).
pub fn kmac_xof256_fill(key: &[u8], message: &[u8], custom: &[u8], output: &mut [u8]) -> KmacResult<()> {
    debug!(
        "kmac_xof256: key={}B message={}B custom={}B output={}B",
        key.len(),
        message.len(),
        custom.len(),
        output.len()
    );
    let mut sponge = keyed_sponge(key, message, custom)?;
    sponge.absorb(&right_encode(0));
    sponge.finalize(CSHAKE_PAD).squeeze(output);
    Ok(())
}

/// Fixed-length KMAC256(K, X, L, S) with `L` in bits.
pub fn kmac256(key: &[u8], message: &[u8], output_bits: u64, custom: &[u8]) -> KmacResult<Vec<u8>> {
    let mut out = output_buffer(output_bits)?;
    debug!(
        "kmac256: key={}B message={}B custom={}B output={}B",
        key.len(),
        message.len(),
        custom.len(),
        out.len()
    );
    let mut sponge = keyed_sponge(key, message, custom)?;
    sponge.absorb(&right_encode(output_bits));
    sponge.finalize(CSHAKE_PAD).squeeze(&mut out);
    Ok(out)
}
