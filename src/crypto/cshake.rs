//! SHAKE256 and cSHAKE256 (FIPS 202, NIST SP 800-185 §3).

use log::debug;

use super::encoding::{bytepad, encode_string};
use super::sponge::{Sponge, CSHAKE_PAD, SHAKE256_RATE, SHAKE_PAD};
use crate::error::{KmacError, KmacResult};

/// Convert a requested output length in bits to bytes.
///
/// Rejects lengths that are not byte aligned instead of truncating them.
pub fn output_len_bytes(bits: u64) -> KmacResult<usize> {
    if bits % 8 != 0 {
        return Err(KmacError::OutputLengthNotByteAligned { bits });
    }
    usize::try_from(bits / 8).map_err(|_| KmacError::OutputTooLarge { bits })
}

/// Zeroed output buffer for `bits` of output.
///
/// The allocation is fallible: a length the allocator refuses comes back as
/// `OutputTooLarge` rather than aborting the process.
pub fn output_buffer(bits: u64) -> KmacResult<Vec<u8>> {
    let len = output_len_bytes(bits)?;
    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|_| KmacError::OutputTooLarge { bits })?;
    out.resize(len, 0);
    Ok(out)
}

/// Sponge primed with `bytepad(encode_string(N) || encode_string(S), 136)`.
///
/// The prefix is a whole number of rate blocks, so the cursor is back at 0.
pub(crate) fn customized_sponge(name: &[u8], custom: &[u8]) -> KmacResult<Sponge> {
    let mut prefix = encode_string(name)?;
    prefix.extend(encode_string(custom)?);
    let block = bytepad(&prefix, SHAKE256_RATE)?;

    let mut sponge = Sponge::new();
    sponge.absorb(&block);
    debug_assert_eq!(sponge.position(), 0);
    Ok(sponge)
}

/// SHAKE256(X, L) with `L` in bits.
pub fn shake256(x: &[u8], output_bits: u64) -> KmacResult<Vec<u8>> {
    let mut out = output_buffer(output_bits)?;
    debug!("shake256: input={}B output={}B", x.len(), out.len());

    let mut sponge = Sponge::new();
    sponge.absorb(x);
    sponge.finalize(SHAKE_PAD).squeeze(&mut out);
    Ok(out)
}

/// cSHAKE256(X, L, N, S) with `L` in bits.
///
/// With both `N` and `S` empty this is exactly SHAKE256(X, L).
pub fn cshake256(x: &[u8], output_bits: u64, name: &[u8], custom: &[u8]) -> KmacResult<Vec<u8>> {
    if name.is_empty() && custom.is_empty() {
        return shake256(x, output_bits);
    }
    let mut out = output_buffer(output_bits)?;
    debug!(
        "cshake256: input={}B name={}B custom={}B output={}B",
        x.len(),
        name.len(),
        custom.len(),
        out.len()
    );

    let mut sponge = customized_sponge(name, custom)?;
    sponge.absorb(x);
    sponge.finalize(CSHAKE_PAD).squeeze(&mut out);
    Ok(out)
}
