//! Keccak-based primitives, leaves first:
//!
//! - keccak: Keccak-f[1600] permutation and the 25-lane state
//! - sponge: absorb / squeeze over the permutation (rate 136)
//! - encoding: SP 800-185 left/right_encode, encode_string, bytepad
//! - cshake: SHAKE256, cSHAKE256
//! - kmac: KMAC256, KMACXOF256

#![forbid(unsafe_code)]

pub mod cshake;
pub mod encoding;
pub mod keccak;
pub mod kmac;
pub mod sponge;
