//! KMACXOF256 keyed extendable-output function (NIST SP 800-185)
//!
//! Self-contained stack, no external hash crate:
//! - Keccak-f[1600] permutation (FIPS 202)
//! - SHAKE256 / cSHAKE256 sponge with rate 136
//! - SP 800-185 encodings (left_encode, right_encode, encode_string, bytepad)
//! - KMACXOF256 and fixed-length KMAC256
//!
//! Each call builds a fresh zeroed state, runs synchronously and wipes the
//! state before returning. Independent calls share nothing and may run
//! concurrently.
//!
//! ```
//! use kmacxof256::kmac_xof256;
//!
//! let out = kmac_xof256(b"secret key", b"authenticated data", 512, b"My Tagged Application")?;
//! assert_eq!(out.len(), 64);
//! # Ok::<(), kmacxof256::KmacError>(())
//! ```

#![forbid(unsafe_code)]

pub mod crypto;
pub mod error;

pub use crypto::cshake::{cshake256, shake256};
pub use crypto::kmac::{kmac256, kmac_xof256, kmac_xof256_fill};
pub use error::{KmacError, KmacResult};
