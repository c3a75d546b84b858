//! Sponge construction over Keccak-f[1600] with rate 136 (SHAKE256 / cSHAKE256).
//!
//! # Lifecycle
//!
//! ```text
//! Sponge::new()           Idle       all-zero state, cursor 0
//!   .absorb(..)*          Absorbing  permute each time the rate fills
//!   .finalize(pad)        Finalizing pad byte at cursor, 0x80 at rate end, permute
//!   -> Squeezer
//!   .squeeze(..)*         Squeezing  permute lazily before reading a fresh block
//!   drop / squeeze_vec    Done       state wiped
//! ```
//!
//! `finalize` consumes the absorber, so absorbing after finalization or
//! squeezing before it does not compile:
//!
//! ```compile_fail
//! use kmacxof256::crypto::sponge::{Sponge, CSHAKE_PAD};
//!
//! let mut sponge = Sponge::new();
//! let _squeezer = sponge.finalize(CSHAKE_PAD);
//! sponge.absorb(b"too late");
//! ```
//!
//! ```
//! use kmacxof256::crypto::sponge::{Sponge, SHAKE_PAD};
//!
//! let mut sponge = Sponge::new();
//! sponge.absorb(b"");
//! let out = sponge.finalize(SHAKE_PAD).squeeze_vec(4);
//! assert_eq!(out, [0x46, 0xb9, 0xdd, 0x2b]); // SHAKE256("")
//! ```

use std::cmp::min;

use log::trace;

use super::keccak::{KeccakState, STATE_BYTES};

/// Rate of SHAKE256 / cSHAKE256 / KMAC256 in bytes (1088 bits).
pub const SHAKE256_RATE: usize = 136;

/// Capacity in bytes (512 bits).
pub const SHAKE256_CAPACITY: usize = STATE_BYTES - SHAKE256_RATE;

/// Domain-separation byte for plain SHAKE (suffix `1111` plus first pad bit).
pub const SHAKE_PAD: u8 = 0x1F;

/// Domain-separation byte for cSHAKE (suffix `00` plus first pad bit).
pub const CSHAKE_PAD: u8 = 0x04;

/// Final bit of pad10*1, in the last byte of the rate.
const PAD_LAST: u8 = 0x80;

/* ============================================================================
 * Absorbing
 * ========================================================================== */

/// Absorbing half of the sponge.
pub struct Sponge {
    state: KeccakState,
    /// Bytes of the current rate block written since the last permutation.
    pos: usize,
    /// Full blocks permuted so far.
    blocks: u64,
}

impl Sponge {
    pub fn new() -> Self {
        Self { state: KeccakState::new(), pos: 0, blocks: 0 }
    }

    /// Current absorb cursor, always in `0..SHAKE256_RATE`.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// XOR `data` into the rate window, permuting whenever it fills.
    pub fn absorb(&mut self, data: &[u8]) {
        let mut off = 0;
        while off < data.len() {
            let take = min(SHAKE256_RATE - self.pos, data.len() - off);
            self.state.xor_bytes(self.pos, &data[off..off + take]);
            self.pos += take;
            off += take;

            if self.pos == SHAKE256_RATE {
                self.state.permute();
                self.pos = 0;
                self.blocks += 1;
            }
        }
    }

    /// Apply the domain byte and pad10*1, permute, and switch to squeezing.
    ///
    /// When the cursor sits on the last rate byte both `pad` and `0x80`
    /// land in that same byte.
    pub fn finalize(mut self, pad: u8) -> Squeezer {
        self.state.xor_byte(self.pos, pad);
        self.state.xor_byte(SHAKE256_RATE - 1, PAD_LAST);
        self.state.permute();
        trace!(
            "sponge finalized: pad={:#04x} blocks={} tail={}",
            pad,
            self.blocks + 1,
            self.pos
        );
        Squeezer { state: self.state, pos: 0, blocks: 0 }
    }
}

impl Default for Sponge {
    fn default() -> Self {
        Self::new()
    }
}

/* ============================================================================
 * Squeezing
 * ========================================================================== */

/// Squeezing half of the sponge. Only obtainable from [`Sponge::finalize`].
pub struct Squeezer {
    state: KeccakState,
    /// Bytes of the current rate block already emitted.
    pos: usize,
    /// Extra permutations performed while squeezing.
    blocks: u64,
}

impl Squeezer {
    /// Fill `out` with the next `out.len()` output bytes.
    ///
    /// Output is a single stream: two calls of `a` then `b` bytes yield the
    /// same bytes as one call of `a + b`. A new block is only permuted when a
    /// byte from it is actually requested.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        let mut off = 0;
        while off < out.len() {
            if self.pos == SHAKE256_RATE {
                self.state.permute();
                self.pos = 0;
                self.blocks += 1;
            }
            let take = min(SHAKE256_RATE - self.pos, out.len() - off);
            self.state.read_bytes(self.pos, &mut out[off..off + take]);
            self.pos += take;
            off += take;
        }
    }

    /// Squeeze exactly `len` bytes and retire the sponge.
    pub fn squeeze_vec(mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.squeeze(&mut out);
        trace!("sponge squeezed {} bytes, {} extra permutations", len, self.blocks);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shake256_empty_prefix() -> [u8; 32] {
        [
            0x46, 0xb9, 0xdd, 0x2b, 0x0b, 0xa8, 0x8d, 0x13, 0x23, 0x3b, 0x3f, 0xeb, 0x74, 0x3e,
            0xeb, 0x24, 0x3f, 0xcd, 0x52, 0xea, 0x62, 0xb8, 0x1b, 0x82, 0xb5, 0x0c, 0x27, 0x64,
            0x6e, 0xd5, 0x76, 0x2f,
        ]
    }

    #[test]
    fn rate_and_capacity_cover_the_state() {
        assert_eq!(SHAKE256_RATE + SHAKE256_CAPACITY, 200);
        assert_eq!(SHAKE256_CAPACITY, 64);
    }

    #[test]
    fn empty_shake_matches_known_answer() {
        let out = Sponge::new().finalize(SHAKE_PAD).squeeze_vec(32);
        assert_eq!(out, shake256_empty_prefix());
    }

    #[test]
    fn cursor_wraps_on_full_block() {
        let mut sponge = Sponge::new();
        sponge.absorb(&[0xAA; 135]);
        assert_eq!(sponge.position(), 135);
        sponge.absorb(&[0xAA]);
        assert_eq!(sponge.position(), 0);
        sponge.absorb(&[0xAA; 10]);
        assert_eq!(sponge.position(), 10);
    }

    #[test]
    fn split_absorb_equals_single_absorb() {
        let data: Vec<u8> = (0..500u32).map(|i| (i * 7) as u8).collect();

        let mut one = Sponge::new();
        one.absorb(&data);

        let mut many = Sponge::new();
        for chunk in data.chunks(37) {
            many.absorb(chunk);
        }

        assert_eq!(one.finalize(CSHAKE_PAD).squeeze_vec(300), many.finalize(CSHAKE_PAD).squeeze_vec(300));
    }

    #[test]
    fn split_squeeze_equals_single_squeeze() {
        let mut sponge = Sponge::new();
        sponge.absorb(b"stream");
        let whole = sponge.finalize(SHAKE_PAD).squeeze_vec(409);

        let mut sponge = Sponge::new();
        sponge.absorb(b"stream");
        let mut squeezer = sponge.finalize(SHAKE_PAD);
        let mut parts = vec![0u8; 409];
        let (a, rest) = parts.split_at_mut(1);
        let (b, c) = rest.split_at_mut(135);
        squeezer.squeeze(a);
        squeezer.squeeze(b);
        squeezer.squeeze(c);

        assert_eq!(whole, parts);
    }

    #[test]
    fn exact_block_output_skips_trailing_permutation() {
        let mut squeezer = Sponge::new().finalize(SHAKE_PAD);
        let mut block = [0u8; SHAKE256_RATE];
        squeezer.squeeze(&mut block);
        assert_eq!(squeezer.blocks, 0);
        squeezer.squeeze(&mut [0u8; 1]);
        assert_eq!(squeezer.blocks, 1);
    }

    #[test]
    fn pad_bytes_share_last_rate_byte() {
        // 135 absorbed bytes put the cursor on the final rate byte
        let mut sponge = Sponge::new();
        sponge.absorb(&[0u8; 135]);
        let out = sponge.finalize(SHAKE_PAD).squeeze_vec(16);

        let mut expected = KeccakState::new();
        expected.xor_byte(135, SHAKE_PAD | PAD_LAST);
        expected.permute();
        let mut want = [0u8; 16];
        expected.read_bytes(0, &mut want);
        assert_eq!(out, want);
    }

    #[test]
    fn domain_bytes_separate_outputs() {
        let mut a = Sponge::new();
        a.absorb(b"same input");
        let mut b = Sponge::new();
        b.absorb(b"same input");
        assert_ne!(a.finalize(SHAKE_PAD).squeeze_vec(32), b.finalize(CSHAKE_PAD).squeeze_vec(32));
    }
}
