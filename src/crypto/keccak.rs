//! Keccak-f[1600] permutation (FIPS 202, b = 1600, 24 rounds).
//!
//! # State layout
//!
//! The 1600-bit state is 25 lanes of 64 bits, lane `(x, y)` at index
//! `x + 5 * y`. Bytes map onto lanes little-endian: state byte `i` is bits
//! `8 * (i % 8) .. 8 * (i % 8) + 8` of lane `i / 8`. That mapping is applied
//! only at the byte boundary ([`KeccakState::xor_bytes`],
//! [`KeccakState::read_bytes`]); the permutation itself works on native
//! `u64` lanes and never converts byte order.

use zeroize::Zeroize;

/* ============================================================================
 * Constants
 * ========================================================================== */

/// Rounds of Keccak-f[1600].
pub const KECCAK_ROUNDS: usize = 24;

/// Lanes in the state (5 x 5).
pub const STATE_LANES: usize = 25;

/// State width in bytes (1600 bits).
pub const STATE_BYTES: usize = STATE_LANES * 8;

/// Iota round constants, one per round.
pub const ROUND_CONSTANTS: [u64; KECCAK_ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rho rotation for each step of the pi cycle starting at lane 1.
pub const RHO_OFFSETS: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Destination lane for each step of the pi cycle.
pub const PI_LANES: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/* ============================================================================
 * Permutation
 * ========================================================================== */

/// 64-bit circular left rotation. `n` is taken modulo 64, so `n = 0` and
/// `n = 64` both return `x` unchanged.
#[inline(always)]
pub fn rotl(x: u64, n: u32) -> u64 {
    x.rotate_left(n % 64)
}

/// Apply Keccak-f[1600] in place.
pub fn keccak_f1600(a: &mut [u64; STATE_LANES]) {
    for &rc in ROUND_CONSTANTS.iter() {
        // theta
        let mut c = [0u64; 5];
        for (x, cx) in c.iter_mut().enumerate() {
            *cx = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ rotl(c[(x + 1) % 5], 1);
            for y in 0..5 {
                a[x + 5 * y] ^= d;
            }
        }

        // rho + pi: walk the single 24-lane cycle, lane (0,0) stays put
        let mut current = a[1];
        for (&offset, &dst) in RHO_OFFSETS.iter().zip(PI_LANES.iter()) {
            let displaced = a[dst];
            a[dst] = rotl(current, offset);
            current = displaced;
        }

        // chi, row by row
        for y in 0..5 {
            let row = [a[5 * y], a[5 * y + 1], a[5 * y + 2], a[5 * y + 3], a[5 * y + 4]];
            for x in 0..5 {
                a[5 * y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // iota
        a[0] ^= rc;
    }
}

/// Pure form of [`keccak_f1600`].
pub fn permute(mut lanes: [u64; STATE_LANES]) -> [u64; STATE_LANES] {
    keccak_f1600(&mut lanes);
    lanes
}

/* ============================================================================
 * State
 * ========================================================================== */

/// Owned 1600-bit Keccak state, wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct KeccakState {
    lanes: [u64; STATE_LANES],
}

impl KeccakState {
    /// All-zero state.
    pub fn new() -> Self {
        Self { lanes: [0u64; STATE_LANES] }
    }

    pub fn from_lanes(lanes: [u64; STATE_LANES]) -> Self {
        Self { lanes }
    }

    pub fn lanes(&self) -> &[u64; STATE_LANES] {
        &self.lanes
    }

    /// Lane `(x, y)`, coordinates taken mod 5.
    pub fn lane(&self, x: usize, y: usize) -> u64 {
        self.lanes[(x % 5) + 5 * (y % 5)]
    }

    pub fn permute(&mut self) {
        keccak_f1600(&mut self.lanes);
    }

    /// XOR one byte into state byte `offset`.
    #[inline]
    pub fn xor_byte(&mut self, offset: usize, byte: u8) {
        self.lanes[offset / 8] ^= u64::from(byte) << (8 * (offset % 8));
    }

    /// XOR `data` into the state starting at byte `offset`.
    ///
    /// Panics if the range runs past [`STATE_BYTES`]; callers keep it inside
    /// the rate.
    pub fn xor_bytes(&mut self, offset: usize, data: &[u8]) {
        assert!(offset + data.len() <= STATE_BYTES, "write past end of Keccak state");
        for (i, &b) in data.iter().enumerate() {
            self.xor_byte(offset + i, b);
        }
    }

    #[inline]
    pub fn byte(&self, offset: usize) -> u8 {
        (self.lanes[offset / 8] >> (8 * (offset % 8))) as u8
    }

    /// Copy state bytes `offset .. offset + out.len()` into `out`.
    pub fn read_bytes(&self, offset: usize, out: &mut [u8]) {
        assert!(offset + out.len() <= STATE_BYTES, "read past end of Keccak state");
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.byte(offset + i);
        }
    }
}

impl Default for KeccakState {
    fn default() -> Self {
        Self::new()
    }
}

impl Zeroize for KeccakState {
    fn zeroize(&mut self) {
        self.lanes.zeroize();
    }
}

impl Drop for KeccakState {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for KeccakState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // state may hold absorbed key material
        f.write_str("KeccakState { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Keccak-f[1600] applied once and twice to the all-zero state
    // (KeccakF-1600-IntermediateValues.txt).
    const ZERO_ONCE: [u64; 25] = [
        0xF1258F7940E1DDE7, 0x84D5CCF933C0478A, 0xD598261EA65AA9EE, 0xBD1547306F80494D,
        0x8B284E056253D057, 0xFF97A42D7F8E6FD4, 0x90FEE5A0A44647C4, 0x8C5BDA0CD6192E76,
        0xAD30A6F71B19059C, 0x30935AB7D08FFC64, 0xEB5AA93F2317D635, 0xA9A6E6260D712103,
        0x81A57C16DBCF555F, 0x43B831CD0347C826, 0x01F22F1A11A5569F, 0x05E5635A21D9AE61,
        0x64BEFEF28CC970F2, 0x613670957BC46611, 0xB87C5A554FD00ECB, 0x8C3EE88A1CCF32C8,
        0x940C7922AE3A2614, 0x1841F924A2C509E4, 0x16F53526E70465C2, 0x75F644E97F30A13B,
        0xEAF1FF7B5CECA249,
    ];

    const ZERO_TWICE: [u64; 25] = [
        0x2D5C954DF96ECB3C, 0x6A332CD07057B56D, 0x093D8D1270D76B6C, 0x8A20D9B25569D094,
        0x4F9C4F99E5E7F156, 0xF957B9A2DA65FB38, 0x85773DAE1275AF0D, 0xFAF4F247C3D810F7,
        0x1F1B9EE6F79A8759, 0xE4FECC0FEE98B425, 0x68CE61B6B9CE68A1, 0xDEEA66C4BA8F974F,
        0x33C43D836EAFB1F5, 0xE00654042719DBD9, 0x7CF8A9F009831265, 0xFD5449A6BF174743,
        0x97DDAD33D8994B40, 0x48EAD5FC5D0BE774, 0xE3B8C8EE55B7B03C, 0x91A0226E649E42E9,
        0x900E3129E7BADD7B, 0x202A9EC5FAA3CCE8, 0x5B3402464E1C3DB6, 0x609F4E62A44C1059,
        0x20D06CD26A8FBF5C,
    ];

    #[test]
    fn zero_state_known_answer() {
        let once = permute([0u64; 25]);
        assert_eq!(once, ZERO_ONCE);
        assert_eq!(permute(once), ZERO_TWICE);
    }

    #[test]
    fn in_place_matches_pure() {
        let mut state = KeccakState::new();
        state.permute();
        assert_eq!(state.lanes(), &ZERO_ONCE);
        assert_eq!(state.lane(0, 0), ZERO_ONCE[0]);
        assert_eq!(state.lane(4, 4), ZERO_ONCE[24]);
    }

    #[test]
    fn rotl_handles_degenerate_amounts() {
        let x = 0x8000_0000_0000_0001u64;
        assert_eq!(rotl(x, 0), x);
        assert_eq!(rotl(x, 64), x);
        assert_eq!(rotl(x, 1), 0x0000_0000_0000_0003);
        assert_eq!(rotl(x, 65), rotl(x, 1));
    }

    #[test]
    fn pi_cycle_visits_every_lane_but_origin() {
        let mut seen = [false; 25];
        for &dst in PI_LANES.iter() {
            assert!(!seen[dst]);
            seen[dst] = true;
        }
        assert!(!seen[0]);
        assert_eq!(seen.iter().filter(|s| **s).count(), 24);
    }

    #[test]
    fn byte_mapping_is_little_endian() {
        let mut state = KeccakState::new();
        state.xor_bytes(8, &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
        assert_eq!(state.lane(1, 0), 0x0807_0605_0403_0201);

        let mut out = [0u8; 3];
        state.read_bytes(8, &mut out);
        assert_eq!(out, [0x01, 0x02, 0x03]);
        assert_eq!(state.byte(15), 0x08);
    }

    #[test]
    fn zeroize_clears_lanes() {
        let mut state = KeccakState::from_lanes(ZERO_ONCE);
        state.zeroize();
        assert_eq!(state, KeccakState::new());
    }
}
