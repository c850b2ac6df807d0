//! A polynomial rolling hash over wrapping `u32` arithmetic.
//!
//! The hash of a window `bytes[0..w]` is `Σ bytes[j] * base^j (mod 2^32)`. The lowest power
//! belongs to the first byte, which lets a window slide forward without ever dividing by the
//! base: rather than rescaling the hash back down after every slide, the [`LaneEngine`]
//! scales the comparison target up. See [`engine`] for the recurrence itself.
//!
//! All arithmetic wraps silently. That is the hash, not an accident of it.
use std::io::{self, Write};

pub mod engine;
pub use engine::{HashState, LaneEngine, Powers, MAX_UNROLL};

/// Hash a full window directly, in `O(w)`.
///
/// This is both how lanes are seeded and the reference every rolled result must agree with.
pub fn window_hash(bytes: &[u8], base: u32) -> u32 {
    let mut hash = 0u32;
    let mut power = 1u32;
    for &b in bytes {
        hash = hash.wrapping_add(u32::from(b).wrapping_mul(power));
        power = power.wrapping_mul(base);
    }
    hash
}
/// `base^exp (mod 2^32)`, by squaring.
pub fn wrapping_pow(base: u32, mut exp: u64) -> u32 {
    let mut acc = 1u32;
    let mut sq = base;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc.wrapping_mul(sq);
        }
        sq = sq.wrapping_mul(sq);
        exp >>= 1;
    }
    acc
}

/// PolyHash incrementally hashes a single window, one byte at a time.
///
/// It does not roll. Use it to produce the target hash of a needle, then hand that target to
/// a [`LaneEngine`] (or a scanner built on one) to find the needle's windows in a stream.
#[derive(Debug, Clone)]
pub struct PolyHash {
    base: u32,
    state: u32,
    power: u32,
    len: usize,
}
impl PolyHash {
    pub fn new(base: u32) -> Self {
        Self {
            base,
            state: 0,
            power: 1,
            len: 0,
        }
    }
    /// HashByte appends a single byte to the window and returns the resulting sum.
    pub fn hash_byte(&mut self, b: u8) -> u32 {
        self.state = self
            .state
            .wrapping_add(u32::from(b).wrapping_mul(self.power));
        self.power = self.power.wrapping_mul(self.base);
        self.len += 1;
        self.state
    }
    pub fn sum32(&self) -> u32 {
        self.state
    }
    /// The number of bytes hashed since construction or the last reset.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn reset(&mut self) {
        self.state = 0;
        self.power = 1;
        self.len = 0;
    }
}
impl Write for PolyHash {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &b in buf {
            let _ = self.hash_byte(b);
        }
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
