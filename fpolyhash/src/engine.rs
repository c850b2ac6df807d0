//! The delayed-scaling recurrence.
//!
//! A lane starts at lane-local position `0` with `value = H(window_0)`. After `i` slides it
//! holds `value = Σ bytes[i + j] * base^(i + j)`, which is `base^i * H(window_i)`. Sliding
//! removes `bytes[i] * base^i` and adds `bytes[i + w] * base^(i + w)`: both powers come from
//! `scale = base^i`, never from `value`, so the chain carried on `value` is add and subtract
//! only. A window matches when `value == target * base^i`, which is `target_scaled`.
//!
//! For an odd base, multiplying by `base^i` is a bijection mod `2^32`, so that comparison is
//! exact. An even base eventually scales everything to zero and every window would match.
use crate::window_hash;

/// The largest batch [`LaneEngine::advance_batch`] will take; match masks are `u8`.
pub const MAX_UNROLL: usize = 8;

/// The per-lane hash state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HashState {
    /// The unscaled polynomial sum over the current window, in lane-local positions.
    pub value: u32,
    /// `base^i`, where `i` is the number of slides since the lane was seeded.
    pub scale: u32,
    /// `target * base^i`.
    pub target_scaled: u32,
}

/// Base powers precomputed for one window length and batch size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Powers {
    base: u32,
    window: usize,
    unroll: usize,
    /// `base^t` for `t` in `0..=unroll`.
    step: [u32; MAX_UNROLL + 1],
    /// `base^(window + t)` for `t` in `0..unroll`.
    lead: [u32; MAX_UNROLL],
}
impl Powers {
    /// # Panics
    ///
    /// If `unroll` is zero or larger than [`MAX_UNROLL`].
    pub fn new(base: u32, window: usize, unroll: usize) -> Self {
        assert!(
            (1..=MAX_UNROLL).contains(&unroll),
            "unroll must be within 1..={}, got {}",
            MAX_UNROLL,
            unroll
        );
        let mut step = [0u32; MAX_UNROLL + 1];
        let mut lead = [0u32; MAX_UNROLL];
        let mut power = 1u32;
        for s in step.iter_mut().take(unroll + 1) {
            *s = power;
            power = power.wrapping_mul(base);
        }
        let mut power = crate::wrapping_pow(base, window as u64);
        for l in lead.iter_mut().take(unroll) {
            *l = power;
            power = power.wrapping_mul(base);
        }
        log::trace!(
            "powers for base:{}, window:{}, unroll:{}, stride:{}",
            base,
            window,
            unroll,
            step[unroll]
        );
        Self {
            base,
            window,
            unroll,
            step,
            lead,
        }
    }
    pub fn base(&self) -> u32 {
        self.base
    }
    pub fn window(&self) -> usize {
        self.window
    }
    pub fn unroll(&self) -> usize {
        self.unroll
    }
    /// `base^unroll`, the factor `scale` advances by per batch.
    pub fn stride(&self) -> u32 {
        self.step[self.unroll]
    }
}

/// One lane of the rolling hash, advanced with the delayed-scaling recurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneEngine {
    state: HashState,
}
impl LaneEngine {
    /// Seed the lane with its first full window, hashed directly.
    ///
    /// # Panics
    ///
    /// If `window` is not exactly `powers.window()` bytes.
    pub fn new(window: &[u8], powers: &Powers, target: u32) -> Self {
        assert_eq!(
            window.len(),
            powers.window,
            "lane seed must be one full window"
        );
        Self {
            state: HashState {
                value: window_hash(window, powers.base),
                scale: 1,
                target_scaled: target,
            },
        }
    }
    pub fn state(&self) -> HashState {
        self.state
    }
    /// Whether the current window hashes to the target.
    pub fn is_match(&self) -> bool {
        self.state.value == self.state.target_scaled
    }
    /// Slide the window forward by one byte and report whether the new window matches.
    ///
    /// `byte_out` is the first byte of the current window, `byte_in` the byte just past it.
    #[inline]
    pub fn advance(&mut self, byte_in: u8, byte_out: u8, powers: &Powers) -> bool {
        let HashState {
            value,
            scale,
            target_scaled,
        } = self.state;
        let in_power = scale.wrapping_mul(powers.lead[0]);
        let value = value
            .wrapping_add(u32::from(byte_in).wrapping_mul(in_power))
            .wrapping_sub(u32::from(byte_out).wrapping_mul(scale));
        let base = powers.step[1];
        self.state = HashState {
            value,
            scale: scale.wrapping_mul(base),
            target_scaled: target_scaled.wrapping_mul(base),
        };
        value == self.state.target_scaled
    }
    /// Slide the window forward by `powers.unroll()` bytes.
    ///
    /// Bit `t` of the returned mask is set when the window after slide `t + 1` matches.
    /// Both slices must be exactly `powers.unroll()` long.
    #[inline]
    pub fn advance_batch(&mut self, incoming: &[u8], outgoing: &[u8], powers: &Powers) -> u8 {
        debug_assert_eq!(incoming.len(), powers.unroll);
        debug_assert_eq!(outgoing.len(), powers.unroll);
        let HashState {
            mut value,
            scale,
            target_scaled,
        } = self.state;
        let mut mask = 0u8;
        for (t, (&b_in, &b_out)) in incoming.iter().zip(outgoing).enumerate() {
            let out_power = scale.wrapping_mul(powers.step[t]);
            let in_power = scale.wrapping_mul(powers.lead[t]);
            value = value
                .wrapping_add(u32::from(b_in).wrapping_mul(in_power))
                .wrapping_sub(u32::from(b_out).wrapping_mul(out_power));
            let target = target_scaled.wrapping_mul(powers.step[t + 1]);
            mask |= u8::from(value == target) << t;
        }
        let stride = powers.stride();
        self.state = HashState {
            value,
            scale: scale.wrapping_mul(stride),
            target_scaled: target_scaled.wrapping_mul(stride),
        };
        mask
    }
}
