//! Lockstep lanes over one chunk.
//!
//! A chunk with a per-lane span of `S` window starts gives lane `j` the windows starting at
//! `j * S .. (j + 1) * S`. Lane `j` reads up to `w - 1` bytes into lane `j + 1`'s range for its
//! last windows, which the contiguous chunk buffer already holds. The lanes share no state,
//! so their chains interleave freely.
use {
    crate::{Config, MatchAccumulator},
    fpolyhash::{LaneEngine, Powers},
};

#[derive(Debug, Clone)]
pub struct LaneBank {
    lane_count: usize,
    target: u32,
    powers: Powers,
    engines: Vec<LaneEngine>,
    /// The per-lane span of the chunk the lanes were last seeded over.
    span: usize,
    masks: Vec<u8>,
}
impl LaneBank {
    pub fn new(config: &Config) -> Self {
        Self {
            lane_count: config.lane_count(),
            target: config.target(),
            powers: Powers::new(config.base(), config.window_length(), config.unroll_factor()),
            engines: Vec::with_capacity(config.lane_count()),
            span: 0,
            masks: vec![0; config.lane_count()],
        }
    }
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }
    pub fn powers(&self) -> &Powers {
        &self.powers
    }
    /// The per-lane span of the current chunk.
    pub fn span(&self) -> usize {
        self.span
    }
    /// Seed every lane from the first window of its range in `chunk`.
    ///
    /// `chunk` must hold at least `lane_count * span + w - 1` bytes, and `span` must be
    /// non-zero. Returns the mask of lanes whose first window matches.
    pub fn reset(&mut self, chunk: &[u8], span: usize) -> &[u8] {
        debug_assert!(span > 0);
        debug_assert!(chunk.len() >= self.lane_count * span + self.powers.window() - 1);
        let w = self.powers.window();
        self.span = span;
        self.engines.clear();
        for lane in 0..self.lane_count {
            let start = lane * span;
            let engine = LaneEngine::new(&chunk[start..start + w], &self.powers, self.target);
            self.masks[lane] = u8::from(engine.is_match());
            self.engines.push(engine);
        }
        &self.masks
    }
    /// Slide every lane by `unroll` bytes, starting from lane-local slide `position`.
    ///
    /// Returns one mask per lane; bit `t` is the window starting at lane-local
    /// `position + 1 + t`.
    #[inline]
    pub fn advance_all(&mut self, chunk: &[u8], position: usize) -> &[u8] {
        let w = self.powers.window();
        let k = self.powers.unroll();
        for (lane, engine) in self.engines.iter_mut().enumerate() {
            let out_start = lane * self.span + position;
            let in_start = out_start + w;
            self.masks[lane] = engine.advance_batch(
                &chunk[in_start..in_start + k],
                &chunk[out_start..out_start + k],
                &self.powers,
            );
        }
        &self.masks
    }
    /// Slide every lane by a single byte, for spans not divisible by the unroll factor.
    #[inline]
    pub fn advance_one(&mut self, chunk: &[u8], position: usize) -> &[u8] {
        let w = self.powers.window();
        for (lane, engine) in self.engines.iter_mut().enumerate() {
            let out = lane * self.span + position;
            self.masks[lane] = u8::from(engine.advance(chunk[out + w], chunk[out], &self.powers));
        }
        &self.masks
    }
    /// Score every window starting in `chunk[..lane_count * span]`, recording into `acc`.
    ///
    /// `offset` is the absolute stream position of `chunk[0]`.
    pub fn scan(&mut self, chunk: &[u8], span: usize, offset: u64, acc: &mut MatchAccumulator) {
        let masks = self.reset(chunk, span);
        for (lane, &mask) in masks.iter().enumerate() {
            acc.record(lane, offset + (lane * span) as u64, mask);
        }
        let slides = span - 1;
        let k = self.powers.unroll();
        let mut position = 0;
        while position + k <= slides {
            let masks = self.advance_all(chunk, position);
            for (lane, &mask) in masks.iter().enumerate() {
                acc.record(lane, offset + (lane * span + position + 1) as u64, mask);
            }
            position += k;
        }
        while position < slides {
            let masks = self.advance_one(chunk, position);
            for (lane, &mask) in masks.iter().enumerate() {
                acc.record(lane, offset + (lane * span + position + 1) as u64, mask);
            }
            position += 1;
        }
    }
}
