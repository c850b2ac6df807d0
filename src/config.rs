use {
    crate::{Error, Result},
    fpolyhash::MAX_UNROLL,
};
pub const DEFAULT_BASE: u32 = 31;
pub const DEFAULT_LANE_COUNT: usize = 2;
pub const DEFAULT_CHUNK_WINDOWS: usize = 32;
pub const DEFAULT_UNROLL_FACTOR: usize = 4;
/// A validated scan configuration.
///
/// Construct with [`Config::builder`]; every invariant below holds once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The window length `w`, non-zero.
    window_length: usize,
    /// The polynomial base, odd.
    base: u32,
    /// The hash a window must have to count as a match.
    target: u32,
    /// Independent lanes per chunk, non-zero.
    lane_count: usize,
    /// `C`, the windows' worth of bytes each lane covers per chunk. Non-zero.
    chunk_windows: usize,
    /// Slides per lane per batch, within `1..=MAX_UNROLL`.
    unroll_factor: usize,
}
impl Config {
    pub fn builder() -> Builder {
        Builder::default()
    }
    /// The window length `w`, non-zero.
    pub fn window_length(&self) -> usize {
        self.window_length
    }
    /// The polynomial base, odd.
    pub fn base(&self) -> u32 {
        self.base
    }
    pub fn target(&self) -> u32 {
        self.target
    }
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }
    pub fn chunk_windows(&self) -> usize {
        self.chunk_windows
    }
    pub fn unroll_factor(&self) -> usize {
        self.unroll_factor
    }
    /// The number of window starts each lane scores in a full chunk, `C * w`.
    pub fn subblock_size(&self) -> usize {
        self.chunk_windows * self.window_length
    }
    /// The number of window starts a full chunk scores across all lanes.
    pub fn chunk_span(&self) -> usize {
        self.subblock_size() * self.lane_count
    }
    /// The size of the chunk buffer: every window start plus the `w - 1` trailing bytes the
    /// last window needs, which are carried over into the next chunk.
    pub fn chunk_bytes(&self) -> usize {
        self.chunk_span() + self.window_length - 1
    }
}
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Builder {
    window_length: Option<usize>,
    base: Option<u32>,
    target: Option<u32>,
    lane_count: Option<usize>,
    chunk_windows: Option<usize>,
    unroll_factor: Option<usize>,
}
impl Builder {
    /// Layer `builder` over `self`; values set in `builder` win.
    pub fn merge(&mut self, builder: Builder) {
        self.window_length = builder.window_length.or(self.window_length);
        self.base = builder.base.or(self.base);
        self.target = builder.target.or(self.target);
        self.lane_count = builder.lane_count.or(self.lane_count);
        self.chunk_windows = builder.chunk_windows.or(self.chunk_windows);
        self.unroll_factor = builder.unroll_factor.or(self.unroll_factor);
    }
    /// The base `build` would use.
    pub fn base_or_default(&self) -> u32 {
        self.base.unwrap_or(DEFAULT_BASE)
    }
    pub fn window_length(&mut self, window_length: Option<usize>) -> &mut Self {
        self.window_length = window_length;
        self
    }
    pub fn base(&mut self, base: Option<u32>) -> &mut Self {
        self.base = base;
        self
    }
    pub fn target(&mut self, target: Option<u32>) -> &mut Self {
        self.target = target;
        self
    }
    pub fn lane_count(&mut self, lane_count: Option<usize>) -> &mut Self {
        self.lane_count = lane_count;
        self
    }
    pub fn chunk_windows(&mut self, chunk_windows: Option<usize>) -> &mut Self {
        self.chunk_windows = chunk_windows;
        self
    }
    pub fn unroll_factor(&mut self, unroll_factor: Option<usize>) -> &mut Self {
        self.unroll_factor = unroll_factor;
        self
    }
    pub fn with_window_length(mut self, window_length: usize) -> Self {
        self.window_length(Some(window_length));
        self
    }
    pub fn with_base(mut self, base: u32) -> Self {
        self.base(Some(base));
        self
    }
    pub fn with_target(mut self, target: u32) -> Self {
        self.target(Some(target));
        self
    }
    pub fn with_lane_count(mut self, lane_count: usize) -> Self {
        self.lane_count(Some(lane_count));
        self
    }
    pub fn with_chunk_windows(mut self, chunk_windows: usize) -> Self {
        self.chunk_windows(Some(chunk_windows));
        self
    }
    pub fn with_unroll_factor(mut self, unroll_factor: usize) -> Self {
        self.unroll_factor(Some(unroll_factor));
        self
    }
    pub fn build(self) -> Result<Config> {
        let window_length = self
            .window_length
            .ok_or_else(|| Error::invalid("window_length is required"))?;
        let target = self
            .target
            .ok_or_else(|| Error::invalid("target is required"))?;
        let config = Config {
            window_length,
            base: self.base_or_default(),
            target,
            lane_count: self.lane_count.unwrap_or(DEFAULT_LANE_COUNT),
            chunk_windows: self.chunk_windows.unwrap_or(DEFAULT_CHUNK_WINDOWS),
            unroll_factor: self.unroll_factor.unwrap_or(DEFAULT_UNROLL_FACTOR),
        };
        validate(&config)?;
        Ok(config)
    }
}
fn validate(config: &Config) -> Result<()> {
    if config.window_length == 0 {
        return Err(Error::invalid("window_length must be non-zero"));
    }
    if config.lane_count == 0 {
        return Err(Error::invalid("lane_count must be non-zero"));
    }
    if config.chunk_windows == 0 {
        return Err(Error::invalid("chunk_windows must be non-zero"));
    }
    if !(1..=MAX_UNROLL).contains(&config.unroll_factor) {
        return Err(Error::invalid(format!(
            "unroll_factor must be within 1..={}, got {}",
            MAX_UNROLL, config.unroll_factor
        )));
    }
    // Scaling the target by base^i only preserves equality when base is a unit mod 2^32.
    if config.base % 2 == 0 {
        return Err(Error::invalid(format!(
            "base must be odd, got {}",
            config.base
        )));
    }
    config
        .chunk_windows
        .checked_mul(config.window_length)
        .and_then(|sub| sub.checked_mul(config.lane_count))
        .and_then(|span| span.checked_add(config.window_length - 1))
        .ok_or_else(|| Error::invalid("chunk size overflows usize"))?;
    Ok(())
}
