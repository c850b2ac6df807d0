//! Per-lane match counting, folded once per chunk.
//!
//! A single counter bumped by every lane on every step is its own loop-carried chain. Each
//! lane gets its own counter instead, and they are only summed by [`MatchAccumulator::fold`].

/// Collects lane match masks into a grand total, and optionally the matched positions.
#[derive(Debug, Clone, Default)]
pub struct MatchAccumulator {
    lanes: Vec<u64>,
    total: u64,
    /// Per-lane positions, present only when enumerating.
    lane_positions: Option<Vec<Vec<u64>>>,
    positions: Vec<u64>,
}
impl MatchAccumulator {
    /// An accumulator that only counts.
    pub fn new(lane_count: usize) -> Self {
        Self {
            lanes: vec![0; lane_count],
            ..Self::default()
        }
    }
    /// An accumulator that also records every matching window's start position.
    pub fn with_positions(lane_count: usize) -> Self {
        Self {
            lanes: vec![0; lane_count],
            lane_positions: Some(vec![Vec::new(); lane_count]),
            ..Self::default()
        }
    }
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }
    /// Record a lane's batch mask. Bit `t` of `mask` is the window starting at `start + t`.
    #[inline]
    pub fn record(&mut self, lane: usize, start: u64, mask: u8) {
        self.lanes[lane] += u64::from(mask.count_ones());
        if mask == 0 {
            return;
        }
        if let Some(lane_positions) = self.lane_positions.as_mut() {
            let positions = &mut lane_positions[lane];
            let mut bits = mask;
            while bits != 0 {
                positions.push(start + u64::from(bits.trailing_zeros()));
                bits &= bits - 1;
            }
        }
    }
    /// Sum the lane counters into the total and reset them, returning the folded sum.
    ///
    /// Positions move lane by lane, so as long as lane `j` only ever scores windows before
    /// those of lane `j + 1` between folds, [`Self::positions`] stays sorted.
    pub fn fold(&mut self) -> u64 {
        let folded = self.lanes.iter().sum::<u64>();
        self.lanes.iter_mut().for_each(|count| *count = 0);
        self.total += folded;
        if let Some(lane_positions) = self.lane_positions.as_mut() {
            for lane in lane_positions.iter_mut() {
                self.positions.append(lane);
            }
        }
        folded
    }
    /// The total as of the last fold.
    pub fn total(&self) -> u64 {
        self.total
    }
    /// Matched window starts as of the last fold, in stream order.
    pub fn positions(&self) -> &[u64] {
        &self.positions
    }
    pub fn into_positions(mut self) -> Vec<u64> {
        let _ = self.fold();
        self.positions
    }
    /// Fold any outstanding lane counts and return the grand total.
    pub fn finish(mut self) -> u64 {
        let _ = self.fold();
        self.total
    }
}
