//! The leaping controller: bounded-memory chunking of an unbounded stream.
//!
//! A full chunk holds `lane_count * C * w` window starts plus the `w - 1` bytes the last of
//! them needs. Those trailing bytes are carried to the front of the buffer for the next chunk,
//! so each chunk re-pays only the lanes' seeding, `lane_count * w` bytes of direct hashing,
//! regardless of the stream's length. Memory is the chunk buffer, `O(C * w)`.
//!
//! The final, partial chunk splits its remaining windows evenly across the lanes and leaves
//! the fewer-than-`lane_count` leftovers to a single lane rolling one byte at a time.
use {
    crate::{Config, Error, LaneBank, MatchAccumulator, Result},
    fpolyhash::{LaneEngine, Powers},
    std::io::{self, Read},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Reading bytes into the chunk buffer.
    Filling,
    /// Driving the lanes over the buffered chunk.
    Processing,
    /// Scoring the stream's last few windows with a single lane.
    DrainingTail,
    Done,
}

/// Work accounting for a finished scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub matches: u64,
    /// Bytes read from the source.
    pub bytes: u64,
    /// Windows scored, `bytes - w + 1` when the stream holds at least one window.
    pub windows: u64,
    /// Chunks handed to the lanes, including a partial final one.
    pub chunks: u64,
    /// Bytes hashed directly to seed lanes, the cost of leaping.
    pub seeded_bytes: u64,
}

pub struct ChunkScheduler<R> {
    source: R,
    config: Config,
    bank: LaneBank,
    /// The single lane for the tail, rolling one byte per step.
    tail_powers: Powers,
    buf: Vec<u8>,
    filled: usize,
    /// The absolute stream position of `buf[0]`.
    offset: u64,
    eof: bool,
    /// Window starts in `buf` left for the tail, once the lanes are done with a partial chunk.
    tail: std::ops::Range<usize>,
    state: State,
    report: ScanReport,
}
impl<R> ChunkScheduler<R>
where
    R: Read,
{
    pub fn new(source: R, config: Config) -> Self {
        let bank = LaneBank::new(&config);
        let tail_powers = Powers::new(config.base(), config.window_length(), 1);
        Self {
            source,
            buf: vec![0; config.chunk_bytes()],
            config,
            bank,
            tail_powers,
            filled: 0,
            offset: 0,
            eof: false,
            tail: 0..0,
            state: State::Filling,
            report: ScanReport::default(),
        }
    }
    pub fn state(&self) -> State {
        self.state
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    /// Run one state transition, returning the new state.
    pub fn step(&mut self, acc: &mut MatchAccumulator) -> Result<State> {
        let next = match self.state {
            State::Filling => self.fill()?,
            State::Processing => self.process(acc),
            State::DrainingTail => self.drain_tail(acc),
            State::Done => State::Done,
        };
        if next != self.state {
            log::trace!("scheduler {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        Ok(next)
    }
    /// Drive the scan to completion.
    pub fn run(mut self, acc: &mut MatchAccumulator) -> Result<ScanReport> {
        while self.step(acc)? != State::Done {}
        self.report.matches = acc.total();
        Ok(self.report)
    }
    fn fill(&mut self) -> Result<State> {
        while self.filled < self.buf.len() && !self.eof {
            match self.source.read(&mut self.buf[self.filled..]) {
                Ok(0) => self.eof = true,
                Ok(n) => {
                    self.filled += n;
                    self.report.bytes += n as u64;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {},
                Err(err) => return Err(Error::IoInputRead { err }),
            }
        }
        if self.filled < self.config.window_length() {
            // Only carried bytes, or a stream shorter than one window.
            return Ok(State::Done);
        }
        Ok(State::Processing)
    }
    fn process(&mut self, acc: &mut MatchAccumulator) -> State {
        let w = self.config.window_length();
        let lane_count = self.config.lane_count();
        let windows = self.filled - w + 1;
        let full = self.filled == self.buf.len();
        let span = if full {
            self.config.subblock_size()
        } else {
            windows / lane_count
        };
        self.report.windows += windows as u64;
        if span > 0 {
            let chunk = &self.buf[..self.filled];
            self.bank.scan(chunk, span, self.offset, acc);
            let folded = acc.fold();
            self.report.chunks += 1;
            self.report.seeded_bytes += (lane_count * w) as u64;
            log::debug!(
                "chunk:{} @{}, bytes:{}, windows:{}, lanes:{}x{}, matches:{}",
                self.report.chunks,
                self.offset,
                self.filled,
                lane_count * span,
                lane_count,
                span,
                folded,
            );
        }
        if full {
            let consumed = self.filled - (w - 1);
            self.buf.copy_within(consumed..self.filled, 0);
            self.offset += consumed as u64;
            self.filled = w - 1;
            return State::Filling;
        }
        self.tail = lane_count * span..windows;
        if self.tail.is_empty() {
            State::Done
        } else {
            State::DrainingTail
        }
    }
    fn drain_tail(&mut self, acc: &mut MatchAccumulator) -> State {
        let w = self.config.window_length();
        let std::ops::Range { start, end } = self.tail.clone();
        log::trace!(
            "draining tail windows @{}..{}",
            self.offset + start as u64,
            self.offset + end as u64
        );
        let mut engine = LaneEngine::new(
            &self.buf[start..start + w],
            &self.tail_powers,
            self.config.target(),
        );
        self.report.seeded_bytes += w as u64;
        acc.record(0, self.offset + start as u64, u8::from(engine.is_match()));
        for out in start..end - 1 {
            let matched = engine.advance(self.buf[out + w], self.buf[out], &self.tail_powers);
            acc.record(0, self.offset + out as u64 + 1, u8::from(matched));
        }
        let _ = acc.fold();
        self.tail = 0..0;
        State::Done
    }
}
