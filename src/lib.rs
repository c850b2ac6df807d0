// Lints.
#![warn(
    unsafe_code,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible,
    clippy::complexity,
    clippy::perf,
    // clippy::pedantic
    // clippy::nursery
    // clippy::cargo,
    clippy::unwrap_used,
)]
// This warning makes less sense with enum-flavored error handling,
// which this library is using.
#![allow(clippy::missing_errors_doc)]

pub mod accumulator;
pub mod bank;
pub mod config;
pub mod error;
pub mod scan;
pub mod scheduler;
pub use self::{
    accumulator::MatchAccumulator,
    bank::LaneBank,
    config::Config,
    error::{Error, Result},
    scan::{count_matches, find_matches, naive_count, naive_positions, Scanner},
    scheduler::{ChunkScheduler, ScanReport, State},
};
pub use fpolyhash::{window_hash, HashState, LaneEngine, PolyHash, Powers};
