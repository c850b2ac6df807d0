use {
    crate::{ChunkScheduler, Config, MatchAccumulator, Result, ScanReport},
    fpolyhash::window_hash,
    std::io::Read,
};
/// A configured, reusable scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanner {
    config: Config,
}
impl Scanner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    /// Count the windows of `source` hashing to the target.
    pub fn count<R: Read>(&self, source: R) -> Result<u64> {
        self.scan_report(source).map(|report| report.matches)
    }
    /// The start positions of every matching window, in stream order.
    pub fn find<R: Read>(&self, source: R) -> Result<Vec<u64>> {
        let mut acc = MatchAccumulator::with_positions(self.config.lane_count());
        let report = ChunkScheduler::new(source, self.config.clone()).run(&mut acc)?;
        log_report(&report);
        Ok(acc.into_positions())
    }
    pub fn scan_report<R: Read>(&self, source: R) -> Result<ScanReport> {
        let mut acc = MatchAccumulator::new(self.config.lane_count());
        let report = ChunkScheduler::new(source, self.config.clone()).run(&mut acc)?;
        log_report(&report);
        Ok(report)
    }
}
fn log_report(report: &ScanReport) {
    log::info!(
        "scanned bytes:{}, windows:{}, chunks:{}, seeded bytes:{}, matches:{}",
        report.bytes,
        report.windows,
        report.chunks,
        report.seeded_bytes,
        report.matches,
    );
}
fn scanner(window_length: usize, base: u32, target: u32) -> Result<Scanner> {
    let config = Config::builder()
        .with_window_length(window_length)
        .with_base(base)
        .with_target(target)
        .build()?;
    Ok(Scanner::new(config))
}
/// Count the windows of `source` hashing to `target`, with the default lane and chunk
/// configuration. `stream_length` bounds the read; `None` reads to the end.
pub fn count_matches<R: Read>(
    source: R,
    stream_length: Option<u64>,
    window_length: usize,
    base: u32,
    target: u32,
) -> Result<u64> {
    let scanner = scanner(window_length, base, target)?;
    match stream_length {
        Some(len) => scanner.count(source.take(len)),
        None => scanner.count(source),
    }
}
/// Like [`count_matches`], but enumerating each matching window's start position.
pub fn find_matches<R: Read>(
    source: R,
    stream_length: Option<u64>,
    window_length: usize,
    base: u32,
    target: u32,
) -> Result<Vec<u64>> {
    let scanner = scanner(window_length, base, target)?;
    match stream_length {
        Some(len) => scanner.find(source.take(len)),
        None => scanner.find(source),
    }
}
/// Hash every window directly, `O(n * w)`. The reference the streaming path must agree with.
pub fn naive_positions(bytes: &[u8], window_length: usize, base: u32, target: u32) -> Vec<u64> {
    if window_length == 0 {
        return Vec::new();
    }
    bytes
        .windows(window_length)
        .enumerate()
        .filter(|(_, window)| window_hash(window, base) == target)
        .map(|(i, _)| i as u64)
        .collect()
}
pub fn naive_count(bytes: &[u8], window_length: usize, base: u32, target: u32) -> u64 {
    naive_positions(bytes, window_length, base, target).len() as u64
}
#[cfg(test)]
pub mod test {
    use {
        super::*,
        crate::Error,
        proptest::prelude::*,
        rstest::*,
    };
    fn init_logger() {
        let mut env_builder = env_logger::builder();
        env_builder.is_test(true);
        if std::env::var("RUST_LOG").is_err() {
            env_builder.filter(Some("rkscan"), log::LevelFilter::Debug);
        }
        let _ = env_builder.try_init();
    }
    fn scanner_with(w: usize, base: u32, target: u32, lanes: usize, chunk_windows: usize) -> Scanner {
        Scanner::new(
            Config::builder()
                .with_window_length(w)
                .with_base(base)
                .with_target(target)
                .with_lane_count(lanes)
                .with_chunk_windows(chunk_windows)
                .build()
                .unwrap(),
        )
    }
    /// A deterministic, low-entropy stream so that windows repeat.
    fn stream(len: usize, alphabet: u32) -> Vec<u8> {
        let mut x = 0x2545_f491u32;
        (0..len)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                b'a' + (x % alphabet) as u8
            })
            .collect()
    }
    #[test]
    fn eight_as() {
        init_logger();
        let a = u32::from(b'a');
        let target = a * 31 * 31 * 31 + a * 31 * 31 + a * 31 + a;
        assert_eq!(
            count_matches(&b"aaaaaaaa"[..], None, 4, 31, target).unwrap(),
            5
        );
        assert_eq!(
            find_matches(&b"aaaaaaaa"[..], None, 4, 31, target).unwrap(),
            vec![0, 1, 2, 3, 4]
        );
    }
    #[test]
    fn shorter_than_a_window() {
        assert_eq!(count_matches(&b"aaa"[..], None, 4, 31, 0).unwrap(), 0);
        assert_eq!(count_matches(&b""[..], None, 1, 31, 0).unwrap(), 0);
    }
    #[rstest]
    fn exactly_one_window(#[values(1, 2, 4)] lanes: usize) {
        let target = window_hash(b"abcd", 31);
        assert_eq!(scanner_with(4, 31, target, lanes, 8).count(&b"abcd"[..]).unwrap(), 1);
        assert_eq!(scanner_with(4, 31, target + 1, lanes, 8).count(&b"abcd"[..]).unwrap(), 0);
    }
    #[test]
    fn stream_length_bounds_the_read() {
        let target = window_hash(b"aaaa", 31);
        assert_eq!(
            count_matches(&b"aaaaaaaa"[..], Some(6), 4, 31, target).unwrap(),
            3
        );
    }
    #[test]
    fn invalid_before_reading() {
        struct Untouchable;
        impl Read for Untouchable {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                panic!("read before configuration was validated")
            }
        }
        for (w, base) in [(0, 31), (4, 32)] {
            assert!(matches!(
                count_matches(Untouchable, None, w, base, 0),
                Err(Error::InvalidConfiguration { .. })
            ));
        }
    }
    #[rstest]
    #[case::even_base(Config::builder().with_window_length(4).with_base(2))]
    #[case::zero_window(Config::builder().with_window_length(0))]
    #[case::zero_unroll(Config::builder().with_window_length(4).with_unroll_factor(0))]
    fn scanners_only_take_validated_configs(#[case] builder: crate::config::Builder) {
        // `Config` has no public constructor besides the builder, so an invalid one never
        // reaches a scanner.
        assert!(matches!(
            builder.with_target(12345).build(),
            Err(Error::InvalidConfiguration { .. })
        ));
        let bytes = [b'z'; 200];
        let scanner = scanner_with(4, 3, 12345, 2, 32);
        assert_eq!(
            scanner.count(&bytes[..]).unwrap(),
            naive_count(&bytes, 4, 3, 12345)
        );
        assert_eq!(scanner.config().base(), 3);
    }
    #[rstest]
    fn agrees_with_naive(
        #[values(1, 2, 4)] lanes: usize,
        #[values(1, 8, 32)] chunk_windows: usize,
        #[values(1, 3, 16)] w: usize,
    ) {
        let bytes = stream(3001, 3);
        let target = window_hash(&bytes[1500..1500 + w], 31);
        let scanner = scanner_with(w, 31, target, lanes, chunk_windows);
        let expected = naive_positions(&bytes, w, 31, target);
        assert_eq!(scanner.find(&bytes[..]).unwrap(), expected);
        assert_eq!(scanner.count(&bytes[..]).unwrap(), expected.len() as u64);
    }
    #[test]
    fn straddles_chunk_boundary() {
        init_logger();
        // Full chunks with one lane and chunk_windows = 2 hold 2w window starts, so a window
        // starting at 2w - 1 spills into the next chunk's carried bytes.
        let w = 8;
        let mut bytes = vec![b'.'; 5 * w];
        let needle = b"NEEDLE!!";
        bytes[2 * w - 1..3 * w - 1].copy_from_slice(needle);
        let target = window_hash(needle, 31);
        for lanes in [1, 2, 4] {
            let scanner = scanner_with(w, 31, target, lanes, 2);
            assert_eq!(scanner.find(&bytes[..]).unwrap(), vec![2 * w as u64 - 1]);
        }
    }
    #[test]
    fn wraparound_matches_modular_reference() {
        // 1_000_003^2 already exceeds 2^32.
        let (w, base) = (24, 1_000_003u32);
        let bytes = stream(4000, 2);
        let window = &bytes[777..777 + w];
        let mut target = 0u64;
        let mut power = 1u64;
        for &b in window {
            target = (target + u64::from(b) * power) % (1 << 32);
            power = (power * u64::from(base)) % (1 << 32);
        }
        let target = target as u32;
        let expected = bytes
            .windows(w)
            .filter(|win| {
                let mut h = 0u64;
                let mut p = 1u64;
                for &b in *win {
                    h = (h + u64::from(b) * p) % (1 << 32);
                    p = (p * u64::from(base)) % (1 << 32);
                }
                h as u32 == target
            })
            .count() as u64;
        assert!(expected >= 1);
        assert_eq!(scanner_with(w, base, target, 2, 4).count(&bytes[..]).unwrap(), expected);
    }
    #[test]
    fn deterministic() {
        let bytes = stream(2000, 2);
        let target = window_hash(&bytes[10..15], 31);
        let results = [(1, 1), (2, 32), (4, 8), (3, 5)]
            .iter()
            .map(|&(lanes, cw)| scanner_with(5, 31, target, lanes, cw).find(&bytes[..]).unwrap())
            .collect::<Vec<_>>();
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
        let scanner = scanner_with(5, 31, target, 2, 32);
        assert_eq!(scanner.count(&bytes[..]).unwrap(), scanner.count(&bytes[..]).unwrap());
    }
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn leaping_equals_naive(
            bytes in proptest::collection::vec(0u8..3, 0..600),
            w in 1usize..20,
            base in any::<u32>().prop_map(|b| b | 1),
            lanes in 1usize..5,
            chunk_windows in 1usize..6,
            unroll in 1usize..=8,
            at in any::<prop::sample::Index>(),
        ) {
            let target = if bytes.len() >= w {
                let start = at.index(bytes.len() - w + 1);
                window_hash(&bytes[start..start + w], base)
            } else {
                0
            };
            let scanner = Scanner::new(
                Config::builder()
                    .with_window_length(w)
                    .with_base(base)
                    .with_target(target)
                    .with_lane_count(lanes)
                    .with_chunk_windows(chunk_windows)
                    .with_unroll_factor(unroll)
                    .build()
                    .unwrap(),
            );
            let positions = scanner.find(&bytes[..]).unwrap();
            prop_assert!(positions.windows(2).all(|p| p[0] < p[1]));
            prop_assert_eq!(positions, naive_positions(&bytes, w, base, target));
        }
    }
}
