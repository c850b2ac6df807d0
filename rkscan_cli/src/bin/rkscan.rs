use {
    rkscan::{config::Builder, window_hash, Config, Scanner},
    std::{fs::File, io, path::PathBuf},
    structopt::StructOpt,
};

#[derive(Debug, StructOpt)]
#[structopt(name = "rkscan", about = "count rolling hash matches in a byte stream")]
struct Opt {
    /// Read from this file instead of Stdin.
    #[structopt(long, short = "i", parse(from_os_str))]
    input: Option<PathBuf>,
    /// A JSON config file, layered beneath the flags below.
    #[structopt(long, env = "RKSCAN_CONFIG", parse(from_os_str))]
    config: Option<PathBuf>,
    /// Stop after this many bytes.
    #[structopt(long)]
    length: Option<u64>,
    #[structopt(flatten)]
    scan_opt: ScanOpt,
    #[structopt(subcommand)]
    cmd: Option<Command>,
}
#[derive(Debug, StructOpt)]
struct ScanOpt {
    #[structopt(long, short = "w", env = "RKSCAN_WINDOW")]
    window: Option<usize>,
    #[structopt(long, short = "b", env = "RKSCAN_BASE")]
    base: Option<u32>,
    #[structopt(long, short = "t")]
    target: Option<u32>,
    /// Match windows hashing like this string, setting both window and target.
    #[structopt(long, short = "n", conflicts_with_all = &["window", "target"])]
    needle: Option<String>,
    #[structopt(long, env = "RKSCAN_LANES")]
    lanes: Option<usize>,
    #[structopt(long, env = "RKSCAN_CHUNK_WINDOWS")]
    chunk_windows: Option<usize>,
    #[structopt(long, env = "RKSCAN_UNROLL")]
    unroll: Option<usize>,
}
#[derive(Debug, StructOpt)]
enum Command {
    /// Print the number of matching windows. The default.
    Count,
    /// Print each matching window's start position, one per line.
    Find,
    /// Print the scan's work accounting.
    Report,
    /// Print the hash of a string, for use as a target.
    Hash { input: String },
}
/// What a scan prints.
#[derive(Debug, Clone, Copy)]
enum Output {
    Count,
    Find,
    Report,
}
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rkscan error: {0}")]
    Rkscan(#[from] rkscan::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("config file error: {0}")]
    ConfigFile(#[from] serde_json::Error),
}
fn main() -> Result<(), Error> {
    env_logger::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let opt = Opt::from_args();
    let builder = builder(opt.config.as_ref(), opt.scan_opt)?;
    let output = match opt.cmd.unwrap_or(Command::Count) {
        Command::Hash { input } => {
            println!("{}", window_hash(input.as_bytes(), builder.base_or_default()));
            return Ok(());
        },
        Command::Count => Output::Count,
        Command::Find => Output::Find,
        Command::Report => Output::Report,
    };
    let config = builder.build()?;
    log::debug!("scanning with {:?}", config);
    let scanner = Scanner::new(config);
    match opt.input {
        Some(path) => run(&scanner, output, bounded(File::open(path)?, opt.length)),
        None => run(&scanner, output, bounded(io::stdin(), opt.length)),
    }
}
fn builder(config_path: Option<&PathBuf>, scan_opt: ScanOpt) -> Result<Builder, Error> {
    let mut builder = match config_path {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => Config::builder(),
    };
    let ScanOpt {
        window,
        base,
        target,
        needle,
        lanes,
        chunk_windows,
        unroll,
    } = scan_opt;
    let mut flags = Config::builder();
    flags
        .window_length(window)
        .base(base)
        .target(target)
        .lane_count(lanes)
        .chunk_windows(chunk_windows)
        .unroll_factor(unroll);
    builder.merge(flags);
    if let Some(needle) = needle {
        let target = window_hash(needle.as_bytes(), builder.base_or_default());
        builder
            .window_length(Some(needle.len()))
            .target(Some(target));
    }
    Ok(builder)
}
fn bounded<R: io::Read>(source: R, length: Option<u64>) -> io::Take<R> {
    source.take(length.unwrap_or(u64::MAX))
}
fn run<R: io::Read>(scanner: &Scanner, output: Output, source: R) -> Result<(), Error> {
    match output {
        Output::Count => println!("{}", scanner.count(source)?),
        Output::Find => {
            for pos in scanner.find(source)? {
                println!("{}", pos);
            }
        },
        Output::Report => {
            let report = scanner.scan_report(source)?;
            println!("matches: {}", report.matches);
            println!("bytes: {}", report.bytes);
            println!("windows: {}", report.windows);
            println!("chunks: {}", report.chunks);
            println!("seeded bytes: {}", report.seeded_bytes);
        },
    }
    Ok(())
}
