use clap::Parser;
use rangeprobe::report::{ConsoleSink, TracingSink, format_summary};
use rangeprobe::search::{NullSink, partition};
use rangeprobe::{
    CancelToken, CommandOracle, ProgressSnapshot, SearchConfig, SearchError, SearchReport,
    SearchSpace, SnapshotSink, run_search,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// --- Command Line Arguments ---

#[derive(Parser, Debug)]
#[command(name = "rangeprobe")]
#[command(about = "rangeprobe - parallel exhaustive search over a numeric range")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Args {
    /// First candidate (inclusive)
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last candidate (inclusive). Defaults to the largest number with `--width` digits.
    #[arg(long)]
    end: Option<u64>,

    /// Zero-pad candidates to this many digits when substituting `{code}`
    #[arg(short = 'w', long, default_value_t = 16)]
    width: usize,

    /// Number of worker threads (default: logical CPUs, capped at 16)
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Output text that marks a successful probe (repeatable). Without any,
    /// a zero exit status marks success.
    #[arg(short = 'm', long = "match", value_name = "TEXT")]
    markers: Vec<String>,

    /// Progress refresh interval in milliseconds
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,

    /// Skip the initial probe without a candidate
    #[arg(long)]
    no_direct: bool,

    /// Suppress live progress output
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Command to run per candidate; `{code}` in any argument is replaced
    /// by the candidate
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

/// Where live progress goes, chosen once at startup.
enum ProgressOutput {
    Console(ConsoleSink<std::io::Stdout>),
    Log(TracingSink),
    Silent(NullSink),
}

impl ProgressOutput {
    fn select(quiet: bool, width: usize) -> Self {
        if quiet {
            ProgressOutput::Silent(NullSink)
        } else if std::io::stdout().is_terminal() {
            ProgressOutput::Console(ConsoleSink::stdout(width))
        } else {
            ProgressOutput::Log(TracingSink)
        }
    }

    fn finish(&mut self) {
        if let ProgressOutput::Console(sink) = self {
            sink.finish();
        }
    }
}

impl SnapshotSink for ProgressOutput {
    fn present(&mut self, snapshot: &ProgressSnapshot) {
        match self {
            ProgressOutput::Console(sink) => sink.present(snapshot),
            ProgressOutput::Log(sink) => sink.present(snapshot),
            ProgressOutput::Silent(sink) => sink.present(snapshot),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn search_space(args: &Args) -> Result<SearchSpace, SearchError> {
    match args.end {
        Some(end) => SearchSpace::new(args.start, end),
        None => {
            let digits = u32::try_from(args.width).unwrap_or(u32::MAX);
            let full = SearchSpace::decimal_digits(digits)?;
            SearchSpace::new(args.start, full.end())
        }
    }
}

fn run(args: Args) -> Result<SearchReport, SearchError> {
    let space = search_space(&args)?;

    let (program, program_args) = match args.command.split_first() {
        Some((program, rest)) => (program.clone(), rest.to_vec()),
        None => return Err(SearchError::Oracle("no command given".to_string())),
    };
    let oracle = CommandOracle::new(program, program_args)?
        .with_width(args.width)
        .with_markers(args.markers.clone());

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping after in-flight probes...");
        handler_token.cancel();
    })
    .map_err(|e| SearchError::Interrupt(e.to_string()))?;

    let config = SearchConfig::default()
        .with_workers_option(args.workers)
        .with_progress_interval(Duration::from_millis(args.interval_ms.max(1)))
        .with_direct_probe(!args.no_direct);

    let workers = partition(space, config.workers)?.len();
    println!(
        "Searching [{:0width$}, {:0width$}] ({} candidates) with {} workers",
        space.start(),
        space.end(),
        space.size(),
        workers,
        width = args.width
    );
    if config.try_direct {
        println!("Trying direct probe first...");
    }
    println!("Press Ctrl+C to stop\n");

    let mut progress = ProgressOutput::select(args.quiet, args.width);
    let report = run_search(space, &config, &oracle, &cancel, &mut progress);
    progress.finish();
    report
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    let width = args.width;

    match run(args) {
        Ok(report) => {
            print!("\n{}", format_summary(&report, width));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
