//! diascribe - convert whisper-diarization output to AWS Transcribe JSON
//!
//! Reads `<input>.srt` (whisper-diarization subtitles) and `<input>.json`
//! (whisper segments with word timings) and writes one merged transcript.

mod convert;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::prelude::*;

use crate::convert::TimingSource;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input base name without extension; `<INPUT>.srt` and `<INPUT>.json` are read
    input: PathBuf,

    /// Output JSON file
    output: PathBuf,

    /// Where item timings come from
    #[arg(long, value_enum, default_value_t = TimingSource::Words)]
    timing: TimingSource,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    convert::run(&cli.input, &cli.output, cli.timing)?;
    Ok(())
}

/// Log to stderr so diagnostics never mix with the output file
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
