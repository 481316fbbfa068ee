use clap::Parser;
use log::error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use uci_to_pgn::{
    CompressionMode, ConvertError, ConvertOptions, InputSource, OutputFormat, convert, logging,
    open_input,
};

#[derive(Parser, Debug)]
#[command(name = "uci-to-pgn", version)]
#[command(about = "Replays UCI moves (one per line) from 1. e4 e5 2. Nf3 Nc6 and prints PGN")]
struct Args {
    /// File with one UCI move per line; `-` or omitted reads standard input
    input: Option<PathBuf>,

    /// Decompress the input (`zstd`). Files ending in `.zst` are detected automatically
    #[arg(long)]
    compression: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pgn)]
    format: OutputFormat,

    /// Print the parsed move list before converting
    #[arg(long)]
    echo: bool,

    /// Re-read the produced PGN and check it replays to the same position
    #[arg(long)]
    verify: bool,

    /// off, error, warn, info, debug or trace. Defaults to $CHESS_LOG, then error
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs to this file instead of standard error
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = logging::resolve_level(args.log_level.as_deref());
    if let Err(e) = logging::init(level, args.log_file.as_deref()) {
        eprintln!("error: cannot initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("conversion failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ConvertError> {
    let source = InputSource::from_arg(args.input.as_deref());
    let compression = CompressionMode::resolve(args.compression.as_deref(), &source)?;
    let input = open_input(&source, compression)?;

    let options = ConvertOptions {
        format: args.format,
        echo: args.echo,
        verify: args.verify,
        ..Default::default()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    convert(input, &source.to_string(), &options, &mut out)?;
    Ok(())
}
