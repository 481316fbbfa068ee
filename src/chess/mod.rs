mod error;
mod input;
pub mod logging;
mod mainline;
mod moves;
mod pgn;
mod replay;
mod types;

pub use error::ConvertError;
pub use input::{CompressionMode, InputSource, MoveInput, open_input, read_moves, split_moves};
pub use mainline::{Mainline, SanList, read_mainline, verify_round_trip};
pub use moves::{echo_moves, plies_json};
pub use replay::replay;
pub use types::{DEFAULT_START_FEN, GameRecord, Headers, Ply, StartingPosition};

use log::info;
use std::io::{Read, Write};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pgn,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    pub start: StartingPosition,
    pub format: OutputFormat,
    /// Print the parsed token list before converting.
    pub echo: bool,
    /// Re-read the rendered PGN and check it replays to the same game.
    pub verify: bool,
}

/// Reads all moves from `input`, replays them from `options.start` and writes
/// the transcript to `out`.
///
/// Nothing but the optional echo is written unless the whole replay succeeds.
pub fn convert<R: Read, W: Write>(
    input: R,
    origin: &str,
    options: &ConvertOptions,
    out: &mut W,
) -> Result<GameRecord, ConvertError> {
    let moves = read_moves(input, origin)?;

    if options.echo {
        writeln!(out, "{}", echo_moves(&moves))?;
    }

    let record = replay(&options.start, &moves)?;

    let rendered = match options.format {
        OutputFormat::Pgn => {
            let pgn = record.to_pgn();
            if options.verify {
                verify_round_trip(&record, &pgn)?;
            }
            pgn
        }
        OutputFormat::Json => {
            if options.verify {
                verify_round_trip(&record, &record.to_pgn())?;
            }
            plies_json(&record).to_string()
        }
    };

    writeln!(out, "{}", rendered)?;
    out.flush()?;

    info!("converted {} moves from {}", record.len(), origin);
    Ok(record)
}
