//! Replays UCI long-algebraic moves from a fixed opening position and renders
//! the resulting game as PGN.
//!
//! ```
//! use uci_to_pgn::{StartingPosition, replay};
//!
//! let record = replay(&StartingPosition::default(), &["f3g5"]).unwrap();
//! assert_eq!(record.movetext(), "3. Ng5 *");
//! ```

mod chess;

pub use chess::logging;
pub use chess::{
    CompressionMode, ConvertError, ConvertOptions, DEFAULT_START_FEN, GameRecord, Headers,
    InputSource, Mainline, MoveInput, OutputFormat, Ply, SanList, StartingPosition, convert,
    echo_moves, open_input, plies_json, read_mainline, read_moves, replay, split_moves,
    verify_round_trip,
};
