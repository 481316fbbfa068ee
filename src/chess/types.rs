use super::error::ConvertError;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, fen::Fen, san::SanPlus};
use std::sync::LazyLock;

/// Position every conversion starts from: 1. e4 e5 2. Nf3 Nc6, white to move.
pub const DEFAULT_START_FEN: &str =
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

static DEFAULT_START: LazyLock<StartingPosition> = LazyLock::new(|| {
    StartingPosition::from_fen(DEFAULT_START_FEN).expect("valid default starting FEN")
});

static STANDARD_FEN: LazyLock<String> = LazyLock::new(|| fen_of(&Chess::default()));

pub(crate) fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Root of a game record. Keeps the FEN in normalized form so it can be
/// written back into the `FEN` tag.
#[derive(Debug, Clone)]
pub struct StartingPosition {
    fen: String,
    position: Chess,
}

impl StartingPosition {
    pub fn from_fen(fen: &str) -> Result<Self, ConvertError> {
        let invalid = |reason: String| ConvertError::InvalidStartingPosition {
            fen: fen.to_string(),
            reason,
        };

        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;

        Ok(Self {
            fen: fen_of(&position),
            position,
        })
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// True for the regular initial position, which needs no `FEN` tag.
    pub fn is_standard(&self) -> bool {
        self.fen == *STANDARD_FEN
    }
}

impl Default for StartingPosition {
    fn default() -> Self {
        DEFAULT_START.clone()
    }
}

/// One mainline move together with what is needed to print it.
#[derive(Debug, Clone)]
pub struct Ply {
    pub uci: String,
    pub san: SanPlus,
    /// Fullmove number of the position the move was played from.
    pub move_number: u32,
    pub turn: Color,
    pub fen_after: String,
}

/// Seven tag roster. No metadata is ever supplied, so every tag keeps its
/// PGN placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headers {
    pub event: String,
    pub site: String,
    pub date: String,
    pub round: String,
    pub white: String,
    pub black: String,
    pub result: String,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            event: "?".to_string(),
            site: "?".to_string(),
            date: "????.??.??".to_string(),
            round: "?".to_string(),
            white: "?".to_string(),
            black: "?".to_string(),
            result: "*".to_string(),
        }
    }
}

impl Headers {
    pub fn roster(&self) -> [(&'static str, &str); 7] {
        [
            ("Event", self.event.as_str()),
            ("Site", self.site.as_str()),
            ("Date", self.date.as_str()),
            ("Round", self.round.as_str()),
            ("White", self.white.as_str()),
            ("Black", self.black.as_str()),
            ("Result", self.result.as_str()),
        ]
    }
}

/// A linear game: the root position and the plies of its mainline, in order.
/// `position` is the leaf the next move is applied to.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub headers: Headers,
    pub(crate) start: StartingPosition,
    pub(crate) plies: Vec<Ply>,
    pub(crate) position: Chess,
}

impl GameRecord {
    pub fn start(&self) -> &StartingPosition {
        &self.start
    }

    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn final_fen(&self) -> String {
        fen_of(&self.position)
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }
}
