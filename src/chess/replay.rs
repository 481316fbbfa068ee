use super::error::ConvertError;
use super::types::{GameRecord, Headers, Ply, StartingPosition, fen_of};
use log::{debug, trace};
use shakmaty::{Position, san::SanPlus, uci::UciMove};

impl GameRecord {
    pub fn new(start: &StartingPosition) -> Self {
        Self {
            headers: Headers::default(),
            start: start.clone(),
            plies: Vec::new(),
            position: start.position().clone(),
        }
    }

    /// Applies one UCI token to the leaf position and appends it to the
    /// mainline. `line` is 1-based and only used for diagnostics.
    ///
    /// On error the record is left untouched.
    pub fn push(&mut self, line: usize, token: &str) -> Result<&Ply, ConvertError> {
        let uci: UciMove = token.parse().map_err(|source| ConvertError::MalformedMove {
            line,
            token: token.to_string(),
            source,
        })?;

        let m = uci
            .to_move(&self.position)
            .map_err(|_| ConvertError::IllegalMove {
                line,
                token: token.to_string(),
                fen: fen_of(&self.position),
            })?;

        let move_number = self.position.fullmoves().get();
        let turn = self.position.turn();
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, m);
        let fen_after = fen_of(&self.position);

        trace!("ply {}: {} -> {} ({})", self.plies.len() + 1, token, san, fen_after);

        self.plies.push(Ply {
            uci: token.to_string(),
            san,
            move_number,
            turn,
            fen_after,
        });

        Ok(&self.plies[self.plies.len() - 1])
    }
}

/// Replays `moves` from `start`. Stops at the first malformed or illegal
/// token; nothing is returned for a partial game.
pub fn replay<S: AsRef<str>>(
    start: &StartingPosition,
    moves: &[S],
) -> Result<GameRecord, ConvertError> {
    let mut record = GameRecord::new(start);

    for (idx, token) in moves.iter().enumerate() {
        record.push(idx + 1, token.as_ref())?;
    }

    debug!(
        "replayed {} plies from {} to {}",
        record.len(),
        start.fen(),
        record.final_fen()
    );

    Ok(record)
}
