use super::types::GameRecord;
use serde_json::{Value, json};

/// One object per ply: ply index, fullmove number, UCI, SAN and the FEN
/// after the move.
pub fn plies_json(record: &GameRecord) -> Value {
    Value::Array(
        record
            .plies()
            .iter()
            .enumerate()
            .map(|(idx, ply)| {
                json!({
                    "ply": idx + 1,
                    "move_number": ply.move_number,
                    "uci": ply.uci,
                    "san": ply.san.to_string(),
                    "fen": ply.fen_after,
                })
            })
            .collect(),
    )
}

/// Renders the token list as `['f3g5', 'd7d6']` for the `--echo` diagnostic.
pub fn echo_moves<S: AsRef<str>>(moves: &[S]) -> String {
    let quoted: Vec<String> = moves
        .iter()
        .map(|m| format!("'{}'", m.as_ref().replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}
