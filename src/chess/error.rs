use shakmaty::uci::ParseUciMoveError;
use std::io;
use thiserror::Error;

/// Everything that can abort a conversion. The first error wins; there is no
/// per-move recovery.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("malformed move '{token}' on line {line}: {source}")]
    MalformedMove {
        line: usize,
        token: String,
        #[source]
        source: ParseUciMoveError,
    },

    #[error("illegal move '{token}' on line {line} in position {fen}")]
    IllegalMove {
        line: usize,
        token: String,
        fen: String,
    },

    #[error("invalid starting position '{fen}': {reason}")]
    InvalidStartingPosition { fen: String, reason: String },

    #[error("failed to read moves from {origin}: {source}")]
    Input {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid compression value '{0}'. Supported values: 'zstd' or omitted")]
    InvalidCompression(String),

    #[error("failed to read PGN: {0}")]
    Pgn(String),

    #[error("round-trip mismatch: expected final position {expected}, PGN replays to {actual}")]
    VerificationFailed { expected: String, actual: String },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::ConvertError;

    #[test]
    fn test_malformed_move_message_names_line_and_token() {
        let source = "e9e4".parse::<shakmaty::uci::UciMove>().unwrap_err();
        let err = ConvertError::MalformedMove {
            line: 3,
            token: "e9e4".to_string(),
            source,
        };

        let msg = err.to_string();
        assert!(msg.starts_with("malformed move 'e9e4' on line 3"));
    }

    #[test]
    fn test_illegal_move_message_includes_fen() {
        let err = ConvertError::IllegalMove {
            line: 1,
            token: "e1e2".to_string(),
            fen: "8/8/8/8/8/8/8/4K2k w - - 0 1".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "illegal move 'e1e2' on line 1 in position 8/8/8/8/8/8/8/4K2k w - - 0 1"
        );
    }

    #[test]
    fn test_invalid_compression_message() {
        let err = ConvertError::InvalidCompression("gzip".to_string());
        assert_eq!(
            err.to_string(),
            "invalid compression value 'gzip'. Supported values: 'zstd' or omitted"
        );
    }
}
