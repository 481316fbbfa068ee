use super::error::ConvertError;
use super::types::{GameRecord, fen_of};
use log::debug;
use pgn_reader::{Outcome, RawTag, Reader, SanPlus, Skip, Visitor};
use shakmaty::{CastlingMode, Chess, Position, fen::Fen};
use smallvec::SmallVec;
use std::io;
use std::ops::ControlFlow;

pub type SanList = SmallVec<[SanPlus; 128]>;

/// First game of a PGN text, reduced to its mainline and replayed.
#[derive(Debug, Clone)]
pub struct Mainline {
    pub start: Chess,
    pub sans: SanList,
    pub outcome: Option<String>,
    pub position: Chess,
}

impl Mainline {
    pub fn final_fen(&self) -> String {
        fen_of(&self.position)
    }
}

/// Movetext state while the reader walks the game.
struct Replayed {
    start: Chess,
    position: Chess,
    sans: SanList,
    outcome: Option<String>,
}

struct MainlineVisitor;

impl Visitor for MainlineVisitor {
    type Tags = Option<Chess>;
    type Movetext = Replayed;
    type Output = Result<Mainline, ConvertError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(None)
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        if key != b"FEN" {
            return ControlFlow::Continue(());
        }

        let parsed = Fen::from_ascii(value.as_bytes())
            .map_err(|e| e.to_string())
            .and_then(|fen| {
                fen.into_position::<Chess>(CastlingMode::Standard)
                    .map_err(|e| e.to_string())
            });

        match parsed {
            Ok(pos) => {
                *tags = Some(pos);
                ControlFlow::Continue(())
            }
            Err(reason) => ControlFlow::Break(Err(ConvertError::Pgn(format!(
                "invalid FEN tag '{}': {}",
                String::from_utf8_lossy(value.as_bytes()),
                reason
            )))),
        }
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let start = tags.unwrap_or_default();
        ControlFlow::Continue(Replayed {
            position: start.clone(),
            start,
            sans: SanList::new(),
            outcome: None,
        })
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(
        &mut self,
        movetext: &mut Self::Movetext,
        san_plus: SanPlus,
    ) -> ControlFlow<Self::Output> {
        match san_plus.san.to_move(&movetext.position) {
            Ok(m) => {
                movetext.position.play_unchecked(m);
                movetext.sans.push(san_plus);
                ControlFlow::Continue(())
            }
            Err(e) => ControlFlow::Break(Err(ConvertError::Pgn(format!(
                "cannot play '{}' after {} plies: {}",
                san_plus,
                movetext.sans.len(),
                e
            )))),
        }
    }

    fn outcome(
        &mut self,
        movetext: &mut Self::Movetext,
        outcome: Outcome,
    ) -> ControlFlow<Self::Output> {
        movetext.outcome = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        Ok(Mainline {
            start: movetext.start,
            sans: movetext.sans,
            outcome: movetext.outcome,
            position: movetext.position,
        })
    }
}

/// Reads the first game of `pgn`, starting from its `FEN` tag when present.
/// Variations, comments and NAGs are skipped.
pub fn read_mainline(pgn: &str) -> Result<Mainline, ConvertError> {
    let mut reader = Reader::new(io::Cursor::new(pgn.as_bytes()));

    match reader.read_game(&mut MainlineVisitor) {
        Ok(Some(result)) => result,
        Ok(None) => Err(ConvertError::Pgn("no game found".to_string())),
        Err(e) => Err(ConvertError::Pgn(e.to_string())),
    }
}

/// Re-reads a rendered transcript and checks it replays to the same game:
/// same number of plies, same SAN, same final position.
pub fn verify_round_trip(record: &GameRecord, pgn: &str) -> Result<(), ConvertError> {
    let mainline = read_mainline(pgn)?;

    let expected_sans: Vec<String> = record.plies().iter().map(|p| p.san.to_string()).collect();
    let actual_sans: Vec<String> = mainline.sans.iter().map(|s| s.to_string()).collect();
    if expected_sans != actual_sans {
        return Err(ConvertError::VerificationFailed {
            expected: expected_sans.join(" "),
            actual: actual_sans.join(" "),
        });
    }

    let expected = record.final_fen();
    let actual = mainline.final_fen();
    if expected != actual {
        return Err(ConvertError::VerificationFailed { expected, actual });
    }

    debug!("round trip ok: {} plies, final position {}", actual_sans.len(), actual);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::replay::replay;
    use crate::chess::types::{DEFAULT_START_FEN, StartingPosition};
    use shakmaty::uci::UciMove;

    const RUY_LOPEZ: [&str; 10] = [
        "f1b5", "a7a6", "b5a4", "g8f6", "e1g1", "f8e7", "f1e1", "b7b5", "a4b3", "d7d6",
    ];

    #[test]
    fn test_round_trip_reaches_same_final_position() {
        let record = replay(&StartingPosition::default(), &RUY_LOPEZ).unwrap();
        let mainline = read_mainline(&record.to_pgn()).unwrap();

        assert_eq!(mainline.sans.len(), RUY_LOPEZ.len());
        assert_eq!(mainline.final_fen(), record.final_fen());
        assert_eq!(mainline.outcome.as_deref(), Some("*"));
        verify_round_trip(&record, &record.to_pgn()).unwrap();
    }

    #[test]
    fn test_first_ply_matches_direct_uci_application() {
        let record = replay(&StartingPosition::default(), &RUY_LOPEZ).unwrap();
        let mainline = read_mainline(&record.to_pgn()).unwrap();

        let mut from_pgn = mainline.start.clone();
        let m = mainline.sans[0].san.to_move(&from_pgn).unwrap();
        from_pgn.play_unchecked(m);

        let mut direct = StartingPosition::default().position().clone();
        let uci: UciMove = RUY_LOPEZ[0].parse().unwrap();
        let m = uci.to_move(&direct).unwrap();
        direct.play_unchecked(m);

        assert_eq!(fen_of(&from_pgn), fen_of(&direct));
    }

    #[test]
    fn test_fen_tag_sets_root() {
        let record = replay::<&str>(&StartingPosition::default(), &[]).unwrap();
        let mainline = read_mainline(&record.to_pgn()).unwrap();

        assert!(mainline.sans.is_empty());
        assert_eq!(fen_of(&mainline.start), DEFAULT_START_FEN);
    }

    #[test]
    fn test_variations_and_comments_are_skipped() {
        let pgn = "1. e4 { best by test } (1. d4 d5) e5 $1 2. Nf3 *";
        let mainline = read_mainline(pgn).unwrap();
        let sans: Vec<String> = mainline.sans.iter().map(|s| s.to_string()).collect();
        assert_eq!(sans, vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn test_illegal_san_is_reported() {
        let err = read_mainline("1. e4 e5 2. Ke3 *").unwrap_err();
        assert!(matches!(err, ConvertError::Pgn(msg) if msg.contains("Ke3")));
    }

    #[test]
    fn test_bad_fen_tag_is_reported() {
        let err = read_mainline("[FEN \"nonsense\"]\n\n*").unwrap_err();
        assert!(matches!(err, ConvertError::Pgn(msg) if msg.contains("invalid FEN tag")));
    }

    #[test]
    fn test_verify_detects_divergent_transcript() {
        let record = replay(&StartingPosition::default(), &["f3g5"]).unwrap();
        let tampered = record.to_pgn().replace("Ng5", "Nh4");
        let err = verify_round_trip(&record, &tampered).unwrap_err();
        assert!(matches!(err, ConvertError::VerificationFailed { .. }));
    }
}
