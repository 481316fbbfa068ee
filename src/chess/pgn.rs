use super::types::GameRecord;
use shakmaty::Color;
use std::fmt::{self, Write};

fn escape_tag_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl GameRecord {
    /// Mainline in SAN with move numbers, terminated by the result marker.
    ///
    /// A black move gets an explicit `N...` number only when it opens the
    /// movetext.
    pub fn movetext(&self) -> String {
        let mut out = String::with_capacity(8 * self.plies.len() + 4);

        for (idx, ply) in self.plies.iter().enumerate() {
            if !out.is_empty() {
                out.push(' ');
            }

            match ply.turn {
                Color::White => {
                    let _ = write!(out, "{}. ", ply.move_number);
                }
                Color::Black if idx == 0 => {
                    let _ = write!(out, "{}... ", ply.move_number);
                }
                Color::Black => {}
            }

            let _ = write!(out, "{}", ply.san);
        }

        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&self.headers.result);
        out
    }

    /// Full transcript: tag pairs, a blank line, movetext. No trailing newline.
    pub fn to_pgn(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.headers.roster() {
            writeln!(f, "[{} \"{}\"]", name, escape_tag_value(value))?;
        }

        if !self.start.is_standard() {
            writeln!(f, "[FEN \"{}\"]", self.start.fen())?;
            writeln!(f, "[SetUp \"1\"]")?;
        }

        writeln!(f)?;
        write!(f, "{}", self.movetext())
    }
}
