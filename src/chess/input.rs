use super::error::ConvertError;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder as ZstdDecoder;

pub type MoveInput = Box<dyn Read>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMode {
    Plain,
    Zstd,
}

impl CompressionMode {
    pub fn parse(raw: &str) -> Result<Self, ConvertError> {
        let normalized = raw.trim();
        if normalized.eq_ignore_ascii_case("zstd") {
            Ok(Self::Zstd)
        } else {
            Err(ConvertError::InvalidCompression(normalized.to_string()))
        }
    }

    /// An explicit value wins; otherwise `.zst` files are decompressed.
    pub fn resolve(explicit: Option<&str>, source: &InputSource) -> Result<Self, ConvertError> {
        match explicit {
            Some(raw) => Self::parse(raw),
            None => match source {
                InputSource::File(path)
                    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("zst")) =>
                {
                    Ok(Self::Zstd)
                }
                _ => Ok(Self::Plain),
            },
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `None` and `-` both mean standard input.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => Self::File(path.to_path_buf()),
            _ => Self::Stdin,
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "<stdin>"),
            Self::File(path) => write!(f, "'{}'", path.display()),
        }
    }
}

pub fn open_input(
    source: &InputSource,
    compression: CompressionMode,
) -> Result<MoveInput, ConvertError> {
    let input_error = |source_err: io::Error| ConvertError::Input {
        origin: source.to_string(),
        source: source_err,
    };

    let raw: MoveInput = match source {
        InputSource::Stdin => Box::new(io::stdin()),
        InputSource::File(path) => Box::new(File::open(path).map_err(input_error)?),
    };

    debug!("reading moves from {} ({:?})", source, compression);

    match compression {
        CompressionMode::Plain => Ok(raw),
        CompressionMode::Zstd => ZstdDecoder::new(raw)
            .map(|decoder| Box::new(decoder) as MoveInput)
            .map_err(input_error),
    }
}

/// Whitespace around the whole input is trimmed, then every line is one
/// token. Tokens themselves are passed on untouched, so a blank line in the
/// middle surfaces as a malformed move. Empty input yields no tokens.
pub fn split_moves(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().map(str::to_string).collect()
}

/// Reads everything from `input` before any move is interpreted.
pub fn read_moves<R: Read>(mut input: R, origin: &str) -> Result<Vec<String>, ConvertError> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .map_err(|source| ConvertError::Input {
            origin: origin.to_string(),
            source,
        })?;
    Ok(split_moves(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_compression_mode_zstd_case_insensitive() {
        assert_eq!(CompressionMode::parse("zstd").unwrap(), CompressionMode::Zstd);
        assert_eq!(CompressionMode::parse(" ZSTD ").unwrap(), CompressionMode::Zstd);
    }

    #[test]
    fn test_parse_compression_mode_rejects_unknown() {
        let err = CompressionMode::parse("gzip").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidCompression(v) if v == "gzip"));
    }

    #[test]
    fn test_resolve_detects_zst_extension() {
        let zst = InputSource::File(PathBuf::from("games/moves.txt.zst"));
        let plain = InputSource::File(PathBuf::from("games/moves.txt"));

        assert_eq!(CompressionMode::resolve(None, &zst).unwrap(), CompressionMode::Zstd);
        assert_eq!(CompressionMode::resolve(None, &plain).unwrap(), CompressionMode::Plain);
        assert_eq!(
            CompressionMode::resolve(None, &InputSource::Stdin).unwrap(),
            CompressionMode::Plain
        );
        assert_eq!(
            CompressionMode::resolve(Some("zstd"), &plain).unwrap(),
            CompressionMode::Zstd
        );
    }

    #[test]
    fn test_input_source_dash_is_stdin() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(InputSource::from_arg(Some(Path::new("-"))), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some(Path::new("moves.txt"))),
            InputSource::File(PathBuf::from("moves.txt"))
        );
    }

    #[test]
    fn test_split_moves_trims_whole_input_only() {
        assert_eq!(split_moves("\n f3g5\nd7d6\n\n"), vec!["f3g5", "d7d6"]);
        assert_eq!(split_moves("f3g5\n d7d6"), vec!["f3g5", " d7d6"]);
    }

    #[test]
    fn test_split_moves_handles_crlf() {
        assert_eq!(split_moves("f3g5\r\nd7d6\r\n"), vec!["f3g5", "d7d6"]);
    }

    #[test]
    fn test_split_moves_keeps_inner_blank_lines() {
        assert_eq!(split_moves("f3g5\n\nd7d6"), vec!["f3g5", "", "d7d6"]);
    }

    #[test]
    fn test_split_moves_empty_input() {
        assert!(split_moves("").is_empty());
        assert!(split_moves("  \n\t\n").is_empty());
    }

    #[test]
    fn test_read_moves_from_zstd_stream() {
        let compressed = zstd::stream::encode_all(Cursor::new("f3g5\nd7d6\n"), 0).unwrap();
        let decoder = ZstdDecoder::new(Cursor::new(compressed)).unwrap();

        assert_eq!(read_moves(decoder, "test").unwrap(), vec!["f3g5", "d7d6"]);
    }

    #[test]
    fn test_read_moves_rejects_invalid_utf8() {
        let err = read_moves(Cursor::new(vec![0xff, 0xfe]), "<stdin>").unwrap_err();
        assert!(matches!(err, ConvertError::Input { origin, .. } if origin == "<stdin>"));
    }

    #[test]
    fn test_open_missing_file_names_path() {
        let source = InputSource::File(PathBuf::from("/nonexistent/moves.txt"));
        let err = open_input(&source, CompressionMode::Plain).err().unwrap();
        assert!(err.to_string().contains("/nonexistent/moves.txt"));
    }
}
