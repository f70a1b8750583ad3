use std::io::Error as IoError;

use thiserror::Error;

/// `Result<_, ParseError>`
pub type ParseResult<T> = Result<T, ParseError>;

/// Anything that could go wrong while parsing a [`Beatmap`](crate::Beatmap).
///
/// Malformed lines are not considered an error, they are skipped instead.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Some IO operation failed.
    #[error("IO error")]
    Io(#[from] IoError),
    /// A section that is required for calculations was not found.
    #[error("missing required section `[{0}]`")]
    MissingSection(&'static str),
}
