use thiserror::Error;

/// Configuration errors raised by the spinner.
///
/// Output failures never show up here: a frame that cannot be written is
/// dropped and the animation carries on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpinnerError {
    #[error("character set must contain at least one glyph")]
    EmptyCharacterSet,

    #[error("unknown color or attribute: {0}")]
    InvalidColor(String),

    #[error("no built-in character set with index {0}")]
    UnknownCharSet(usize),
}

pub type Result<T> = std::result::Result<T, SpinnerError>;
