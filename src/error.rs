use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackError {
    #[error("nothing to pack: the source is empty or whitespace-only")]
    EmptyInput,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("not packed code")]
    NotPacked,
    #[error("could not parse packed parameters")]
    Unparsable,
    #[error("radix {radix:?} cannot encode {count:?} symbols")]
    InvalidRadix { radix: usize, count: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnpackError {
    #[error("invalid packed code: {0}")]
    Format(#[from] FormatError),
}
