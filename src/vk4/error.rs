use thiserror::Error;

#[derive(Error, Debug)]
pub enum Vk4Error {
    #[error("input ended before a fixed-layout section was complete")]
    Truncated,

    #[error("seek failed: {0}")]
    Seek(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid block selector: '{0}'")]
    InvalidSelector(String),

    #[error("unknown color channel: '{0}' ('red', 'green' or 'blue' only)")]
    UnknownChannel(String),

    #[error("no decoded data for block '{0}'")]
    UnknownBlock(String),
}

pub type Result<T> = std::result::Result<T, Vk4Error>;
