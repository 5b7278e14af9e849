use thiserror::Error;

use crate::vk4::Vk4Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error(transparent)]
    Decode(#[from] Vk4Error),

    #[error("invalid layer string '{0}': use combinations of R, G, B with an optional L, or H or L alone")]
    InvalidLayer(String),

    #[error("{layer} data can only be written as tiff, not {requested}")]
    UnsupportedOutput {
        layer: &'static str,
        requested: &'static str,
    },

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
