//! Error types for Huffman compression.

use std::path::PathBuf;

use thiserror::Error;

use crate::Symbol;

/// Error variants for compression and decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// A symbol of the stream being encoded has no codeword.
    ///
    /// The code table and the stream were built from different data.
    #[error("no codeword for symbol {0:?}")]
    MissingCodeword(Symbol),

    /// The trailer byte of a bit stream does not describe its last data byte.
    #[error("invalid bit stream trailer: {0}")]
    InvalidTrailer(u8),

    /// A bit was requested from an exhausted bit source.
    #[error("unexpected end of bit stream")]
    UnexpectedEndOfBits,

    /// A path does not follow the `X.txt` / `X_compressed.txt` naming.
    #[error("unexpected file name: {}", .0.display())]
    UnexpectedFileName(PathBuf),

    /// An I/O error occurred during encoding or decoding.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
