//! Error types for the parchment PDF toolkit.

use thiserror::Error;

/// Primary error type for PDF stream operations.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("CCITT decode error: {0}")]
    Ccitt(#[from] CcittError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which code table a failed lookup was made against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeTable {
    Mode,
    WhiteRun,
    BlackRun,
}

impl std::fmt::Display for CodeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeTable::Mode => write!(f, "mode"),
            CodeTable::WhiteRun => write!(f, "white run-length"),
            CodeTable::BlackRun => write!(f, "black run-length"),
        }
    }
}

/// Errors raised while decoding CCITT Group 3/Group 4 fax data.
///
/// Bit positions are offsets into the encoded buffer after any fill-order
/// reversal has been applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CcittError {
    #[error("bit window overflow: bit {pos} is past the end of {len} encoded bytes")]
    BitWindowOverflow { pos: usize, len: usize },

    #[error("corrupt data at bit {pos}: no {table} code matches")]
    CorruptData { pos: usize, table: CodeTable },

    #[error("missing terminating code at bit {pos}")]
    MissingTerminatingCode { pos: usize },

    #[error("missing EOL at bit {pos} (row {row})")]
    MissingEol { pos: usize, row: usize },

    #[error("corrupt RTC at bit {pos}: expected 6 EOLs, found {found}")]
    CorruptRtc { pos: usize, found: usize },

    #[error("unsupported mode at bit {pos}: uncompressed/extension mode")]
    UnsupportedMode { pos: usize },

    #[error("read on closed stream")]
    ClosedStream,

    #[error("unsupported K value: {k} (mixed 1-D/2-D Group 3)")]
    UnsupportedEncoding { k: i32 },

    #[error("image width must be positive")]
    InvalidWidth,
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;
