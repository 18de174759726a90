//! parchment - PDF stream decoding toolkit.
//!
//! The `codec` module holds the stream filters; `ccitt` decodes the
//! scanned monochrome images stored with `CCITTFaxDecode`.

pub mod codec;
pub mod error;

// Re-export codec modules for backwards compatibility
pub use codec::ccitt;

pub use error::{CcittError, PdfError, Result};
