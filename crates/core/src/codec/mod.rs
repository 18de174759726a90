//! Codec modules for PDF stream decompression.
//!
//! This module contains:
//! - `ccitt`: CCITT Group 3/Group 4 fax decompression

pub mod ccitt;

// Re-export main functions for convenience
pub use ccitt::{CcittParams, EncodingMode, FaxStream, ccittfaxdecode};
