//! CCITT fax decoder for the `CCITTFaxDecode` filter.
//!
//! Decodes Group 3 one-dimensional (modified Huffman) and Group 4
//! (modified READ) data into packed 1-bit rows, `ceil(columns / 8)` bytes
//! each. Mixed 1-D/2-D Group 3, uncompressed mode and encoding are not
//! supported.

pub mod bitwindow;
pub mod decoder;
pub mod params;
pub mod plane;
pub mod stream;
pub mod tables;

use std::borrow::Cow;
use std::io::Read;

use crate::error::{CcittError, Result};

pub use decoder::{Decoded, Decoder, ScanState};
pub use params::{CcittParams, DEFAULT_COLUMNS, EncodingMode};
pub use plane::PixelPlane;
pub use stream::{FaxStream, Pull};

/// Decodes `data` in full and returns the rows as a stream.
///
/// Only invalid parameters fail here. Errors in the data itself are
/// reported by the stream once the rows decoded before them are read.
pub fn decode(data: &[u8], params: &CcittParams) -> std::result::Result<FaxStream, CcittError> {
    params.validate()?;

    let data: Cow<'_, [u8]> = if params.lsb_to_msb {
        Cow::Owned(data.iter().map(|b| b.reverse_bits()).collect())
    } else {
        Cow::Borrowed(data)
    };

    let decoded = Decoder::new(&data, params).run();
    Ok(FaxStream::from_decoded(decoded))
}

/// Reads `reader` to the end and decodes it.
pub fn decode_reader<R: Read>(mut reader: R, params: &CcittParams) -> Result<FaxStream> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(decode(&data, params)?)
}

/// Decode CCITT fax data, failing on the first error.
pub fn ccittfaxdecode(data: &[u8], params: &CcittParams) -> Result<Vec<u8>> {
    Ok(decode(data, params)?.into_result()?)
}
