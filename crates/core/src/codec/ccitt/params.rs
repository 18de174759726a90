//! Decode parameters, mirroring the PDF `CCITTFaxDecode` DecodeParms.

use crate::error::CcittError;

/// PDF default for `Columns`.
pub const DEFAULT_COLUMNS: usize = 1728;

/// The coding scheme of the encoded data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EncodingMode {
    /// Modified Huffman, one-dimensional (T.4). PDF `K = 0`, the default.
    #[default]
    Group3,
    /// Modified modified READ, two-dimensional (T.6). PDF `K < 0`.
    Group4,
}

impl EncodingMode {
    /// Maps the PDF `K` entry to an encoding mode.
    ///
    /// Mixed 1-D/2-D Group 3 data (`K > 0`) is not supported.
    pub fn from_k(k: i32) -> Result<Self, CcittError> {
        match k {
            k if k < 0 => Ok(EncodingMode::Group4),
            0 => Ok(EncodingMode::Group3),
            k => Err(CcittError::UnsupportedEncoding { k }),
        }
    }
}

/// CCITT decoding parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CcittParams {
    pub mode: EncodingMode,
    /// Pixels per row.
    pub columns: usize,
    /// Stop after this many rows. `None` decodes until EOFB or RTC.
    pub rows: Option<usize>,
    /// Invert the output so that a set bit is black.
    pub black_is_1: bool,
    /// Each encoded row starts on a byte boundary.
    pub encoded_byte_align: bool,
    /// Encoded bytes are stored least significant bit first.
    pub lsb_to_msb: bool,
}

impl Default for CcittParams {
    fn default() -> Self {
        CcittParams {
            mode: EncodingMode::Group3,
            columns: DEFAULT_COLUMNS,
            rows: None,
            black_is_1: false,
            encoded_byte_align: false,
            lsb_to_msb: false,
        }
    }
}

impl CcittParams {
    pub fn new(mode: EncodingMode, columns: usize) -> Self {
        CcittParams {
            mode,
            columns,
            ..Default::default()
        }
    }

    /// Builds parameters from the PDF `K` and `Columns` entries.
    pub fn from_k(k: i32, columns: usize) -> Result<Self, CcittError> {
        Ok(Self::new(EncodingMode::from_k(k)?, columns))
    }

    pub fn with_rows(mut self, rows: Option<usize>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_black_is_1(mut self, black_is_1: bool) -> Self {
        self.black_is_1 = black_is_1;
        self
    }

    pub fn with_byte_align(mut self, encoded_byte_align: bool) -> Self {
        self.encoded_byte_align = encoded_byte_align;
        self
    }

    pub fn with_lsb_to_msb(mut self, lsb_to_msb: bool) -> Self {
        self.lsb_to_msb = lsb_to_msb;
        self
    }

    pub fn validate(&self) -> Result<(), CcittError> {
        if self.columns == 0 {
            return Err(CcittError::InvalidWidth);
        }
        Ok(())
    }
}
