//! Sequential access to a finished decode.
//!
//! Decoding runs to completion before the first byte is handed out; the
//! stream only walks the packed buffer and then reports how decoding ended.

use std::io;

use super::decoder::Decoded;
use crate::error::CcittError;

/// Outcome of [`FaxStream::pull`].
#[derive(Debug, PartialEq, Eq)]
pub enum Pull<'a> {
    Bytes(&'a [u8]),
    EndOfStream,
}

/// Packed 1-bit image rows produced by a decode, read front to back.
///
/// Rows decoded before an error stay readable; the error is returned once
/// they are drained, after which the stream is closed.
#[derive(Debug)]
pub struct FaxStream {
    data: Vec<u8>,
    stride: usize,
    offset: usize,
    pending: Option<CcittError>,
    failure: Option<CcittError>,
    closed: bool,
}

impl FaxStream {
    pub(crate) fn from_decoded(decoded: Decoded) -> Self {
        let stride = decoded.plane.stride();
        FaxStream {
            data: decoded.plane.into_bytes(),
            stride,
            offset: 0,
            pending: decoded.error.clone(),
            failure: decoded.error,
            closed: false,
        }
    }

    /// Returns up to `max` of the next bytes.
    ///
    /// Once the buffer is drained, a decode error is returned exactly once
    /// and every later pull fails with [`CcittError::ClosedStream`];
    /// otherwise pulls report [`Pull::EndOfStream`].
    pub fn pull(&mut self, max: usize) -> Result<Pull<'_>, CcittError> {
        if self.closed {
            return Err(CcittError::ClosedStream);
        }

        if self.offset < self.data.len() {
            let start = self.offset;
            let end = start.saturating_add(max).min(self.data.len());
            self.offset = end;
            return Ok(Pull::Bytes(&self.data[start..end]));
        }

        if let Some(err) = self.pending.take() {
            self.closed = true;
            return Err(err);
        }

        Ok(Pull::EndOfStream)
    }

    /// Ends the stream; further pulls fail.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The error that ended decoding early, if any.
    pub fn error(&self) -> Option<&CcittError> {
        self.failure.as_ref()
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row_count(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.data.len() / self.stride
        }
    }

    /// All decoded rows, regardless of how much has been pulled.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks(self.stride.max(1))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The whole buffer, or the decode error if there was one.
    pub fn into_result(self) -> Result<Vec<u8>, CcittError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }
}

impl io::Read for FaxStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.pull(buf.len()) {
            Ok(Pull::Bytes(chunk)) => {
                buf[..chunk.len()].copy_from_slice(chunk);
                Ok(chunk.len())
            }
            Ok(Pull::EndOfStream) => Ok(0),
            Err(err) => Err(io::Error::other(err)),
        }
    }
}
