//! Null streams - a sink that discards and a source that is always empty.
//!
//! Useful for measuring encoding cost without I/O, and as a placeholder
//! sink in tests.

use crate::error::{Result, SdlogError};

use super::{InputStream, OutputStream};

/// Output stream that discards everything and always succeeds.
#[derive(Debug, Default)]
pub struct NullStream;

impl OutputStream for NullStream {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        Ok(data.len())
    }
}

/// Input stream that is exhausted from the start.
#[derive(Debug, Default)]
pub struct NullSource;

impl InputStream for NullSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        Err(SdlogError::Eof)
    }
}
