//! In-memory buffer streams.

use bytes::{Buf, Bytes, BytesMut};

use crate::error::{Result, SdlogError};

use super::{InputStream, OutputStream};

/// Initial capacity of a [`BufferStream`], in bytes.
const INITIAL_CAPACITY: usize = 16;

/// Output stream that appends to a growing in-memory buffer.
///
/// The buffer starts at 16 bytes and doubles whenever a write does not
/// fit. Contents are exposed read-only via [`data`](BufferStream::data);
/// the accumulated bytes can be taken out with
/// [`into_bytes`](BufferStream::into_bytes).
#[derive(Debug)]
pub struct BufferStream {
    data: BytesMut,
}

impl BufferStream {
    /// Create an empty buffer stream.
    pub fn new() -> Self {
        Self {
            data: BytesMut::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// The bytes written so far.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the stream and return the accumulated bytes.
    pub fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }
}

impl Default for BufferStream {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputStream for BufferStream {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let required = self.data.len() + data.len();
        if required > self.data.capacity() {
            // Double until the write fits, then reserve the exact delta.
            let mut capacity = self.data.capacity().max(1);
            while capacity < required {
                capacity *= 2;
            }
            self.data.reserve(capacity - self.data.len());
        }

        self.data.extend_from_slice(data);
        Ok(data.len())
    }
}

/// Input stream that reads from an in-memory byte sequence.
#[derive(Debug)]
pub struct BufferSource {
    data: Bytes,
}

impl BufferSource {
    /// Create an input stream over `data`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Number of bytes not yet read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len()
    }
}

impl InputStream for BufferSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.data.is_empty() {
            return Err(SdlogError::Eof);
        }

        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data.advance(n);
        Ok(n)
    }
}
