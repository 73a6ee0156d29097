//! Stream module - byte sinks and sources for log writers and readers.
//!
//! Streams are deliberately narrow: an output stream is a session-scoped
//! byte sink that may underwrite, an input stream is a byte source that may
//! deliver fewer bytes than asked for. Three implementations are provided
//! for each side:
//! - file-backed ([`FileStream`] / [`FileSource`])
//! - growing in-memory buffer ([`BufferStream`] / [`BufferSource`])
//! - null ([`NullStream`] / [`NullSource`])

mod buffer;
mod file;
mod null;

pub use buffer::{BufferSource, BufferStream};
pub use file::{FileSource, FileStream};
pub use null::{NullSource, NullStream};

use crate::error::{Result, SdlogError};

/// A byte sink that log records are written to.
///
/// Sessions bracket the data: a writer calls [`begin_session`] before the
/// first byte and [`end_session`] after the last one, which lets stream
/// implementations emit per-session framing or release per-session
/// resources. All three hooks default to no-ops.
///
/// [`begin_session`]: OutputStream::begin_session
/// [`end_session`]: OutputStream::end_session
pub trait OutputStream {
    /// Notifies the stream that it will start receiving data.
    fn begin_session(&mut self) -> Result<()> {
        Ok(())
    }

    /// Write some bytes, returning how many were consumed.
    ///
    /// Partial writes are legal; callers that need the full count use
    /// [`write_all`](OutputStream::write_all).
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Flush pending bytes if the stream is buffered.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Notifies the stream that the current writing session has ended.
    fn end_session(&mut self) -> Result<()> {
        Ok(())
    }

    /// Write all of `data`, retrying partial writes until the byte count
    /// is satisfied. This is the only loop in the crate that may block.
    fn write_all(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let written = self.write(data)?;
            if written > data.len() {
                return Err(SdlogError::Write(std::io::Error::other(
                    "stream reported more bytes written than supplied",
                )));
            }
            data = &data[written..];
        }
        Ok(())
    }
}

/// A byte source that logs are read back from.
pub trait InputStream {
    /// Read up to `buf.len()` bytes into `buf`, returning how many were
    /// delivered.
    ///
    /// `Ok(0)` is legal for a source that has no bytes available right
    /// now; exhaustion is reported as [`SdlogError::Eof`] by the read that
    /// delivers no bytes at the end of the stream, never by one that still
    /// delivers data.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
}
