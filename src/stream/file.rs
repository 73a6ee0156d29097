//! File-backed streams.
//!
//! Generic over the std I/O traits so that anything file-like works: a
//! `File`, a `BufWriter<File>`, a `Cursor` in tests.

use std::io;

use crate::error::{Result, SdlogError};

use super::{InputStream, OutputStream};

/// Output stream over a [`std::io::Write`] sink, typically a file.
///
/// Write and flush errors are reported as [`SdlogError::Write`]. The sink
/// is not flushed implicitly; the writer flushes when its session ends.
#[derive(Debug)]
pub struct FileStream<W> {
    inner: W,
}

impl<W: io::Write> FileStream<W> {
    /// Create an output stream over `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consume the stream and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> OutputStream for FileStream<W> {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        match self.inner.write(data) {
            Ok(written) => Ok(written),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(0),
            Err(e) => Err(SdlogError::Write(e)),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(SdlogError::Write)
    }
}

/// Input stream over a [`std::io::Read`] source, typically a file.
///
/// End of file is latched: a read that still delivers bytes succeeds even
/// if it drained the source; only the next read, delivering nothing,
/// reports [`SdlogError::Eof`].
#[derive(Debug)]
pub struct FileSource<R> {
    inner: R,
}

impl<R: io::Read> FileSource<R> {
    /// Create an input stream over `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Consume the stream and return the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> InputStream for FileSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        match self.inner.read(buf) {
            Ok(0) => Err(SdlogError::Eof),
            Ok(read) => Ok(read),
            Err(e)
                if e.kind() == io::ErrorKind::Interrupted
                    || e.kind() == io::ErrorKind::WouldBlock =>
            {
                Ok(0)
            }
            Err(e) => Err(SdlogError::Read(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_file_stream_writes_through() {
        let mut stream = FileStream::new(Vec::new());
        stream.write_all(b"12345678901234567890").unwrap();
        stream.flush().unwrap();
        assert_eq!(stream.into_inner(), b"12345678901234567890");
    }

    #[test]
    fn test_file_source_reads_and_latches_eof() {
        let mut source = FileSource::new(Cursor::new(b"abcdef".to_vec()));
        let mut buf = [0u8; 4];

        // First read fills the buffer.
        assert_eq!(source.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");

        // Second read drains the source but still succeeds.
        assert_eq!(source.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");

        // Only now does the source report end of file.
        assert!(matches!(source.read(&mut buf), Err(SdlogError::Eof)));
    }

    #[test]
    fn test_file_source_zero_length_read_is_ok() {
        let mut source = FileSource::new(Cursor::new(b"x".to_vec()));
        assert_eq!(source.read(&mut []).unwrap(), 0);
    }

    /// Writer that errors once the backing array is full, like a fixed-size
    /// memory-backed file.
    struct FixedSink {
        data: [u8; 32],
        len: usize,
    }

    impl io::Write for FixedSink {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            let room = self.data.len() - self.len;
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "sink full"));
            }
            let n = data.len().min(room);
            self.data[self.len..self.len + n].copy_from_slice(&data[..n]);
            self.len += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_file_stream_write_error_surfaces_as_write() {
        let mut stream = FileStream::new(FixedSink {
            data: [0; 32],
            len: 0,
        });
        stream.write_all(b"12345678901234567890").unwrap();
        stream.write_all(b"123456789012").unwrap();

        let err = stream.write_all(b"overflow").unwrap_err();
        assert!(matches!(err, SdlogError::Write(_)));
    }
}
