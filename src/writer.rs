//! Log writer - session lifecycle and lazy format announcement.
//!
//! The writer keeps the stream self-describing: before the first record of
//! any message format reaches the stream, the writer emits an FMT record
//! declaring that format's column layout. Announcements are tracked per
//! message id by format identity, so rebuilding a format for an id already
//! in use re-announces it and redefines the id mid-stream.
//!
//! # Example
//!
//! ```
//! use sdlog::{BufferStream, LogWriter, MessageFormat, Value};
//!
//! # fn main() -> sdlog::Result<()> {
//! let mut format = MessageFormat::new(1, "GPS")?;
//! format.add_columns("lat,lng", "LL", "dd")?;
//!
//! let mut stream = BufferStream::new();
//! let mut writer = LogWriter::new(&mut stream)?;
//! writer.write(&format, &[Value::Int(473_977_300), Value::Int(190_405_010)])?;
//! writer.end()?;
//! drop(writer);
//!
//! // FMT record (89 bytes) followed by the GPS record (11 bytes).
//! assert_eq!(stream.len(), 100);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SdlogError};
use crate::model::MessageFormat;
use crate::protocol::{encode_record, Value, MAX_RECORD_LENGTH, NUM_MESSAGE_IDS, RECORD_HEADER_SIZE};
use crate::stream::OutputStream;

/// Session-scoped log writer over an output stream.
///
/// The writer borrows its stream for the duration of the session and owns
/// a scratch buffer where records are assembled before being written out.
/// Dropping the writer performs a best-effort [`end`](LogWriter::end);
/// call `end` explicitly to observe its errors.
pub struct LogWriter<'a, S: OutputStream + ?Sized> {
    stream: &'a mut S,

    /// Whether a session has been started on the stream.
    has_session: bool,

    /// Private instance of the FMT meta-format that announcement records
    /// are encoded against.
    fmt_meta: MessageFormat,

    /// Identity tokens of the last format announced per message id, or
    /// `None` if the id has not been used yet.
    announced: [Option<u64>; NUM_MESSAGE_IDS],

    /// Scratch buffer where the current record is assembled.
    buf: Box<[u8]>,
}

impl<'a, S: OutputStream + ?Sized> LogWriter<'a, S> {
    /// Create a writer over `stream`.
    ///
    /// No bytes are written and no session is started until the first
    /// [`write`](LogWriter::write).
    pub fn new(stream: &'a mut S) -> Result<Self> {
        Ok(Self {
            stream,
            has_session: false,
            fmt_meta: MessageFormat::fmt_meta()?,
            announced: [None; NUM_MESSAGE_IDS],
            buf: vec![0u8; MAX_RECORD_LENGTH].into_boxed_slice(),
        })
    }

    /// Whether a session is currently open on the stream.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.has_session
    }

    /// Encode `values` against `format` and write the record.
    ///
    /// Starts the stream session if this is the first write, and emits an
    /// FMT record first if `format` has not been announced yet (or if the
    /// id was last announced for a different format instance).
    ///
    /// On error the record is aborted but the session stays open; the
    /// caller decides whether to [`end`](LogWriter::end) or abandon the
    /// stream.
    pub fn write(&mut self, format: &MessageFormat, values: &[Value<'_>]) -> Result<()> {
        self.ensure_session()?;
        self.announce(format)?;

        let length = encode_record(format, &mut self.buf, values)?;
        self.stream.write_all(&self.buf[..length])
    }

    /// Write an already encoded record of `format`.
    ///
    /// Session and announcement logic are the same as for
    /// [`write`](LogWriter::write); the record bytes are passed through
    /// verbatim. Exactly the canonical record length
    /// (`format.wire_size() + 3` bytes, header included) is consumed from
    /// the front of `record`; a shorter slice is an error.
    pub fn write_encoded(&mut self, format: &MessageFormat, record: &[u8]) -> Result<()> {
        let length = RECORD_HEADER_SIZE + usize::from(format.wire_size());
        let record = record.get(..length).ok_or_else(|| {
            SdlogError::invalid_value(format!(
                "encoded record of format {:?} must be at least {length} bytes",
                format.name()
            ))
        })?;

        self.ensure_session()?;
        self.announce(format)?;
        self.stream.write_all(record)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.stream.flush()
    }

    /// End the current session: flush, then close the session on the
    /// stream. A no-op when no session is open, so calling it twice
    /// yields the same stream as calling it once.
    pub fn end(&mut self) -> Result<()> {
        if self.has_session {
            self.flush()?;
            self.stream.end_session()?;
            self.has_session = false;
        }
        Ok(())
    }

    fn ensure_session(&mut self) -> Result<()> {
        if !self.has_session {
            self.stream.begin_session()?;
            self.has_session = true;
        }
        Ok(())
    }

    /// Emit an FMT record for `format` unless this exact instance is the
    /// one last announced for its id.
    fn announce(&mut self, format: &MessageFormat) -> Result<()> {
        let slot = usize::from(format.id());
        if self.announced[slot] != Some(format.token()) {
            self.write_format(format)?;
            self.announced[slot] = Some(format.token());
        }
        Ok(())
    }

    /// Encode and write the FMT record describing `format`.
    ///
    /// The Length column carries the total size of one future record of
    /// the announced format, including its 3-byte header.
    fn write_format(&mut self, format: &MessageFormat) -> Result<()> {
        let format_string = format.format_string();
        let column_names = format.column_names(",");

        let values = [
            Value::Uint(u64::from(format.id())),
            Value::Uint(u64::from(format.wire_size()) + RECORD_HEADER_SIZE as u64),
            Value::Str(format.name()),
            Value::Str(&format_string),
            Value::Str(&column_names),
        ];

        let length = encode_record(&self.fmt_meta, &mut self.buf, &values)?;
        self.stream.write_all(&self.buf[..length])
    }
}

impl<S: OutputStream + ?Sized> Drop for LogWriter<'_, S> {
    fn drop(&mut self) {
        let _ = self.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{FMT_MESSAGE_ID, FMT_RECORD_LENGTH, SYNC_BYTES};
    use crate::stream::{BufferStream, NullStream};

    fn int_format() -> MessageFormat {
        let mut format = MessageFormat::new(1, "INT").unwrap();
        format.add_columns("a,b", "bB", "--").unwrap();
        format
    }

    #[test]
    fn test_writer_over_null_stream() {
        let mut stream = NullStream;
        let mut writer = LogWriter::new(&mut stream).unwrap();
        writer
            .write(&int_format(), &[Value::Int(1), Value::Uint(2)])
            .unwrap();
        writer.end().unwrap();
    }

    #[test]
    fn test_format_announced_once() {
        let format = int_format();
        let mut stream = BufferStream::new();
        let mut writer = LogWriter::new(&mut stream).unwrap();

        writer.write(&format, &[Value::Int(1), Value::Uint(2)]).unwrap();
        writer.write(&format, &[Value::Int(3), Value::Uint(4)]).unwrap();
        writer.end().unwrap();
        drop(writer);

        // One FMT record, two 5-byte data records.
        assert_eq!(stream.len(), FMT_RECORD_LENGTH + 2 * 5);
        assert_eq!(&stream.data()[..2], &SYNC_BYTES);
        assert_eq!(stream.data()[2], FMT_MESSAGE_ID);
        assert_eq!(&stream.data()[FMT_RECORD_LENGTH..FMT_RECORD_LENGTH + 3], &[0xA3, 0x95, 0x01]);
    }

    #[test]
    fn test_rebuilt_format_reannounced() {
        let mut stream = BufferStream::new();
        let mut writer = LogWriter::new(&mut stream).unwrap();

        let first = int_format();
        writer.write(&first, &[Value::Int(1), Value::Uint(2)]).unwrap();

        // A fresh instance with the same id counts as a redefinition.
        let second = int_format();
        writer.write(&second, &[Value::Int(3), Value::Uint(4)]).unwrap();
        writer.end().unwrap();
        drop(writer);

        assert_eq!(stream.len(), 2 * (FMT_RECORD_LENGTH + 5));
    }

    #[test]
    fn test_fmt_length_column_includes_header() {
        let mut format = MessageFormat::new(2, "POS").unwrap();
        format.add_columns("lat,lng,alt", "LLf", "ddm").unwrap();

        let mut stream = BufferStream::new();
        let mut writer = LogWriter::new(&mut stream).unwrap();
        writer
            .write(
                &format,
                &[Value::Int(0), Value::Int(0), Value::F32(0.0)],
            )
            .unwrap();
        writer.end().unwrap();
        drop(writer);

        // FMT payload: Type, then Length = 12-byte payload + 3-byte header.
        assert_eq!(stream.data()[3], 2);
        assert_eq!(stream.data()[4], 15);
    }

    #[test]
    fn test_end_is_idempotent() {
        let format = int_format();
        let mut stream = BufferStream::new();
        let mut writer = LogWriter::new(&mut stream).unwrap();

        writer.write(&format, &[Value::Int(1), Value::Uint(2)]).unwrap();
        writer.end().unwrap();
        assert!(!writer.is_active());
        writer.end().unwrap();
        drop(writer);

        assert_eq!(stream.len(), FMT_RECORD_LENGTH + 5);
    }

    #[test]
    fn test_failed_record_leaves_session_open() {
        let format = int_format();
        let mut stream = BufferStream::new();
        let mut writer = LogWriter::new(&mut stream).unwrap();

        writer.write(&format, &[Value::Int(1), Value::Uint(2)]).unwrap();
        let err = writer.write(&format, &[Value::Int(1)]).unwrap_err();
        assert!(matches!(err, SdlogError::InvalidValue(_)));
        assert!(writer.is_active());

        // The writer is still usable after the failed write.
        writer.write(&format, &[Value::Int(3), Value::Uint(4)]).unwrap();
        writer.end().unwrap();
    }

    #[test]
    fn test_write_encoded_requires_canonical_length() {
        let format = int_format();
        let mut stream = BufferStream::new();
        let mut writer = LogWriter::new(&mut stream).unwrap();

        let err = writer.write_encoded(&format, &[0xA3, 0x95]).unwrap_err();
        assert!(matches!(err, SdlogError::InvalidValue(_)));

        // Nothing was announced or written for the failed record.
        assert!(!writer.is_active());
        drop(writer);
        assert!(stream.is_empty());
    }
}
