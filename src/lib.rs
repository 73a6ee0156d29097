//! # sdlog
//!
//! Writer for the ArduPilot "self-describing log" format: a compact binary
//! record stream in which every record is prefixed by a one-byte message
//! id, and the stream itself carries FMT records defining the column
//! layout of every id it uses. A consumer can therefore decode the log
//! with no out-of-band schema.
//!
//! ## Architecture
//!
//! - **Model** ([`model`]): column types, columns, and [`MessageFormat`] -
//!   the per-id column layout, built once by the caller.
//! - **Protocol** ([`protocol`]): the wire format (`A3 95 <id> <payload>`)
//!   and the typed record encoder.
//! - **Writer** ([`writer`]): session lifecycle and lazy FMT announcement,
//!   keeping the stream self-describing.
//! - **Streams** ([`stream`]): byte sinks and sources over files, growing
//!   buffers, or nothing at all.
//!
//! ## Example
//!
//! ```no_run
//! use sdlog::{FileStream, LogWriter, MessageFormat, Value};
//!
//! fn main() -> sdlog::Result<()> {
//!     let mut attitude = MessageFormat::new(10, "ATT")?;
//!     attitude.add_columns("roll,pitch,yaw", "fff", "rrr")?;
//!
//!     let file = std::fs::File::create("flight.bin")?;
//!     let mut stream = FileStream::new(file);
//!     let mut writer = LogWriter::new(&mut stream)?;
//!
//!     writer.write(
//!         &attitude,
//!         &[0.01f32.into(), (-0.02f32).into(), 1.57f32.into()],
//!     )?;
//!     writer.end()?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod model;
pub mod protocol;
pub mod stream;
pub mod writer;

pub use error::{error_to_string, Result, SdlogError};
pub use model::{ColumnFormat, ColumnType, MessageFormat};
pub use protocol::{encode_record, Value, FMT_MESSAGE_ID, MAX_RECORD_LENGTH, RECORD_HEADER_SIZE};
pub use stream::{
    BufferSource, BufferStream, FileSource, FileStream, InputStream, NullSource, NullStream,
    OutputStream,
};
pub use writer::LogWriter;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
