//! Wire format constants and record header encoding.
//!
//! Every record in the stream is framed as:
//! ```text
//! ┌──────┬──────┬─────────┬─────────────────────────┐
//! │ 0xA3 │ 0x95 │ msg id  │ payload                 │
//! │ sync │ sync │ 1 byte  │ sum of column sizes     │
//! └──────┴──────┴─────────┴─────────────────────────┘
//! ```
//! All multi-byte scalars in the payload are little-endian; the sync bytes
//! are the little-endian encoding of `0x95A3`.

/// The two sync bytes that begin every record.
pub const SYNC_BYTES: [u8; 2] = [0xA3, 0x95];

/// Record header size in bytes (sync bytes plus message id).
pub const RECORD_HEADER_SIZE: usize = 3;

/// Maximum total size of one encoded record, header included.
pub const MAX_RECORD_LENGTH: usize = 256;

/// Number of distinct message ids addressable by the one-byte id field.
pub const NUM_MESSAGE_IDS: usize = 256;

/// Reserved message id of FMT records, which carry format definitions.
pub const FMT_MESSAGE_ID: u8 = 128;

/// Total size of one FMT record: header plus Type(1), Length(1), Name(4),
/// Format(16) and Columns(64).
pub const FMT_RECORD_LENGTH: usize = RECORD_HEADER_SIZE + 86;

/// Encode the 3-byte record header for `msg_id` into `buf`.
///
/// # Panics
///
/// Panics if `buf` is shorter than [`RECORD_HEADER_SIZE`].
#[inline]
pub fn encode_record_header(buf: &mut [u8], msg_id: u8) {
    debug_assert!(buf.len() >= RECORD_HEADER_SIZE);
    buf[0] = SYNC_BYTES[0];
    buf[1] = SYNC_BYTES[1];
    buf[2] = msg_id;
}
