//! Protocol module - wire format constants and record encoding.
//!
//! This module implements the binary record format of the log stream:
//! - sync header and record framing constants
//! - typed value encoding of one record against a message format

mod encoder;
mod wire_format;

pub use encoder::{encode_record, Value};
pub use wire_format::{
    encode_record_header, FMT_MESSAGE_ID, FMT_RECORD_LENGTH, MAX_RECORD_LENGTH, NUM_MESSAGE_IDS,
    RECORD_HEADER_SIZE, SYNC_BYTES,
};
