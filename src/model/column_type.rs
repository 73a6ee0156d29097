//! Column type codes and their wire sizes.
//!
//! Each column of a message format is typed by a single ASCII character.
//! The set of valid codes is closed; it is the same set ArduPilot uses in
//! its on-board logs, so streams produced here remain readable by standard
//! ground-station tooling.

/// Type code of a single log column.
///
/// The wire representation of every scalar type is little-endian. Fixed
/// point types store a scaled integer; the multiplier is a decoding-side
/// convention and does not affect encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// `b` - signed 8-bit integer.
    Int8,
    /// `B` - unsigned 8-bit integer.
    UInt8,
    /// `M` - flight mode, stored as an unsigned 8-bit integer.
    FlightMode,
    /// `h` - signed 16-bit integer.
    Int16,
    /// `H` - unsigned 16-bit integer.
    UInt16,
    /// `c` - fixed-point value as signed 16-bit integer, multiplier 0.01.
    Fixed16,
    /// `C` - fixed-point value as unsigned 16-bit integer, multiplier 0.01.
    UFixed16,
    /// `i` - signed 32-bit integer.
    Int32,
    /// `I` - unsigned 32-bit integer.
    UInt32,
    /// `e` - fixed-point value as signed 32-bit integer, multiplier 0.01.
    Fixed32,
    /// `E` - fixed-point value as unsigned 32-bit integer, multiplier 0.01.
    UFixed32,
    /// `L` - geodetic coordinate as signed 32-bit integer, multiplier 1e-7.
    Coordinate,
    /// `q` - signed 64-bit integer.
    Int64,
    /// `Q` - unsigned 64-bit integer.
    UInt64,
    /// `f` - IEEE 754 single-precision float.
    Float,
    /// `d` - IEEE 754 double-precision float.
    Double,
    /// `n` - zero-padded ASCII string, at most 4 bytes.
    String4,
    /// `N` - zero-padded ASCII string, at most 16 bytes.
    String16,
    /// `Z` - zero-padded ASCII string, at most 64 bytes.
    String64,
    /// `a` - array of 32 signed 16-bit integers. Reserved; encoding is not
    /// implemented.
    Int16Array,
}

impl ColumnType {
    /// Look up a type by its single-character code.
    ///
    /// Returns `None` for codes outside the closed set; callers turn that
    /// into an invalid-value error.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'b' => Some(ColumnType::Int8),
            'B' => Some(ColumnType::UInt8),
            'M' => Some(ColumnType::FlightMode),
            'h' => Some(ColumnType::Int16),
            'H' => Some(ColumnType::UInt16),
            'c' => Some(ColumnType::Fixed16),
            'C' => Some(ColumnType::UFixed16),
            'i' => Some(ColumnType::Int32),
            'I' => Some(ColumnType::UInt32),
            'e' => Some(ColumnType::Fixed32),
            'E' => Some(ColumnType::UFixed32),
            'L' => Some(ColumnType::Coordinate),
            'q' => Some(ColumnType::Int64),
            'Q' => Some(ColumnType::UInt64),
            'f' => Some(ColumnType::Float),
            'd' => Some(ColumnType::Double),
            'n' => Some(ColumnType::String4),
            'N' => Some(ColumnType::String16),
            'Z' => Some(ColumnType::String64),
            'a' => Some(ColumnType::Int16Array),
            _ => None,
        }
    }

    /// The single-character code of this type.
    #[inline]
    pub fn code(self) -> char {
        match self {
            ColumnType::Int8 => 'b',
            ColumnType::UInt8 => 'B',
            ColumnType::FlightMode => 'M',
            ColumnType::Int16 => 'h',
            ColumnType::UInt16 => 'H',
            ColumnType::Fixed16 => 'c',
            ColumnType::UFixed16 => 'C',
            ColumnType::Int32 => 'i',
            ColumnType::UInt32 => 'I',
            ColumnType::Fixed32 => 'e',
            ColumnType::UFixed32 => 'E',
            ColumnType::Coordinate => 'L',
            ColumnType::Int64 => 'q',
            ColumnType::UInt64 => 'Q',
            ColumnType::Float => 'f',
            ColumnType::Double => 'd',
            ColumnType::String4 => 'n',
            ColumnType::String16 => 'N',
            ColumnType::String64 => 'Z',
            ColumnType::Int16Array => 'a',
        }
    }

    /// Encoded width of one value of this type, in bytes.
    #[inline]
    pub fn wire_size(self) -> usize {
        match self {
            ColumnType::Int8 | ColumnType::UInt8 | ColumnType::FlightMode => 1,
            ColumnType::Int16
            | ColumnType::UInt16
            | ColumnType::Fixed16
            | ColumnType::UFixed16 => 2,
            ColumnType::Int32
            | ColumnType::UInt32
            | ColumnType::Fixed32
            | ColumnType::UFixed32
            | ColumnType::Coordinate
            | ColumnType::Float
            | ColumnType::String4 => 4,
            ColumnType::Int64 | ColumnType::UInt64 | ColumnType::Double => 8,
            ColumnType::String16 => 16,
            ColumnType::String64 | ColumnType::Int16Array => 64,
        }
    }
}
