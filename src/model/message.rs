//! Message formats - the per-id column layout of a log stream.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SdlogError};
use crate::protocol::{FMT_MESSAGE_ID, MAX_RECORD_LENGTH, RECORD_HEADER_SIZE};

use super::column::NO_UNIT;
use super::ColumnFormat;

/// Maximum length of a message format name, in bytes.
pub const MAX_MESSAGE_NAME_LENGTH: usize = 4;

/// Maximum number of columns in a single message format.
pub const MAX_COLUMNS: usize = 255;

/// Identity tokens handed out to message formats, used by the writer to
/// detect redefinitions. Never reused within a process.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

fn next_token() -> u64 {
    NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)
}

/// An ordered list of columns bound to a numeric message id.
///
/// Formats are built once by the caller, then passed by reference to a
/// [`LogWriter`](crate::writer::LogWriter) which announces them in the
/// stream via FMT records. Each instance carries a unique identity token;
/// building (or cloning) a format anew yields a new token, which the writer
/// treats as a redefinition of the id and announces again.
#[derive(Debug)]
pub struct MessageFormat {
    id: u8,
    name: String,
    columns: Vec<ColumnFormat>,
    token: u64,
}

impl MessageFormat {
    /// Create an empty message format.
    ///
    /// # Errors
    ///
    /// Returns an invalid-value error if `name` is longer than
    /// [`MAX_MESSAGE_NAME_LENGTH`] bytes or not ASCII, or if `id` is the
    /// reserved FMT message id (128).
    pub fn new(id: u8, name: &str) -> Result<Self> {
        if id == FMT_MESSAGE_ID {
            return Err(SdlogError::invalid_value(format!(
                "message id {id} is reserved for FMT records"
            )));
        }
        Self::new_reserved(id, name)
    }

    /// Like [`new`](Self::new) but allows the reserved FMT id. Used for the
    /// writer's built-in FMT meta-format.
    pub(crate) fn new_reserved(id: u8, name: &str) -> Result<Self> {
        if name.len() > MAX_MESSAGE_NAME_LENGTH || !name.is_ascii() {
            return Err(SdlogError::invalid_value(format!(
                "message name {name:?} must be at most {MAX_MESSAGE_NAME_LENGTH} ASCII bytes"
            )));
        }

        let mut columns = Vec::new();
        columns.try_reserve_exact(4)?;

        Ok(Self {
            id,
            name: name.to_owned(),
            columns,
            token: next_token(),
        })
    }

    /// The built-in FMT meta-format: the format of the records that
    /// announce all other formats.
    pub(crate) fn fmt_meta() -> Result<Self> {
        let mut format = Self::new_reserved(FMT_MESSAGE_ID, "FMT")?;
        format.add_columns("Type,Length,Name,Format,Columns", "BBnNZ", "-----")?;
        Ok(format)
    }

    /// Numeric id of the format.
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Short name of the format, at most 4 ASCII bytes.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns added so far.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column at `index`, or `None` beyond the end.
    #[inline]
    pub fn column(&self, index: usize) -> Option<&ColumnFormat> {
        self.columns.get(index)
    }

    /// Iterator over the columns, in wire order.
    #[inline]
    pub fn columns(&self) -> impl Iterator<Item = &ColumnFormat> {
        self.columns.iter()
    }

    /// Identity token of this instance; see the type-level docs.
    #[inline]
    pub(crate) fn token(&self) -> u64 {
        self.token
    }

    /// Total encoded payload size of one record of this format, in bytes.
    /// Does not include the 3-byte record header.
    pub fn wire_size(&self) -> u16 {
        self.columns.iter().map(|c| c.wire_size() as u16).sum()
    }

    /// The format string: the concatenated type codes of all columns.
    pub fn format_string(&self) -> String {
        self.columns.iter().map(|c| c.ty().code()).collect()
    }

    /// The column names joined by `sep`.
    pub fn column_names(&self, sep: &str) -> String {
        let mut result = String::new();
        for (index, column) in self.columns.iter().enumerate() {
            if index > 0 {
                result.push_str(sep);
            }
            result.push_str(column.name());
        }
        result
    }

    /// Append one column.
    ///
    /// # Errors
    ///
    /// - invalid-value if `type_code` is unknown;
    /// - limit-exceeded if the column count or column capacity would exceed
    ///   [`MAX_COLUMNS`], or if the total record size (payload plus record
    ///   header) would exceed [`MAX_RECORD_LENGTH`].
    pub fn add_column(&mut self, name: &str, type_code: char, unit: char) -> Result<()> {
        if self.columns.len() == MAX_COLUMNS {
            return Err(SdlogError::limit_exceeded(format!(
                "message format cannot have more than {MAX_COLUMNS} columns"
            )));
        }

        let column = ColumnFormat::new(name, type_code, unit)?;

        let record_size =
            RECORD_HEADER_SIZE + usize::from(self.wire_size()) + column.wire_size();
        if record_size > MAX_RECORD_LENGTH {
            return Err(SdlogError::limit_exceeded(format!(
                "record size would grow to {record_size} bytes, above the \
                 maximum of {MAX_RECORD_LENGTH}"
            )));
        }

        if self.columns.len() == self.columns.capacity() {
            self.grow()?;
        }

        self.columns.push(column);
        Ok(())
    }

    /// Append a batch of columns.
    ///
    /// `names` is a comma-separated list; `types` is a sequence of type
    /// codes whose length determines the column count; `units` is a
    /// sequence of unit codes aligned to `types`. Columns beyond the last
    /// name segment receive an empty name; columns beyond the last unit
    /// code are unitless.
    ///
    /// Not transactional: on failure, columns added before the failing one
    /// remain in the format. Callers that need all-or-nothing semantics
    /// should rebuild the format.
    pub fn add_columns(&mut self, names: &str, types: &str, units: &str) -> Result<()> {
        let count = types.chars().count();
        if MAX_COLUMNS - self.columns.len() < count {
            return Err(SdlogError::limit_exceeded(format!(
                "adding {count} columns would exceed the maximum of {MAX_COLUMNS}"
            )));
        }

        let mut names = names.split(',');
        let mut units = units.chars();

        for type_code in types.chars() {
            let name = names.next().unwrap_or("");
            let unit = units.next().unwrap_or(NO_UNIT);
            self.add_column(name, type_code, unit)?;
        }

        Ok(())
    }

    /// Column capacity growth: double below 32 slots, then +16 steps,
    /// failing once the schedule passes [`MAX_COLUMNS`].
    fn grow(&mut self) -> Result<()> {
        let capacity = self.columns.capacity();
        let new_capacity = if capacity < 4 {
            // A cloned format may start below the initial capacity.
            4
        } else if capacity < 32 {
            capacity * 2
        } else {
            capacity + 16
        };

        if new_capacity > MAX_COLUMNS {
            return Err(SdlogError::limit_exceeded(format!(
                "column capacity cannot grow beyond {MAX_COLUMNS}"
            )));
        }

        self.columns
            .try_reserve_exact(new_capacity - self.columns.len())?;
        Ok(())
    }
}

impl Clone for MessageFormat {
    /// Clones receive a fresh identity token: a cloned format counts as a
    /// redefinition and is re-announced by the writer.
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            columns: self.columns.clone(),
            token: next_token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;

    #[test]
    fn test_new_format() {
        let format = MessageFormat::new(1, "GPS").unwrap();
        assert_eq!(format.id(), 1);
        assert_eq!(format.name(), "GPS");
        assert_eq!(format.column_count(), 0);
        assert_eq!(format.wire_size(), 0);
    }

    #[test]
    fn test_name_too_long_rejected() {
        let err = MessageFormat::new(1, "FOOBAR").unwrap_err();
        assert!(matches!(err, SdlogError::InvalidValue(_)));
    }

    #[test]
    fn test_reserved_id_rejected() {
        let err = MessageFormat::new(FMT_MESSAGE_ID, "EVIL").unwrap_err();
        assert!(matches!(err, SdlogError::InvalidValue(_)));
    }

    #[test]
    fn test_add_column() {
        let mut format = MessageFormat::new(1, "ATT").unwrap();
        format.add_column("roll", 'f', 'r').unwrap();
        format.add_column("pitch", 'f', 'r').unwrap();

        assert_eq!(format.column_count(), 2);
        assert_eq!(format.column(0).unwrap().name(), "roll");
        assert_eq!(format.column(1).unwrap().ty(), ColumnType::Float);
        assert!(format.column(2).is_none());
        assert_eq!(format.wire_size(), 8);
    }

    #[test]
    fn test_add_column_invalid_type() {
        let mut format = MessageFormat::new(1, "ATT").unwrap();
        let err = format.add_column("x", '@', '-').unwrap_err();
        assert!(matches!(err, SdlogError::InvalidValue(_)));
        assert_eq!(format.column_count(), 0);
    }

    #[test]
    fn test_add_columns_batch() {
        let mut format = MessageFormat::new(1, "INT").unwrap();
        format
            .add_columns("s8,u8,s16,u16", "bBhH", "----")
            .unwrap();

        assert_eq!(format.column_count(), 4);
        assert_eq!(format.format_string(), "bBhH");
        assert_eq!(format.column_names(","), "s8,u8,s16,u16");
        assert_eq!(format.wire_size(), 6);
    }

    #[test]
    fn test_add_columns_missing_units_default_to_unitless() {
        let mut format = MessageFormat::new(1, "POS").unwrap();
        format.add_columns("lat,lng,alt", "LLf", "dd").unwrap();

        assert_eq!(format.column(0).unwrap().unit(), 'd');
        assert_eq!(format.column(1).unwrap().unit(), 'd');
        assert_eq!(format.column(2).unwrap().unit(), NO_UNIT);
    }

    #[test]
    fn test_add_columns_missing_names_are_empty() {
        let mut format = MessageFormat::new(1, "X").unwrap();
        format.add_columns("a,b", "bbb", "---").unwrap();

        assert_eq!(format.column(0).unwrap().name(), "a");
        assert_eq!(format.column(1).unwrap().name(), "b");
        assert_eq!(format.column(2).unwrap().name(), "");
        assert_eq!(format.column_names("|"), "a|b|");
    }

    #[test]
    fn test_add_columns_partial_failure_keeps_prefix() {
        let mut format = MessageFormat::new(1, "X").unwrap();
        let err = format.add_columns("a,b,c", "bb@", "---").unwrap_err();

        assert!(matches!(err, SdlogError::InvalidValue(_)));
        assert_eq!(format.column_count(), 2);
        assert_eq!(format.format_string(), "bb");
    }

    #[test]
    fn test_format_string_order() {
        let mut format = MessageFormat::new(7, "MIX").unwrap();
        format
            .add_columns("a,b,c,d,e", "bHfZn", "-----")
            .unwrap();
        assert_eq!(format.format_string(), "bHfZn");
    }

    #[test]
    fn test_record_size_cap_enforced() {
        let mut format = MessageFormat::new(1, "BIG").unwrap();
        // Three 64-byte strings: payload 192, record 195.
        format.add_columns("a,b,c", "ZZZ", "---").unwrap();
        // A fourth would push the record to 259 bytes.
        let err = format.add_column("d", 'Z', '-').unwrap_err();
        assert!(matches!(err, SdlogError::LimitExceeded(_)));
        assert_eq!(format.column_count(), 3);

        // Smaller columns still fit: 195 + 16 + 16 + 16 = 243...
        format.add_column("d", 'N', '-').unwrap();
        format.add_column("e", 'N', '-').unwrap();
        format.add_column("f", 'N', '-').unwrap();
        // ...and 243 + 16 = 259 does not.
        let err = format.add_column("g", 'N', '-').unwrap_err();
        assert!(matches!(err, SdlogError::LimitExceeded(_)));
    }

    #[test]
    fn test_batch_beyond_column_limit_rejected_upfront() {
        let mut format = MessageFormat::new(1, "X").unwrap();
        let types = "b".repeat(MAX_COLUMNS + 1);
        let err = format.add_columns("", &types, "").unwrap_err();
        assert!(matches!(err, SdlogError::LimitExceeded(_)));
        assert_eq!(format.column_count(), 0);
    }

    #[test]
    fn test_clone_gets_new_token() {
        let format = MessageFormat::new(1, "X").unwrap();
        let clone = format.clone();
        assert_ne!(format.token(), clone.token());
        assert_eq!(format.id(), clone.id());
    }

    #[test]
    fn test_fmt_meta_layout() {
        let fmt = MessageFormat::fmt_meta().unwrap();
        assert_eq!(fmt.id(), FMT_MESSAGE_ID);
        assert_eq!(fmt.name(), "FMT");
        assert_eq!(fmt.format_string(), "BBnNZ");
        assert_eq!(fmt.column_names(","), "Type,Length,Name,Format,Columns");
        assert_eq!(fmt.wire_size(), 86);
    }
}
