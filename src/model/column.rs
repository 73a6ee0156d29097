//! A single named, typed, unit-tagged column.

use crate::error::{Result, SdlogError};

use super::ColumnType;

/// Unit code meaning "no unit".
pub const NO_UNIT: char = '-';

/// One column of a message format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFormat {
    name: String,
    ty: ColumnType,
    unit: char,
}

impl ColumnFormat {
    /// Create a column from a name, a type code and a unit code.
    ///
    /// # Errors
    ///
    /// Returns an invalid-value error if `type_code` is not in the closed
    /// type set.
    pub fn new(name: &str, type_code: char, unit: char) -> Result<Self> {
        let ty = ColumnType::from_code(type_code).ok_or_else(|| {
            SdlogError::invalid_value(format!("unknown column type code {type_code:?}"))
        })?;

        Ok(Self {
            name: name.to_owned(),
            ty,
            unit,
        })
    }

    /// Name of the column.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type of the column.
    #[inline]
    pub fn ty(&self) -> ColumnType {
        self.ty
    }

    /// Unit code of the column; [`NO_UNIT`] if the column is unitless.
    #[inline]
    pub fn unit(&self) -> char {
        self.unit
    }

    /// Encoded width of this column, in bytes.
    #[inline]
    pub fn wire_size(&self) -> usize {
        self.ty.wire_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_creation() {
        let column = ColumnFormat::new("alt", 'f', 'm').unwrap();
        assert_eq!(column.name(), "alt");
        assert_eq!(column.ty(), ColumnType::Float);
        assert_eq!(column.unit(), 'm');
        assert_eq!(column.wire_size(), 4);
    }

    #[test]
    fn test_invalid_type_code_rejected() {
        let err = ColumnFormat::new("x", '@', NO_UNIT).unwrap_err();
        assert!(matches!(err, SdlogError::InvalidValue(_)));
    }

    #[test]
    fn test_reserved_array_type_has_size() {
        // 'a' is constructible (it appears in real logs) even though the
        // encoder rejects it.
        let column = ColumnFormat::new("samples", 'a', NO_UNIT).unwrap();
        assert_eq!(column.wire_size(), 64);
    }
}
