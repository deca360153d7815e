/// The semantic type of a column, as carried by the engine's row metadata.
///
/// Dialects map these to vendor type keywords in
/// [`column_definition`](crate::DatabaseDialect::column_definition). A
/// dialect with no mapping for a type renders the
/// [`UNKNOWN_COLUMN_TYPE`](crate::UNKNOWN_COLUMN_TYPE) marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Number,
    String,
    Date,
    Boolean,
    Integer,
    BigNumber,
    Serializable,
    Binary,
    Timestamp,
    Internet,
}

/// A generic description of a column, consumed read-only by the DDL
/// formatters.
///
/// `length` and `precision` are `None` when the source metadata does not
/// specify them; the formatters treat an absent value like a zero, the way
/// the engine's row metadata does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub column_type: ColumnType,
    pub length: Option<u32>,
    pub precision: Option<u32>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        ColumnDescriptor {
            name: name.into(),
            column_type,
            length: None,
            precision: None,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Whether this column is the designated technical or primary key,
    /// compared the way the engine compares field names.
    pub fn is_key(&self, technical_key: Option<&str>, primary_key: Option<&str>) -> bool {
        let matches = |key: Option<&str>| key.is_some_and(|key| key.eq_ignore_ascii_case(&self.name));

        matches(technical_key) || matches(primary_key)
    }
}
