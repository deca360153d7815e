//! The contract implemented by database dialects.
//!
//! A dialect is a stateless description of one vendor: which access
//! methods it supports, its default port and JDBC driver class, how a
//! connection URL is assembled, which SQL features are available, how
//! identifiers are quoted, and how column definitions and ALTER TABLE
//! statements are rendered from a generic [`ColumnDescriptor`].
//!
//! Every operation is a pure function of its arguments. A missing
//! capability is reported through the return value (`None`, an empty
//! string, or [`Error`]), never through a panic.

mod capabilities;
mod column;
mod connection;
mod empty_dialect;
mod error;
mod render;

pub use self::{
    capabilities::{DialectCapabilities, DialectCapability},
    column::{ColumnDescriptor, ColumnType},
    connection::{AccessMethod, AccessMethods, ConnectionParams, ODBC_BRIDGE_DRIVER},
    empty_dialect::EmptyDialect,
    error::Error,
    render::{IteratorJoin, Quoted},
};

use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;

/// Text length from which string columns spill into the vendor's
/// CLOB/TEXT type.
pub const CLOB_LENGTH: u32 = 9_999_999;

/// Marker rendered for column types a dialect has no mapping for.
pub const UNKNOWN_COLUMN_TYPE: &str = "UNKNOWN";

/// Characters escaped when embedding option values in a connection URL.
const URL_OPTION_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'%')
    .add(b'&')
    .add(b';')
    .add(b'=')
    .add(b'?');

/// A registry of dialects to select by type code.
pub type DialectRegistry<'a> = &'a [&'static dyn DatabaseDialect];

/// The dialect metadata API.
///
/// Implementations are unit structs; the engine holds them as
/// `&'static dyn DatabaseDialect`, one per configured connection type.
/// Defaults on this trait mirror the behavior shared by most vendors;
/// implementations override only what differs.
pub trait DatabaseDialect: Send + Sync {
    /// The type code identifying this dialect in stored connection
    /// definitions.
    fn id(&self) -> &'static str;

    /// The vendor name, used in error messages and pickers.
    fn name(&self) -> &'static str;

    /// Must return true whenever the passed in type code selects this
    /// dialect.
    fn is_id(&self, type_code: &str) -> bool {
        type_code.eq_ignore_ascii_case(self.id())
    }

    /// The static capability set of the dialect.
    fn capabilities(&self) -> DialectCapabilities;

    fn has_capability(&self, capability: DialectCapability) -> bool {
        self.capabilities().contains(capability)
    }

    /// The access methods connections of this type may be configured with.
    fn access_methods(&self) -> AccessMethods {
        AccessMethod::Native | AccessMethod::Odbc | AccessMethod::Jndi
    }

    /// The port the server listens on when the connection definition does
    /// not name one. `None` when the vendor has no fixed default.
    fn default_port(&self) -> Option<u16>;

    /// The JDBC driver class to load for the given access method, `None`
    /// when the method is not supported.
    fn driver_class(&self, access: AccessMethod) -> Option<&'static str>;

    /// The complete connection URL, with extra options appended when the
    /// dialect carries options in the URL.
    fn connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        let mut url = self.base_connection_url(params)?;

        if !params.options.is_empty() && self.supports_options_in_url() {
            url.push_str(self.url_options_indicator());
            url.push_str(&self.render_url_options(params.options));
        }

        Ok(url)
    }

    /// The options-free part of the connection URL. Fails with
    /// [`Error::UnsupportedAccessMethod`] where the access method does not
    /// apply to this vendor.
    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error>;

    /// Separator between the URL body and the first option.
    fn url_options_indicator(&self) -> &'static str {
        ";"
    }

    /// Separator between consecutive options.
    fn url_options_separator(&self) -> &'static str {
        ";"
    }

    /// Separator between an option name and its value.
    fn url_options_value_separator(&self) -> &'static str {
        "="
    }

    fn render_url_options(&self, options: &[(&str, &str)]) -> String {
        options
            .iter()
            .map(|(name, value)| {
                format!(
                    "{name}{}{}",
                    self.url_options_value_separator(),
                    utf8_percent_encode(value, URL_OPTION_ESCAPES)
                )
            })
            .join(self.url_options_separator())
    }

    /// Quote an identifier in the dialect's style.
    fn quote<'a>(&self, ident: &'a str) -> Quoted<&'a str> {
        Quoted::Double(ident)
    }

    /// The vendor column definition for a generic column description.
    ///
    /// `technical_key` and `primary_key` name the designated key columns
    /// of the table; when `column` is one of them, the dialect emits its
    /// key type instead, honouring `use_auto_increment` where supported.
    /// Unknown column types render [`UNKNOWN_COLUMN_TYPE`].
    fn column_definition(
        &self,
        column: &ColumnDescriptor,
        technical_key: Option<&str>,
        primary_key: Option<&str>,
        use_auto_increment: bool,
        include_name: bool,
        include_newline: bool,
    ) -> String;

    /// DDL to add a column to an existing table. `None` when the dialect
    /// cannot add columns.
    fn add_column_statement(
        &self,
        table: &str,
        column: &ColumnDescriptor,
        technical_key: Option<&str>,
        use_auto_increment: bool,
        primary_key: Option<&str>,
    ) -> Option<String> {
        Some(format!(
            "ALTER TABLE {table} ADD {}",
            self.column_definition(
                column,
                technical_key,
                primary_key,
                use_auto_increment,
                true,
                false
            )
        ))
    }

    /// DDL to change an existing column to a new definition. `None` when
    /// the dialect cannot modify columns.
    fn modify_column_statement(
        &self,
        table: &str,
        column: &ColumnDescriptor,
        technical_key: Option<&str>,
        use_auto_increment: bool,
        primary_key: Option<&str>,
    ) -> Option<String>;

    /// DDL to drop a column. `None` when the dialect cannot drop columns.
    fn drop_column_statement(&self, table: &str, column: &ColumnDescriptor) -> Option<String> {
        Some(format!("ALTER TABLE {table} DROP {}", column.name))
    }

    fn create_table_prefix(&self) -> &'static str {
        "CREATE TABLE "
    }

    /// The clause appended to a query to cap the number of returned rows;
    /// empty when the vendor has no such clause.
    fn limit_clause(&self, _rows: usize) -> String {
        String::new()
    }

    /// A query returning the table's fields without reading all rows.
    fn query_fields_statement(&self, table: &str) -> String {
        format!("SELECT * FROM {table}")
    }

    fn table_exists_statement(&self, table: &str) -> String {
        format!("SELECT 1 FROM {table}")
    }

    fn column_exists_statement(&self, column: &str, table: &str) -> String {
        format!("SELECT {column} FROM {table}")
    }

    fn select_count_statement(&self, table: &str) -> String {
        format!("SELECT COUNT(*) FROM {table}")
    }

    fn truncate_table_statement(&self, table: &str) -> String {
        format!("TRUNCATE TABLE {table}")
    }

    /// Combine a schema and a table name the way the vendor expects them
    /// qualified.
    fn schema_table_combination(&self, schema: &str, table: &str) -> String {
        format!("{schema}.{table}")
    }

    fn next_sequence_value_statement(&self, _sequence: &str) -> Option<String> {
        None
    }

    fn current_sequence_value_statement(&self, _sequence: &str) -> Option<String> {
        None
    }

    fn sequence_exists_statement(&self, _sequence: &str) -> Option<String> {
        None
    }

    fn list_sequences_statement(&self) -> Option<String> {
        None
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        &[]
    }

    fn is_reserved_word(&self, word: &str) -> bool {
        self.reserved_words()
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(word))
    }

    /// Rewrite a field name so it can be used as a bare identifier:
    /// illegal characters become underscores, a leading digit is prefixed,
    /// reserved words get an underscore suffix.
    fn safe_identifier(&self, name: &str) -> String {
        static ILLEGAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9A-Za-z_]").unwrap());

        let mut cleaned = ILLEGAL_CHARS.replace_all(name.trim(), "_").into_owned();

        if cleaned.chars().next().is_some_and(|first| first.is_ascii_digit()) {
            cleaned.insert(0, '_');
        }

        if self.is_reserved_word(&cleaned) {
            cleaned.push('_');
        }

        if cleaned != name {
            tracing::warn!(original = name, renamed = %cleaned, "field name was not a safe identifier");
        }

        cleaned
    }

    /// Whether unquoted identifiers fold to upper case on this vendor.
    fn defaults_to_uppercase(&self) -> bool {
        true
    }

    /// Maximum VARCHAR length before the definition spills into the
    /// vendor's unbounded text type.
    fn max_varchar_length(&self) -> u32 {
        CLOB_LENGTH
    }

    fn max_text_field_length(&self) -> u32 {
        CLOB_LENGTH
    }

    fn function_sum(&self) -> &'static str {
        "SUM"
    }

    fn function_average(&self) -> &'static str {
        "AVG"
    }

    fn function_minimum(&self) -> &'static str {
        "MIN"
    }

    fn function_maximum(&self) -> &'static str {
        "MAX"
    }

    fn function_count(&self) -> &'static str {
        "COUNT"
    }

    fn supports_auto_increment(&self) -> bool {
        self.has_capability(DialectCapability::AutoIncrement)
    }

    fn supports_bitmap_index(&self) -> bool {
        self.has_capability(DialectCapability::BitmapIndex)
    }

    fn supports_fetch_size(&self) -> bool {
        self.has_capability(DialectCapability::FetchSize)
    }

    fn supports_transactions(&self) -> bool {
        self.has_capability(DialectCapability::Transactions)
    }

    fn supports_catalogs(&self) -> bool {
        self.has_capability(DialectCapability::Catalogs)
    }

    fn supports_schemas(&self) -> bool {
        self.has_capability(DialectCapability::Schemas)
    }

    fn supports_sequences(&self) -> bool {
        self.has_capability(DialectCapability::Sequences)
    }

    fn supports_views(&self) -> bool {
        self.has_capability(DialectCapability::Views)
    }

    fn supports_synonyms(&self) -> bool {
        self.has_capability(DialectCapability::Synonyms)
    }

    fn supports_boolean_type(&self) -> bool {
        self.has_capability(DialectCapability::BooleanType)
    }

    fn supports_timestamp_type(&self) -> bool {
        self.has_capability(DialectCapability::TimestampType)
    }

    fn supports_batch_updates(&self) -> bool {
        self.has_capability(DialectCapability::BatchUpdates)
    }

    fn supports_options_in_url(&self) -> bool {
        self.has_capability(DialectCapability::OptionsInUrl)
    }

    fn supports_repository_storage(&self) -> bool {
        self.has_capability(DialectCapability::RepositoryStorage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// A dialect that overrides nothing beyond the required methods, to
    /// pin down the base defaults.
    struct PlainDialect;

    impl DatabaseDialect for PlainDialect {
        fn id(&self) -> &'static str {
            "PLAIN"
        }

        fn name(&self) -> &'static str {
            "Plain"
        }

        fn capabilities(&self) -> DialectCapabilities {
            enumflags2::make_bitflags!(DialectCapability::{Transactions | OptionsInUrl})
        }

        fn default_port(&self) -> Option<u16> {
            Some(1)
        }

        fn driver_class(&self, _access: AccessMethod) -> Option<&'static str> {
            Some("com.example.Driver")
        }

        fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
            Ok(format!("jdbc:plain://{}/{}", params.host, params.database))
        }

        fn column_definition(
            &self,
            column: &ColumnDescriptor,
            _technical_key: Option<&str>,
            _primary_key: Option<&str>,
            _use_auto_increment: bool,
            _include_name: bool,
            _include_newline: bool,
        ) -> String {
            format!("{} VARCHAR(1)", column.name)
        }

        fn modify_column_statement(
            &self,
            _table: &str,
            _column: &ColumnDescriptor,
            _technical_key: Option<&str>,
            _use_auto_increment: bool,
            _primary_key: Option<&str>,
        ) -> Option<String> {
            None
        }

        fn reserved_words(&self) -> &'static [&'static str] {
            &["SELECT"]
        }
    }

    #[test]
    fn base_statement_defaults() {
        let dialect = PlainDialect;

        assert_eq!(dialect.limit_clause(10), "");
        assert_eq!(dialect.query_fields_statement("t"), "SELECT * FROM t");
        assert_eq!(dialect.table_exists_statement("t"), "SELECT 1 FROM t");
        assert_eq!(dialect.column_exists_statement("c", "t"), "SELECT c FROM t");
        assert_eq!(dialect.select_count_statement("t"), "SELECT COUNT(*) FROM t");
        assert_eq!(dialect.truncate_table_statement("t"), "TRUNCATE TABLE t");
        assert_eq!(dialect.schema_table_combination("s", "t"), "s.t");
        assert_eq!(dialect.next_sequence_value_statement("seq"), None);

        let column = ColumnDescriptor::new("flag", ColumnType::String);
        assert_eq!(
            dialect.drop_column_statement("t", &column).as_deref(),
            Some("ALTER TABLE t DROP flag")
        );
        assert_eq!(
            dialect
                .add_column_statement("t", &column, None, false, None)
                .as_deref(),
            Some("ALTER TABLE t ADD flag VARCHAR(1)")
        );
    }

    #[test]
    fn options_are_appended_and_escaped() {
        let dialect = PlainDialect;
        let options = [("characterEncoding", "UTF-8"), ("odd value", "a b;c")];
        let params = ConnectionParams::native("h", None, "db").with_options(&options);

        let url = dialect.connection_url(&params).unwrap();
        expect_test::expect!["jdbc:plain://h/db;characterEncoding=UTF-8;odd value=a%20b%3Bc"]
            .assert_eq(&url);
    }

    #[test]
    fn safe_identifier_cleanup() {
        let dialect = PlainDialect;

        assert_eq!(dialect.safe_identifier("order total"), "order_total");
        assert_eq!(dialect.safe_identifier("90 days"), "_90_days");
        assert_eq!(dialect.safe_identifier("select"), "select_");
        assert_eq!(dialect.safe_identifier("plain_name"), "plain_name");
    }

    #[test]
    fn capability_predicates_read_from_the_flag_set() {
        let dialect = PlainDialect;

        assert!(dialect.supports_transactions());
        assert!(dialect.supports_options_in_url());
        assert!(!dialect.supports_sequences());
        assert!(!dialect.supports_auto_increment());
    }

    #[test]
    fn type_code_matching_is_case_insensitive() {
        let dialect = PlainDialect;

        assert!(dialect.is_id("plain"));
        assert!(dialect.is_id("PLAIN"));
        assert!(!dialect.is_id("other"));
    }
}
