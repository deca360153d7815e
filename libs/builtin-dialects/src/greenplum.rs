//! Greenplum speaks the PostgreSQL wire protocol and SQL dialect; it uses
//! the same driver and formatting, but a failed batch reports only a
//! single error.

use crate::postgres;
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ConnectionParams, DatabaseDialect, DialectCapabilities,
    DialectCapability, Error,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    AutoIncrement |
    Transactions |
    EmptyTransactions |
    Catalogs |
    Schemas |
    Sequences |
    Views |
    BooleanType |
    TimestampType |
    BatchUpdates |
    SetMaxRows |
    SetLong |
    GetBlob |
    FloatRoundingOnUpdate |
    PreparedStatementMetadata |
    NewLinesInStatements |
    RepositoryStorage |
    OptionsInUrl |
    TimestampToDateConversion
});

pub struct GreenplumDialect;

impl DatabaseDialect for GreenplumDialect {
    fn id(&self) -> &'static str {
        "GREENPLUM"
    }

    fn name(&self) -> &'static str {
        "Greenplum"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        Some(5432)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        postgres::driver_class(access)
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        postgres::base_connection_url(self, params)
    }

    fn url_options_indicator(&self) -> &'static str {
        "?"
    }

    fn url_options_separator(&self) -> &'static str {
        "&"
    }

    fn column_definition(
        &self,
        column: &ColumnDescriptor,
        technical_key: Option<&str>,
        primary_key: Option<&str>,
        use_auto_increment: bool,
        include_name: bool,
        include_newline: bool,
    ) -> String {
        crate::common::wrap_definition(
            column,
            &postgres::field_type(column, technical_key, primary_key, use_auto_increment),
            include_name,
            include_newline,
        )
    }

    fn add_column_statement(
        &self,
        table: &str,
        column: &ColumnDescriptor,
        technical_key: Option<&str>,
        use_auto_increment: bool,
        primary_key: Option<&str>,
    ) -> Option<String> {
        postgres::add_column_statement(self, table, column, technical_key, use_auto_increment, primary_key)
    }

    fn modify_column_statement(
        &self,
        table: &str,
        column: &ColumnDescriptor,
        technical_key: Option<&str>,
        use_auto_increment: bool,
        primary_key: Option<&str>,
    ) -> Option<String> {
        postgres::modify_column_statement(self, table, column, technical_key, use_auto_increment, primary_key)
    }

    fn limit_clause(&self, rows: usize) -> String {
        format!(" LIMIT {rows}")
    }

    fn next_sequence_value_statement(&self, sequence: &str) -> Option<String> {
        Some(postgres::next_sequence_value(sequence))
    }

    fn current_sequence_value_statement(&self, sequence: &str) -> Option<String> {
        Some(postgres::current_sequence_value(sequence))
    }

    fn sequence_exists_statement(&self, sequence: &str) -> Option<String> {
        Some(postgres::sequence_exists(sequence))
    }

    fn list_sequences_statement(&self) -> Option<String> {
        Some(postgres::LIST_SEQUENCES.to_owned())
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        postgres::RESERVED_WORDS
    }

    fn defaults_to_uppercase(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use sql_dialect::ColumnType;

    #[test]
    fn shares_the_postgres_surface() {
        let dialect = GreenplumDialect;

        assert_eq!(dialect.default_port(), Some(5432));
        assert_eq!(
            dialect.driver_class(AccessMethod::Native),
            Some("org.postgresql.Driver")
        );

        let url = dialect
            .connection_url(&ConnectionParams::native("segment-host", None, "analytics"))
            .unwrap();
        expect!["jdbc:postgresql://segment-host:5432/analytics"].assert_eq(&url);

        let column = ColumnDescriptor::new("id_run", ColumnType::Integer);
        let definition = dialect.column_definition(&column, Some("id_run"), None, true, true, false);
        expect!["id_run BIGSERIAL"].assert_eq(&definition);
    }

    #[test]
    fn batch_error_handling_is_the_difference() {
        assert!(postgres::CAPABILITIES.contains(DialectCapability::ErrorHandlingOnBatchUpdates));
        assert!(!CAPABILITIES.contains(DialectCapability::ErrorHandlingOnBatchUpdates));
    }
}
