use crate::common;
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, ODBC_BRIDGE_DRIVER, UNKNOWN_COLUMN_TYPE,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    Transactions |
    EmptyTransactions |
    Schemas |
    Sequences |
    Views |
    BooleanType |
    TimestampType |
    BatchUpdates |
    SetMaxRows |
    SetLong |
    NewLinesInStatements |
    RepositoryStorage |
    OptionsInUrl
});

const RESERVED_WORDS: &[&str] = &[
    "ALL",
    "AND",
    "ANY",
    "AS",
    "ASC",
    "BETWEEN",
    "BINARY",
    "BOOLEAN",
    "BY",
    "CASE",
    "CAST",
    "CHAR",
    "COLUMN",
    "CREATE",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DISTINCT",
    "ELSE",
    "END",
    "EXCEPT",
    "FALSE",
    "FLOAT",
    "FOR",
    "FOREIGN",
    "FROM",
    "FULL",
    "GRANT",
    "GROUP",
    "HAVING",
    "IN",
    "INNER",
    "INSERT",
    "INTEGER",
    "INTERSECT",
    "INTO",
    "IS",
    "JOIN",
    "LEFT",
    "LIKE",
    "LIMIT",
    "NOT",
    "NULL",
    "OFFSET",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "PRIMARY",
    "PROJECTION",
    "REFERENCES",
    "RIGHT",
    "SELECT",
    "TABLE",
    "THEN",
    "TIMESERIES",
    "TO",
    "TRUE",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USER",
    "USING",
    "VARCHAR",
    "WHEN",
    "WHERE",
    "WITH",
];

/// VARCHAR tops out at 65000 octets.
const MAX_VARCHAR_LENGTH: u32 = 65_000;

pub struct VerticaDialect;

impl DatabaseDialect for VerticaDialect {
    fn id(&self) -> &'static str {
        "VERTICA"
    }

    fn name(&self) -> &'static str {
        "Vertica"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        Some(5433)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        match access {
            AccessMethod::Odbc => Some(ODBC_BRIDGE_DRIVER),
            AccessMethod::Native | AccessMethod::Jndi => Some("com.vertica.Driver"),
            _ => None,
        }
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        match params.access {
            AccessMethod::Native | AccessMethod::Jndi => Ok(format!(
                "jdbc:vertica://{}/{}",
                common::host_and_port(params.host, params.port, self.default_port()),
                params.database
            )),
            AccessMethod::Odbc => Ok(common::odbc_url(params.database)),
            access => Err(Error::UnsupportedAccessMethod {
                dialect: self.id(),
                access,
            }),
        }
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
        common::wrap_definition(
            column,
            &field_type(column, technical_key, primary_key, use_auto_increment),
            include_name,
            include_newline,
        )
    }

    fn modify_column_statement(
        &self,
        table: &str,
        column: &ColumnDescriptor,
        technical_key: Option<&str>,
        use_auto_increment: bool,
        primary_key: Option<&str>,
    ) -> Option<String> {
        let new_type =
            self.column_definition(column, technical_key, primary_key, use_auto_increment, false, false);

        Some(format!(
            "ALTER TABLE {table} ALTER COLUMN {} SET DATA TYPE {new_type}",
            column.name
        ))
    }

    fn limit_clause(&self, rows: usize) -> String {
        format!(" LIMIT {rows}")
    }

    fn next_sequence_value_statement(&self, sequence: &str) -> Option<String> {
        Some(format!("SELECT NEXTVAL('{sequence}')"))
    }

    fn current_sequence_value_statement(&self, sequence: &str) -> Option<String> {
        Some(format!("SELECT CURRVAL('{sequence}')"))
    }

    fn sequence_exists_statement(&self, sequence: &str) -> Option<String> {
        Some(format!(
            "SELECT sequence_name FROM sequences WHERE sequence_name = '{}'",
            sequence.to_lowercase()
        ))
    }

    fn list_sequences_statement(&self) -> Option<String> {
        Some("SELECT sequence_name FROM sequences".to_owned())
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn defaults_to_uppercase(&self) -> bool {
        false
    }

    fn max_varchar_length(&self) -> u32 {
        MAX_VARCHAR_LENGTH
    }

    fn max_text_field_length(&self) -> u32 {
        MAX_VARCHAR_LENGTH
    }
}

/// A columnar store with 64-bit INTEGER as the only integer width; there
/// is no unbounded text type, so oversized strings clamp to the VARCHAR
/// ceiling.
fn field_type(
    column: &ColumnDescriptor,
    _technical_key: Option<&str>,
    _primary_key: Option<&str>,
    _use_auto_increment: bool,
) -> String {
    let length = column.length.unwrap_or(0);
    let precision = column.precision.unwrap_or(0);

    match column.column_type {
        ColumnType::Date => "DATE".to_owned(),
        ColumnType::Timestamp => "TIMESTAMP".to_owned(),
        ColumnType::Boolean => "BOOLEAN".to_owned(),
        ColumnType::Number | ColumnType::Integer | ColumnType::BigNumber => {
            if precision > 0 {
                format!("NUMERIC({length}, {precision})")
            } else if length > 0 {
                "INTEGER".to_owned()
            } else {
                "FLOAT".to_owned()
            }
        }
        ColumnType::String => {
            if length > MAX_VARCHAR_LENGTH {
                format!("VARCHAR({MAX_VARCHAR_LENGTH})")
            } else if length > 0 {
                format!("VARCHAR({length})")
            } else {
                "VARCHAR".to_owned()
            }
        }
        ColumnType::Binary => "VARBINARY".to_owned(),
        _ => UNKNOWN_COLUMN_TYPE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn vendor_facts() {
        let dialect = VerticaDialect;

        assert_eq!(dialect.default_port(), Some(5433));
        assert_eq!(dialect.driver_class(AccessMethod::Native), Some("com.vertica.Driver"));
        assert!(!dialect.supports_auto_increment());
        assert!(!dialect.supports_bitmap_index());
        assert!(!dialect.supports_catalogs());
        assert!(dialect.supports_sequences());
        assert_eq!(dialect.max_varchar_length(), 65_000);
    }

    #[test]
    fn connection_urls() {
        let dialect = VerticaDialect;

        let url = dialect
            .connection_url(&ConnectionParams::native("vertica.local", None, "analytics"))
            .unwrap();
        expect!["jdbc:vertica://vertica.local:5433/analytics"].assert_eq(&url);
    }

    #[test]
    fn field_definitions() {
        let dialect = VerticaDialect;
        let definition = |column: &ColumnDescriptor| {
            dialect.column_definition(column, None, None, false, true, false)
        };

        let column = ColumnDescriptor::new("created_at", ColumnType::Timestamp);
        expect!["created_at TIMESTAMP"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("amount", ColumnType::Number)
            .with_length(12)
            .with_precision(2);
        expect!["amount NUMERIC(12, 2)"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("counter", ColumnType::Integer).with_length(15);
        expect!["counter INTEGER"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("ratio", ColumnType::Number);
        expect!["ratio FLOAT"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("body", ColumnType::String).with_length(100_000);
        expect!["body VARCHAR(65000)"].assert_eq(&definition(&column));
    }

    #[test]
    fn alter_table_statements() {
        let dialect = VerticaDialect;
        let column = ColumnDescriptor::new("description", ColumnType::String).with_length(255);

        let statement = dialect
            .modify_column_statement("audit_log", &column, None, false, None)
            .unwrap();
        expect!["ALTER TABLE audit_log ALTER COLUMN description SET DATA TYPE VARCHAR(255)"]
            .assert_eq(&statement);
    }
}
