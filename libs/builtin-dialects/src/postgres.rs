use crate::common;
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, CLOB_LENGTH, ODBC_BRIDGE_DRIVER,
    UNKNOWN_COLUMN_TYPE,
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
    ErrorHandlingOnBatchUpdates |
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

pub(crate) const RESERVED_WORDS: &[&str] = &[
    "ALL",
    "ANALYSE",
    "ANALYZE",
    "AND",
    "ANY",
    "ARRAY",
    "AS",
    "ASC",
    "ASYMMETRIC",
    "AUTHORIZATION",
    "BETWEEN",
    "BINARY",
    "BOTH",
    "CASE",
    "CAST",
    "CHECK",
    "COLLATE",
    "COLUMN",
    "CONSTRAINT",
    "CREATE",
    "CROSS",
    "CURRENT_DATE",
    "CURRENT_ROLE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "DEFAULT",
    "DEFERRABLE",
    "DESC",
    "DISTINCT",
    "DO",
    "ELSE",
    "END",
    "EXCEPT",
    "FALSE",
    "FOR",
    "FOREIGN",
    "FREEZE",
    "FROM",
    "FULL",
    "GRANT",
    "GROUP",
    "HAVING",
    "ILIKE",
    "IN",
    "INITIALLY",
    "INNER",
    "INTERSECT",
    "INTO",
    "IS",
    "ISNULL",
    "JOIN",
    "LEADING",
    "LEFT",
    "LIKE",
    "LIMIT",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "NATURAL",
    "NEW",
    "NOT",
    "NOTNULL",
    "NULL",
    "OFF",
    "OFFSET",
    "OLD",
    "ON",
    "ONLY",
    "OR",
    "ORDER",
    "OUTER",
    "OVERLAPS",
    "PLACING",
    "PRIMARY",
    "REFERENCES",
    "RIGHT",
    "SELECT",
    "SESSION_USER",
    "SIMILAR",
    "SOME",
    "SYMMETRIC",
    "TABLE",
    "THEN",
    "TO",
    "TRAILING",
    "TRUE",
    "UNION",
    "UNIQUE",
    "USER",
    "USING",
    "VERBOSE",
    "WHEN",
    "WHERE",
];

pub struct PostgresDialect;

impl DatabaseDialect for PostgresDialect {
    fn id(&self) -> &'static str {
        "POSTGRESQL"
    }

    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        Some(5432)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        driver_class(access)
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        base_connection_url(self, params)
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
        common::wrap_definition(
            column,
            &field_type(column, technical_key, primary_key, use_auto_increment),
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
        add_column_statement(self, table, column, technical_key, use_auto_increment, primary_key)
    }

    fn modify_column_statement(
        &self,
        table: &str,
        column: &ColumnDescriptor,
        technical_key: Option<&str>,
        use_auto_increment: bool,
        primary_key: Option<&str>,
    ) -> Option<String> {
        modify_column_statement(self, table, column, technical_key, use_auto_increment, primary_key)
    }

    fn limit_clause(&self, rows: usize) -> String {
        format!(" LIMIT {rows}")
    }

    fn next_sequence_value_statement(&self, sequence: &str) -> Option<String> {
        Some(next_sequence_value(sequence))
    }

    fn current_sequence_value_statement(&self, sequence: &str) -> Option<String> {
        Some(current_sequence_value(sequence))
    }

    fn sequence_exists_statement(&self, sequence: &str) -> Option<String> {
        Some(sequence_exists(sequence))
    }

    fn list_sequences_statement(&self) -> Option<String> {
        Some(LIST_SEQUENCES.to_owned())
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn defaults_to_uppercase(&self) -> bool {
        false
    }
}

pub(crate) fn driver_class(access: AccessMethod) -> Option<&'static str> {
    match access {
        AccessMethod::Odbc => Some(ODBC_BRIDGE_DRIVER),
        AccessMethod::Native | AccessMethod::Jndi => Some("org.postgresql.Driver"),
        _ => None,
    }
}

pub(crate) fn base_connection_url(
    dialect: &dyn DatabaseDialect,
    params: &ConnectionParams<'_>,
) -> Result<String, Error> {
    match params.access {
        AccessMethod::Native | AccessMethod::Jndi => Ok(format!(
            "jdbc:postgresql://{}/{}",
            common::host_and_port(params.host, params.port, dialect.default_port()),
            params.database
        )),
        AccessMethod::Odbc => Ok(common::odbc_url(params.database)),
        access => Err(Error::UnsupportedAccessMethod {
            dialect: dialect.id(),
            access,
        }),
    }
}

/// Numeric columns with neither length nor precision fall back to DOUBLE
/// PRECISION; key columns become 64-bit, serial when auto increment is
/// requested.
pub(crate) fn field_type(
    column: &ColumnDescriptor,
    technical_key: Option<&str>,
    primary_key: Option<&str>,
    use_auto_increment: bool,
) -> String {
    let length = column.length.unwrap_or(0);
    let precision = column.precision.unwrap_or(0);

    match column.column_type {
        ColumnType::Date | ColumnType::Timestamp => "TIMESTAMP".to_owned(),
        ColumnType::Boolean => "BOOLEAN".to_owned(),
        ColumnType::Number | ColumnType::Integer | ColumnType::BigNumber => {
            if column.is_key(technical_key, primary_key) {
                if use_auto_increment {
                    "BIGSERIAL".to_owned()
                } else {
                    "BIGINT".to_owned()
                }
            } else if length > 0 {
                if precision > 0 || length > 18 {
                    format!("NUMERIC({length}, {precision})")
                } else if length > 9 {
                    "BIGINT".to_owned()
                } else if length < 5 {
                    "SMALLINT".to_owned()
                } else {
                    "INTEGER".to_owned()
                }
            } else {
                "DOUBLE PRECISION".to_owned()
            }
        }
        ColumnType::String => {
            if length > 0 && length < CLOB_LENGTH {
                format!("VARCHAR({length})")
            } else {
                "TEXT".to_owned()
            }
        }
        ColumnType::Binary => "BYTEA".to_owned(),
        _ => UNKNOWN_COLUMN_TYPE.to_owned(),
    }
}

pub(crate) fn add_column_statement(
    dialect: &dyn DatabaseDialect,
    table: &str,
    column: &ColumnDescriptor,
    technical_key: Option<&str>,
    use_auto_increment: bool,
    primary_key: Option<&str>,
) -> Option<String> {
    Some(format!(
        "ALTER TABLE {table} ADD COLUMN {}",
        dialect.column_definition(column, technical_key, primary_key, use_auto_increment, true, false)
    ))
}

pub(crate) fn modify_column_statement(
    dialect: &dyn DatabaseDialect,
    table: &str,
    column: &ColumnDescriptor,
    technical_key: Option<&str>,
    use_auto_increment: bool,
    primary_key: Option<&str>,
) -> Option<String> {
    let new_type =
        dialect.column_definition(column, technical_key, primary_key, use_auto_increment, false, false);

    Some(format!(
        "ALTER TABLE {table} ALTER COLUMN {} TYPE {new_type}",
        column.name
    ))
}

pub(crate) fn next_sequence_value(sequence: &str) -> String {
    format!("SELECT nextval('{sequence}')")
}

pub(crate) fn current_sequence_value(sequence: &str) -> String {
    format!("SELECT currval('{sequence}')")
}

pub(crate) fn sequence_exists(sequence: &str) -> String {
    format!(
        "SELECT relname AS sequence_name FROM pg_class WHERE relkind = 'S' AND relname = '{}'",
        sequence.to_lowercase()
    )
}

pub(crate) const LIST_SEQUENCES: &str =
    "SELECT relname AS sequence_name FROM pg_class WHERE relkind = 'S'";

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use sql_dialect::AccessMethods;

    #[test]
    fn vendor_facts() {
        let dialect = PostgresDialect;

        assert_eq!(dialect.default_port(), Some(5432));
        assert_eq!(
            dialect.driver_class(AccessMethod::Native),
            Some("org.postgresql.Driver")
        );
        assert_eq!(dialect.driver_class(AccessMethod::Odbc), Some(ODBC_BRIDGE_DRIVER));
        assert_eq!(dialect.driver_class(AccessMethod::Oci), None);
        let methods: AccessMethods = dialect.access_methods();
        assert_eq!(methods, AccessMethod::Native | AccessMethod::Odbc | AccessMethod::Jndi);
    }

    #[test]
    fn connection_urls() {
        let dialect = PostgresDialect;

        let url = dialect
            .connection_url(&ConnectionParams::native("db.local", None, "warehouse"))
            .unwrap();
        expect!["jdbc:postgresql://db.local:5432/warehouse"].assert_eq(&url);

        let url = dialect
            .connection_url(&ConnectionParams::odbc("warehouse_dsn"))
            .unwrap();
        expect!["jdbc:odbc:warehouse_dsn"].assert_eq(&url);

        let options = [("ssl", "true"), ("loglevel", "2")];
        let url = dialect
            .connection_url(
                &ConnectionParams::native("db.local", Some(6432), "warehouse").with_options(&options),
            )
            .unwrap();
        expect!["jdbc:postgresql://db.local:6432/warehouse?ssl=true&loglevel=2"].assert_eq(&url);
    }

    #[test]
    fn field_definitions() {
        let dialect = PostgresDialect;
        let definition = |column: &ColumnDescriptor| {
            dialect.column_definition(column, None, None, false, true, false)
        };

        let column = ColumnDescriptor::new("created_at", ColumnType::Date);
        expect!["created_at TIMESTAMP"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("deleted", ColumnType::Boolean);
        expect!["deleted BOOLEAN"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("amount", ColumnType::Number)
            .with_length(12)
            .with_precision(2);
        expect!["amount NUMERIC(12, 2)"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("counter", ColumnType::Integer).with_length(15);
        expect!["counter BIGINT"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("flag", ColumnType::Integer).with_length(3);
        expect!["flag SMALLINT"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("quantity", ColumnType::Integer).with_length(8);
        expect!["quantity INTEGER"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("ratio", ColumnType::Number);
        expect!["ratio DOUBLE PRECISION"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("code", ColumnType::String).with_length(32);
        expect!["code VARCHAR(32)"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("body", ColumnType::String);
        expect!["body TEXT"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("payload", ColumnType::Binary);
        expect!["payload BYTEA"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("blob", ColumnType::Serializable);
        expect!["blob UNKNOWN"].assert_eq(&definition(&column));
    }

    #[test]
    fn technical_key_definitions() {
        let dialect = PostgresDialect;
        let column = ColumnDescriptor::new("id_batch", ColumnType::Integer);

        let definition = dialect.column_definition(&column, Some("id_batch"), None, true, true, false);
        expect!["id_batch BIGSERIAL"].assert_eq(&definition);

        let definition = dialect.column_definition(&column, Some("id_batch"), None, false, true, false);
        expect!["id_batch BIGINT"].assert_eq(&definition);
    }

    #[test]
    fn alter_table_statements() {
        let dialect = PostgresDialect;
        let column = ColumnDescriptor::new("description", ColumnType::String).with_length(255);

        let statement = dialect
            .add_column_statement("audit_log", &column, None, false, None)
            .unwrap();
        expect!["ALTER TABLE audit_log ADD COLUMN description VARCHAR(255)"].assert_eq(&statement);

        let statement = dialect
            .modify_column_statement("audit_log", &column, None, false, None)
            .unwrap();
        expect!["ALTER TABLE audit_log ALTER COLUMN description TYPE VARCHAR(255)"].assert_eq(&statement);

        let statement = dialect.drop_column_statement("audit_log", &column).unwrap();
        expect!["ALTER TABLE audit_log DROP description"].assert_eq(&statement);
    }

    #[test]
    fn sequence_statements() {
        let dialect = PostgresDialect;

        expect!["SELECT nextval('seq_batch')"]
            .assert_eq(&dialect.next_sequence_value_statement("seq_batch").unwrap());
        expect!["SELECT currval('seq_batch')"]
            .assert_eq(&dialect.current_sequence_value_statement("seq_batch").unwrap());
        expect![
            "SELECT relname AS sequence_name FROM pg_class WHERE relkind = 'S' AND relname = 'seq_batch'"
        ]
        .assert_eq(&dialect.sequence_exists_statement("SEQ_BATCH").unwrap());
    }

    #[test]
    fn flags_and_words() {
        let dialect = PostgresDialect;

        assert!(dialect.supports_sequences());
        assert!(dialect.supports_boolean_type());
        assert!(!dialect.supports_bitmap_index());
        assert!(!dialect.supports_fetch_size());
        assert!(!dialect.supports_synonyms());
        assert!(!dialect.defaults_to_uppercase());
        assert!(dialect.is_reserved_word("user"));
        assert_eq!(dialect.limit_clause(100), " LIMIT 100");
    }
}
