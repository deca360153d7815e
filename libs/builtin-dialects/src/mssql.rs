use crate::common;
use connection_string::JdbcString;
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, Quoted, ODBC_BRIDGE_DRIVER, UNKNOWN_COLUMN_TYPE,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    AutoIncrement |
    FetchSize |
    Transactions |
    EmptyTransactions |
    Catalogs |
    Schemas |
    Views |
    Synonyms |
    TimestampType |
    BatchUpdates |
    ErrorHandlingOnBatchUpdates |
    SetMaxRows |
    SetLong |
    SetCharacterStream |
    GetBlob |
    FloatRoundingOnUpdate |
    PreparedStatementMetadata |
    NewLinesInStatements |
    RepositoryStorage |
    OptionsInUrl |
    TimestampToDateConversion
});

const RESERVED_WORDS: &[&str] = &[
    "ADD",
    "ALL",
    "ALTER",
    "AND",
    "ANY",
    "AS",
    "ASC",
    "AUTHORIZATION",
    "BACKUP",
    "BEGIN",
    "BETWEEN",
    "BREAK",
    "BROWSE",
    "BULK",
    "BY",
    "CASCADE",
    "CASE",
    "CHECK",
    "CHECKPOINT",
    "CLOSE",
    "CLUSTERED",
    "COLUMN",
    "COMMIT",
    "CONSTRAINT",
    "CONTAINS",
    "CONTINUE",
    "CONVERT",
    "CREATE",
    "CROSS",
    "CURRENT",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "CURSOR",
    "DATABASE",
    "DEALLOCATE",
    "DECLARE",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DISTINCT",
    "DOUBLE",
    "DROP",
    "ELSE",
    "END",
    "EXCEPT",
    "EXEC",
    "EXECUTE",
    "EXISTS",
    "FETCH",
    "FILE",
    "FOR",
    "FOREIGN",
    "FROM",
    "FULL",
    "FUNCTION",
    "GOTO",
    "GRANT",
    "GROUP",
    "HAVING",
    "IDENTITY",
    "IF",
    "IN",
    "INDEX",
    "INNER",
    "INSERT",
    "INTERSECT",
    "INTO",
    "IS",
    "JOIN",
    "KEY",
    "LEFT",
    "LIKE",
    "MERGE",
    "NOT",
    "NULL",
    "OF",
    "OFF",
    "ON",
    "OPEN",
    "OPTION",
    "OR",
    "ORDER",
    "OUTER",
    "OVER",
    "PERCENT",
    "PLAN",
    "PRIMARY",
    "PROC",
    "PROCEDURE",
    "PUBLIC",
    "READ",
    "REFERENCES",
    "RESTORE",
    "RESTRICT",
    "RETURN",
    "REVOKE",
    "RIGHT",
    "ROLLBACK",
    "ROWCOUNT",
    "RULE",
    "SAVE",
    "SCHEMA",
    "SELECT",
    "SET",
    "SOME",
    "TABLE",
    "THEN",
    "TO",
    "TOP",
    "TRAN",
    "TRANSACTION",
    "TRIGGER",
    "TRUNCATE",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USE",
    "USER",
    "VALUES",
    "VIEW",
    "WHEN",
    "WHERE",
    "WHILE",
    "WITH",
];

pub struct MsSqlDialect;

impl DatabaseDialect for MsSqlDialect {
    fn id(&self) -> &'static str {
        "MSSQL"
    }

    fn name(&self) -> &'static str {
        "MS SQL Server"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        Some(1433)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        match access {
            AccessMethod::Odbc => Some(ODBC_BRIDGE_DRIVER),
            AccessMethod::Native | AccessMethod::Jndi => {
                Some("com.microsoft.sqlserver.jdbc.SQLServerDriver")
            }
            _ => None,
        }
    }

    /// SQL Server URLs carry their settings as a JDBC property block, so
    /// options are merged through [`JdbcString`] instead of the generic
    /// option suffix.
    fn connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        let url = self.base_connection_url(params)?;

        if params.options.is_empty() {
            return Ok(url);
        }

        match url.parse::<JdbcString>() {
            Ok(mut jdbc) => {
                let properties = jdbc.properties_mut();

                for (name, value) in params.options {
                    properties.insert((*name).to_owned(), (*value).to_owned());
                }

                Ok(jdbc.to_string())
            }
            Err(_) => {
                tracing::warn!(url = %url, "connection URL is not a JDBC property block, options dropped");
                Ok(url)
            }
        }
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        match params.access {
            AccessMethod::Native | AccessMethod::Jndi => Ok(format!(
                "jdbc:sqlserver://{};databaseName={}",
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

    fn quote<'a>(&self, ident: &'a str) -> Quoted<&'a str> {
        Quoted::SquareBrackets(ident)
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
        Some(format!(
            "ALTER TABLE {table} ALTER COLUMN {}",
            self.column_definition(column, technical_key, primary_key, use_auto_increment, true, false)
        ))
    }

    fn drop_column_statement(&self, table: &str, column: &ColumnDescriptor) -> Option<String> {
        Some(format!("ALTER TABLE {table} DROP COLUMN {}", column.name))
    }

    fn query_fields_statement(&self, table: &str) -> String {
        format!("SELECT TOP 1 * FROM {table}")
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn max_varchar_length(&self) -> u32 {
        MAX_VARCHAR_LENGTH
    }
}

/// VARCHAR columns stop at 8000 characters; longer strings use TEXT.
const MAX_VARCHAR_LENGTH: u32 = 8000;

fn field_type(
    column: &ColumnDescriptor,
    technical_key: Option<&str>,
    primary_key: Option<&str>,
    use_auto_increment: bool,
) -> String {
    let length = column.length.unwrap_or(0);
    let precision = column.precision.unwrap_or(0);

    match column.column_type {
        ColumnType::Date | ColumnType::Timestamp => "DATETIME".to_owned(),
        ColumnType::Boolean => "CHAR(1)".to_owned(),
        ColumnType::Number | ColumnType::Integer | ColumnType::BigNumber => {
            if column.is_key(technical_key, primary_key) {
                if use_auto_increment {
                    "BIGINT PRIMARY KEY IDENTITY(0,1)".to_owned()
                } else {
                    "BIGINT PRIMARY KEY".to_owned()
                }
            } else if precision == 0 {
                if length > 9 {
                    format!("DECIMAL({length})")
                } else {
                    "INT".to_owned()
                }
            } else {
                format!("DECIMAL({length}, {precision})")
            }
        }
        ColumnType::String => {
            if length > MAX_VARCHAR_LENGTH {
                "TEXT".to_owned()
            } else if length > 0 {
                format!("VARCHAR({length})")
            } else {
                "VARCHAR(100)".to_owned()
            }
        }
        ColumnType::Binary => "VARBINARY(MAX)".to_owned(),
        _ => UNKNOWN_COLUMN_TYPE.to_owned(),
    }
}
