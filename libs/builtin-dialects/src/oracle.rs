use crate::common;
use sql_dialect::{
    AccessMethod, AccessMethods, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, ODBC_BRIDGE_DRIVER, UNKNOWN_COLUMN_TYPE,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    BitmapIndex |
    FetchSize |
    Transactions |
    EmptyTransactions |
    Schemas |
    Sequences |
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
    TimestampToDateConversion
});

const RESERVED_WORDS: &[&str] = &[
    "ACCESS",
    "ADD",
    "ALL",
    "ALTER",
    "AND",
    "ANY",
    "AS",
    "ASC",
    "AUDIT",
    "BETWEEN",
    "BY",
    "CHAR",
    "CHECK",
    "CLUSTER",
    "COLUMN",
    "COMMENT",
    "COMPRESS",
    "CONNECT",
    "CREATE",
    "CURRENT",
    "DATE",
    "DECIMAL",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DISTINCT",
    "DROP",
    "ELSE",
    "EXCLUSIVE",
    "EXISTS",
    "FILE",
    "FLOAT",
    "FOR",
    "FROM",
    "GRANT",
    "GROUP",
    "HAVING",
    "IDENTIFIED",
    "IMMEDIATE",
    "IN",
    "INCREMENT",
    "INDEX",
    "INITIAL",
    "INSERT",
    "INTEGER",
    "INTERSECT",
    "INTO",
    "IS",
    "LEVEL",
    "LIKE",
    "LOCK",
    "LONG",
    "MAXEXTENTS",
    "MINUS",
    "MODE",
    "MODIFY",
    "NOAUDIT",
    "NOCOMPRESS",
    "NOT",
    "NOWAIT",
    "NULL",
    "NUMBER",
    "OF",
    "OFFLINE",
    "ON",
    "ONLINE",
    "OPTION",
    "OR",
    "ORDER",
    "PCTFREE",
    "PRIOR",
    "PRIVILEGES",
    "PUBLIC",
    "RAW",
    "RENAME",
    "RESOURCE",
    "REVOKE",
    "ROW",
    "ROWID",
    "ROWNUM",
    "ROWS",
    "SELECT",
    "SESSION",
    "SET",
    "SHARE",
    "SIZE",
    "SMALLINT",
    "START",
    "SUCCESSFUL",
    "SYNONYM",
    "SYSDATE",
    "TABLE",
    "THEN",
    "TO",
    "TRIGGER",
    "UID",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USER",
    "VALIDATE",
    "VALUES",
    "VARCHAR",
    "VARCHAR2",
    "VIEW",
    "WHENEVER",
    "WHERE",
    "WITH",
];

/// VARCHAR2 stops at 2000 characters on the releases this dialect
/// targets; longer strings become CLOB.
const MAX_VARCHAR_LENGTH: u32 = 2000;

pub struct OracleDialect;

impl DatabaseDialect for OracleDialect {
    fn id(&self) -> &'static str {
        "ORACLE"
    }

    fn name(&self) -> &'static str {
        "Oracle"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn access_methods(&self) -> AccessMethods {
        AccessMethod::Native | AccessMethod::Odbc | AccessMethod::Oci | AccessMethod::Jndi
    }

    fn default_port(&self) -> Option<u16> {
        Some(1521)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        match access {
            AccessMethod::Odbc => Some(ODBC_BRIDGE_DRIVER),
            AccessMethod::Native | AccessMethod::Oci | AccessMethod::Jndi => {
                Some("oracle.jdbc.driver.OracleDriver")
            }
            AccessMethod::Plugin => None,
        }
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        match params.access {
            AccessMethod::Native | AccessMethod::Jndi => Ok(format!(
                "jdbc:oracle:thin:@{}:{}",
                common::host_and_port(params.host, params.port, self.default_port()),
                params.database
            )),
            AccessMethod::Oci => Ok(format!("jdbc:oracle:oci8:@{}", params.database)),
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

    fn add_column_statement(
        &self,
        table: &str,
        column: &ColumnDescriptor,
        technical_key: Option<&str>,
        use_auto_increment: bool,
        primary_key: Option<&str>,
    ) -> Option<String> {
        Some(format!(
            "ALTER TABLE {table} ADD ( {} )",
            self.column_definition(column, technical_key, primary_key, use_auto_increment, true, false)
        ))
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
            "ALTER TABLE {table} MODIFY ( {} )",
            self.column_definition(column, technical_key, primary_key, use_auto_increment, true, false)
        ))
    }

    fn drop_column_statement(&self, table: &str, column: &ColumnDescriptor) -> Option<String> {
        Some(format!("ALTER TABLE {table} DROP ( {} )", column.name))
    }

    fn next_sequence_value_statement(&self, sequence: &str) -> Option<String> {
        Some(format!("SELECT {sequence}.nextval FROM DUAL"))
    }

    fn current_sequence_value_statement(&self, sequence: &str) -> Option<String> {
        Some(format!("SELECT {sequence}.currval FROM DUAL"))
    }

    fn sequence_exists_statement(&self, sequence: &str) -> Option<String> {
        Some(format!(
            "SELECT * FROM USER_SEQUENCES WHERE SEQUENCE_NAME = '{}'",
            sequence.to_uppercase()
        ))
    }

    fn list_sequences_statement(&self) -> Option<String> {
        Some("SELECT SEQUENCE_NAME FROM USER_SEQUENCES".to_owned())
    }

    fn table_exists_statement(&self, table: &str) -> String {
        format!("SELECT 1 FROM {table} WHERE 1=0")
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn max_varchar_length(&self) -> u32 {
        MAX_VARCHAR_LENGTH
    }
}

/// Everything numeric is NUMBER with optional length and precision; keys
/// are plain INTEGER because the identity column arrived much later than
/// the sequences this dialect leans on.
fn field_type(
    column: &ColumnDescriptor,
    technical_key: Option<&str>,
    primary_key: Option<&str>,
    _use_auto_increment: bool,
) -> String {
    let length = column.length.unwrap_or(0);
    let precision = column.precision.unwrap_or(0);

    match column.column_type {
        ColumnType::Date => "DATE".to_owned(),
        ColumnType::Timestamp => "TIMESTAMP".to_owned(),
        ColumnType::Boolean => "CHAR(1)".to_owned(),
        ColumnType::Number | ColumnType::Integer | ColumnType::BigNumber => {
            if column.is_key(technical_key, primary_key) {
                "INTEGER".to_owned()
            } else if length > 0 {
                if precision > 0 {
                    format!("NUMBER({length}, {precision})")
                } else {
                    format!("NUMBER({length})")
                }
            } else {
                "NUMBER".to_owned()
            }
        }
        ColumnType::String => {
            if length > MAX_VARCHAR_LENGTH {
                "CLOB".to_owned()
            } else if length > 0 {
                format!("VARCHAR2({length})")
            } else {
                format!("VARCHAR2({MAX_VARCHAR_LENGTH})")
            }
        }
        ColumnType::Binary => "BLOB".to_owned(),
        _ => UNKNOWN_COLUMN_TYPE.to_owned(),
    }
}
