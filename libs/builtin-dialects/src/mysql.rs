use crate::common;
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, Quoted, ODBC_BRIDGE_DRIVER, UNKNOWN_COLUMN_TYPE,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    AutoIncrement |
    Transactions |
    EmptyTransactions |
    Catalogs |
    Views |
    TimestampType |
    BatchUpdates |
    SetMaxRows |
    SetLong |
    SetCharacterStream |
    GetBlob |
    FloatRoundingOnUpdate |
    RepositoryStorage |
    OptionsInUrl |
    TimestampToDateConversion
});

pub(crate) const RESERVED_WORDS: &[&str] = &[
    "ADD",
    "ALL",
    "ALTER",
    "ANALYZE",
    "AND",
    "AS",
    "ASC",
    "BEFORE",
    "BETWEEN",
    "BIGINT",
    "BINARY",
    "BLOB",
    "BOTH",
    "BY",
    "CASCADE",
    "CASE",
    "CHANGE",
    "CHAR",
    "CHARACTER",
    "CHECK",
    "COLLATE",
    "COLUMN",
    "CONDITION",
    "CONSTRAINT",
    "CONTINUE",
    "CONVERT",
    "CREATE",
    "CROSS",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "CURSOR",
    "DATABASE",
    "DATABASES",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DESCRIBE",
    "DISTINCT",
    "DIV",
    "DOUBLE",
    "DROP",
    "ELSE",
    "EXISTS",
    "FALSE",
    "FOR",
    "FORCE",
    "FOREIGN",
    "FROM",
    "GRANT",
    "GROUP",
    "HAVING",
    "IF",
    "IGNORE",
    "IN",
    "INDEX",
    "INNER",
    "INSERT",
    "INT",
    "INTEGER",
    "INTERVAL",
    "INTO",
    "IS",
    "JOIN",
    "KEY",
    "KEYS",
    "LEADING",
    "LEFT",
    "LIKE",
    "LIMIT",
    "LOCK",
    "LONG",
    "MATCH",
    "NATURAL",
    "NOT",
    "NULL",
    "ON",
    "OPTION",
    "OR",
    "ORDER",
    "OUTER",
    "PRIMARY",
    "PROCEDURE",
    "REFERENCES",
    "RENAME",
    "REPLACE",
    "RESTRICT",
    "RIGHT",
    "SELECT",
    "SET",
    "SHOW",
    "TABLE",
    "THEN",
    "TO",
    "TRAILING",
    "TRUE",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USAGE",
    "USE",
    "USING",
    "VALUES",
    "VARCHAR",
    "WHEN",
    "WHERE",
    "WHILE",
    "WITH",
    "WRITE",
];

pub struct MySqlDialect;

impl DatabaseDialect for MySqlDialect {
    fn id(&self) -> &'static str {
        "MYSQL"
    }

    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        Some(3306)
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

    fn quote<'a>(&self, ident: &'a str) -> Quoted<&'a str> {
        Quoted::Backticks(ident)
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
        modify_column_statement(self, table, column, technical_key, use_auto_increment, primary_key)
    }

    fn limit_clause(&self, rows: usize) -> String {
        format!(" LIMIT {rows}")
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn defaults_to_uppercase(&self) -> bool {
        false
    }

    fn max_varchar_length(&self) -> u32 {
        255
    }

    fn max_text_field_length(&self) -> u32 {
        MAX_LONGTEXT_LENGTH
    }
}

/// LONGTEXT tops out at 4GB; anything longer than a MEDIUMTEXT already
/// spills there.
pub(crate) const MAX_LONGTEXT_LENGTH: u32 = u32::MAX;

pub(crate) fn driver_class(access: AccessMethod) -> Option<&'static str> {
    match access {
        AccessMethod::Odbc => Some(ODBC_BRIDGE_DRIVER),
        AccessMethod::Native | AccessMethod::Jndi => Some("org.gjt.mm.mysql.Driver"),
        _ => None,
    }
}

pub(crate) fn base_connection_url(
    dialect: &dyn DatabaseDialect,
    params: &ConnectionParams<'_>,
) -> Result<String, Error> {
    match params.access {
        AccessMethod::Native | AccessMethod::Jndi => Ok(format!(
            "jdbc:mysql://{}/{}",
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

/// Strings tier through VARCHAR, TEXT, MEDIUMTEXT and LONGTEXT by length;
/// key columns carry their PRIMARY KEY clause inside the definition
/// because MySQL declares AUTO_INCREMENT inline.
pub(crate) fn field_type(
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
                    "BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY".to_owned()
                } else {
                    "BIGINT NOT NULL PRIMARY KEY".to_owned()
                }
            } else if precision == 0 {
                if length > 9 {
                    if length < 19 {
                        "BIGINT".to_owned()
                    } else {
                        format!("DECIMAL({length})")
                    }
                } else {
                    "INT".to_owned()
                }
            } else {
                format!("DECIMAL({length}, {precision})")
            }
        }
        ColumnType::String => {
            if length == 1 {
                "CHAR(1)".to_owned()
            } else if length > 0 && length < 256 {
                format!("VARCHAR({length})")
            } else if length == 0 {
                "TINYTEXT".to_owned()
            } else if length < 65_536 {
                "TEXT".to_owned()
            } else if length < 16_777_216 {
                "MEDIUMTEXT".to_owned()
            } else {
                "LONGTEXT".to_owned()
            }
        }
        ColumnType::Binary => "LONGBLOB".to_owned(),
        _ => UNKNOWN_COLUMN_TYPE.to_owned(),
    }
}

pub(crate) fn modify_column_statement(
    dialect: &dyn DatabaseDialect,
    table: &str,
    column: &ColumnDescriptor,
    technical_key: Option<&str>,
    use_auto_increment: bool,
    primary_key: Option<&str>,
) -> Option<String> {
    Some(format!(
        "ALTER TABLE {table} MODIFY {}",
        dialect.column_definition(column, technical_key, primary_key, use_auto_increment, true, false)
    ))
}
