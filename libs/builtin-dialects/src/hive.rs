use crate::common;
use sql_dialect::{
    AccessMethod, AccessMethods, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, Quoted, UNKNOWN_COLUMN_TYPE,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    FetchSize |
    Schemas |
    Views |
    BooleanType |
    NewLinesInStatements
});

const RESERVED_WORDS: &[&str] = &[
    "ALL",
    "ALTER",
    "AND",
    "ARRAY",
    "AS",
    "BETWEEN",
    "BIGINT",
    "BOOLEAN",
    "BY",
    "CASE",
    "CAST",
    "COLUMN",
    "CREATE",
    "CROSS",
    "CURRENT",
    "DATABASE",
    "DISTINCT",
    "DOUBLE",
    "DROP",
    "ELSE",
    "EXISTS",
    "FALSE",
    "FLOAT",
    "FROM",
    "FULL",
    "FUNCTION",
    "GROUP",
    "HAVING",
    "IF",
    "IN",
    "INNER",
    "INSERT",
    "INT",
    "INTO",
    "IS",
    "JOIN",
    "LEFT",
    "LIKE",
    "MAP",
    "NOT",
    "NULL",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "PARTITION",
    "SELECT",
    "TABLE",
    "THEN",
    "TRUE",
    "UNION",
    "WHERE",
    "WITH",
];

pub struct HiveDialect;

impl DatabaseDialect for HiveDialect {
    fn id(&self) -> &'static str {
        "HIVE"
    }

    fn name(&self) -> &'static str {
        "Hadoop Hive"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn access_methods(&self) -> AccessMethods {
        AccessMethod::Native | AccessMethod::Jndi
    }

    fn default_port(&self) -> Option<u16> {
        Some(10000)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        match access {
            AccessMethod::Native | AccessMethod::Jndi => {
                Some("org.apache.hadoop.hive.jdbc.HiveDriver")
            }
            _ => None,
        }
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        match params.access {
            AccessMethod::Native | AccessMethod::Jndi => Ok(format!(
                "jdbc:hive://{}/{}",
                common::host_and_port(params.host, params.port, self.default_port()),
                params.database
            )),
            access => Err(Error::UnsupportedAccessMethod {
                dialect: self.id(),
                access,
            }),
        }
    }

    fn quote<'a>(&self, ident: &'a str) -> Quoted<&'a str> {
        Quoted::Plain(ident)
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
            "ALTER TABLE {table} ADD COLUMNS ( {} )",
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
            "ALTER TABLE {table} CHANGE {} {}",
            column.name,
            self.column_definition(column, technical_key, primary_key, use_auto_increment, true, false)
        ))
    }

    /// Dropping a single column means rewriting the column list with
    /// REPLACE COLUMNS, which needs the full table layout.
    fn drop_column_statement(&self, _table: &str, _column: &ColumnDescriptor) -> Option<String> {
        None
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
}

/// No keys and no fixed-size strings: everything textual is STRING, and
/// numerics pick the narrowest of INT, BIGINT, FLOAT and DOUBLE.
fn field_type(
    column: &ColumnDescriptor,
    _technical_key: Option<&str>,
    _primary_key: Option<&str>,
    _use_auto_increment: bool,
) -> String {
    let length = column.length.unwrap_or(0);
    let precision = column.precision.unwrap_or(0);

    match column.column_type {
        ColumnType::Boolean => "BOOLEAN".to_owned(),
        ColumnType::Date => "DATE".to_owned(),
        ColumnType::Timestamp => "TIMESTAMP".to_owned(),
        ColumnType::Integer => "INT".to_owned(),
        ColumnType::Number | ColumnType::BigNumber => {
            if precision == 0 {
                if length > 9 {
                    "BIGINT".to_owned()
                } else {
                    "INT".to_owned()
                }
            } else if length > 9 {
                "DOUBLE".to_owned()
            } else {
                "FLOAT".to_owned()
            }
        }
        ColumnType::String => "STRING".to_owned(),
        ColumnType::Binary => "BINARY".to_owned(),
        _ => UNKNOWN_COLUMN_TYPE.to_owned(),
    }
}
