use crate::common;
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, ODBC_BRIDGE_DRIVER, UNKNOWN_COLUMN_TYPE,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    FetchSize |
    Transactions |
    Views |
    SetMaxRows |
    SetLong |
    RepositoryStorage |
    TimestampToDateConversion
});

pub struct GuptaDialect;

impl DatabaseDialect for GuptaDialect {
    fn id(&self) -> &'static str {
        "SQLBASE"
    }

    fn name(&self) -> &'static str {
        "Gupta SQLBase"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        Some(2155)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        match access {
            AccessMethod::Odbc => Some(ODBC_BRIDGE_DRIVER),
            AccessMethod::Native | AccessMethod::Jndi => Some("jdbc.gupta.sqlbase.SqlbaseDriver"),
            _ => None,
        }
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        match params.access {
            AccessMethod::Native | AccessMethod::Jndi => Ok(format!(
                "jdbc:sqlbase://{}/{}",
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
        Some(format!(
            "ALTER TABLE {table} MODIFY {}",
            self.column_definition(column, technical_key, primary_key, use_auto_increment, true, false)
        ))
    }
}

/// SQLBase has no bignum type: everything that is not an integer becomes
/// DOUBLE PRECISION, and strings over 254 characters spill into LONG
/// VARCHAR.
fn field_type(
    column: &ColumnDescriptor,
    technical_key: Option<&str>,
    primary_key: Option<&str>,
    _use_auto_increment: bool,
) -> String {
    let length = column.length.unwrap_or(0);
    let precision = column.precision.unwrap_or(0);

    match column.column_type {
        ColumnType::Date | ColumnType::Timestamp => "DATETIME NULL".to_owned(),
        ColumnType::Boolean => "CHAR(1)".to_owned(),
        ColumnType::Number | ColumnType::Integer | ColumnType::BigNumber => {
            if column.is_key(technical_key, primary_key) {
                "INTEGER NOT NULL".to_owned()
            } else if precision == 0 && length <= 9 {
                "INTEGER".to_owned()
            } else {
                "DOUBLE PRECISION".to_owned()
            }
        }
        ColumnType::String => {
            if length > 254 {
                "LONG VARCHAR".to_owned()
            } else if length > 0 {
                format!("VARCHAR({length})")
            } else {
                "VARCHAR(254)".to_owned()
            }
        }
        _ => UNKNOWN_COLUMN_TYPE.to_owned(),
    }
}
