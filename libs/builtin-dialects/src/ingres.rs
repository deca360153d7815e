use crate::common;
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, ODBC_BRIDGE_DRIVER, UNKNOWN_COLUMN_TYPE,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    FetchSize |
    Transactions |
    EmptyTransactions |
    Schemas |
    Views |
    BatchUpdates |
    SetMaxRows |
    SetLong |
    GetBlob |
    RepositoryStorage |
    TimestampToDateConversion
});

/// The symbolic instance used in the URL when no port is configured.
pub(crate) const DEFAULT_INSTANCE: &str = "II7";

pub struct IngresDialect;

impl DatabaseDialect for IngresDialect {
    fn id(&self) -> &'static str {
        "INGRES"
    }

    fn name(&self) -> &'static str {
        "Ingres"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    /// Ingres addresses instances by symbolic name, not by a fixed port.
    fn default_port(&self) -> Option<u16> {
        None
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        driver_class(access)
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        base_connection_url(self, params, DEFAULT_INSTANCE)
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
}

pub(crate) fn driver_class(access: AccessMethod) -> Option<&'static str> {
    match access {
        AccessMethod::Odbc => Some(ODBC_BRIDGE_DRIVER),
        AccessMethod::Native | AccessMethod::Jndi => Some("com.ingres.jdbc.IngresDriver"),
        _ => None,
    }
}

pub(crate) fn base_connection_url(
    dialect: &dyn DatabaseDialect,
    params: &ConnectionParams<'_>,
    default_instance: &str,
) -> Result<String, Error> {
    match params.access {
        AccessMethod::Native | AccessMethod::Jndi => {
            let port = match params.port {
                Some(port) => port.to_string(),
                None => default_instance.to_owned(),
            };

            Ok(format!(
                "jdbc:ingres://{}:{}/{}",
                params.host, port, params.database
            ))
        }
        AccessMethod::Odbc => Ok(common::odbc_url(params.database)),
        access => Err(Error::UnsupportedAccessMethod {
            dialect: dialect.id(),
            access,
        }),
    }
}

pub(crate) fn field_type(
    column: &ColumnDescriptor,
    technical_key: Option<&str>,
    primary_key: Option<&str>,
    _use_auto_increment: bool,
) -> String {
    let length = column.length.unwrap_or(0);
    let precision = column.precision.unwrap_or(0);

    match column.column_type {
        ColumnType::Date | ColumnType::Timestamp => "DATE".to_owned(),
        ColumnType::Boolean => "CHAR(1)".to_owned(),
        ColumnType::Number | ColumnType::Integer | ColumnType::BigNumber => {
            if column.is_key(technical_key, primary_key) {
                "INTEGER NOT NULL".to_owned()
            } else if precision == 0 {
                if length > 9 {
                    format!("DECIMAL({length})")
                } else {
                    "INTEGER".to_owned()
                }
            } else {
                format!("DECIMAL({length}, {precision})")
            }
        }
        ColumnType::String => {
            if length > 0 {
                format!("VARCHAR({length})")
            } else {
                "VARCHAR(2000)".to_owned()
            }
        }
        ColumnType::Binary => "LONG BYTE".to_owned(),
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
        "ALTER TABLE {table} ALTER COLUMN {}",
        dialect.column_definition(column, technical_key, primary_key, use_auto_increment, true, false)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn vendor_facts() {
        let dialect = IngresDialect;

        assert_eq!(dialect.default_port(), None);
        assert_eq!(
            dialect.driver_class(AccessMethod::Native),
            Some("com.ingres.jdbc.IngresDriver")
        );
    }

    #[test]
    fn connection_urls_fall_back_to_the_symbolic_instance() {
        let dialect = IngresDialect;

        let url = dialect
            .connection_url(&ConnectionParams::native("ingres.local", None, "demodb"))
            .unwrap();
        expect!["jdbc:ingres://ingres.local:II7/demodb"].assert_eq(&url);

        let url = dialect
            .connection_url(&ConnectionParams::native("ingres.local", Some(21071), "demodb"))
            .unwrap();
        expect!["jdbc:ingres://ingres.local:21071/demodb"].assert_eq(&url);
    }

    #[test]
    fn field_definitions() {
        let dialect = IngresDialect;
        let definition = |column: &ColumnDescriptor| {
            dialect.column_definition(column, None, None, false, true, false)
        };

        let column = ColumnDescriptor::new("created_at", ColumnType::Date);
        expect!["created_at DATE"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("amount", ColumnType::Number)
            .with_length(12)
            .with_precision(2);
        expect!["amount DECIMAL(12, 2)"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("payload", ColumnType::Binary);
        expect!["payload LONG BYTE"].assert_eq(&definition(&column));
    }

    #[test]
    fn alter_table_statements() {
        let dialect = IngresDialect;
        let column = ColumnDescriptor::new("description", ColumnType::String).with_length(255);

        let statement = dialect
            .modify_column_statement("audit_log", &column, None, false, None)
            .unwrap();
        expect!["ALTER TABLE audit_log ALTER COLUMN description VARCHAR(255)"].assert_eq(&statement);
    }
}
