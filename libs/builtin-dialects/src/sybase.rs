use crate::common;
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, ODBC_BRIDGE_DRIVER, UNKNOWN_COLUMN_TYPE,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    AutoIncrement |
    FetchSize |
    Transactions |
    Catalogs |
    Schemas |
    Views |
    BatchUpdates |
    SetMaxRows |
    SetLong |
    GetBlob |
    FloatRoundingOnUpdate |
    RepositoryStorage |
    TimestampToDateConversion
});

pub struct SybaseDialect;

impl DatabaseDialect for SybaseDialect {
    fn id(&self) -> &'static str {
        "SYBASE"
    }

    fn name(&self) -> &'static str {
        "Sybase"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        Some(5001)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        match access {
            AccessMethod::Odbc => Some(ODBC_BRIDGE_DRIVER),
            AccessMethod::Native | AccessMethod::Jndi => Some("net.sourceforge.jtds.jdbc.Driver"),
            _ => None,
        }
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        match params.access {
            AccessMethod::Native | AccessMethod::Jndi => Ok(format!(
                "jdbc:jtds:sybase://{}/{}",
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

    fn drop_column_statement(&self, table: &str, column: &ColumnDescriptor) -> Option<String> {
        Some(format!("ALTER TABLE {table} DROP COLUMN {}", column.name))
    }
}

/// jTDS against ASE: DATETIME dates, CHAR(1) booleans, IDENTITY keys and
/// a 2048 character VARCHAR ceiling.
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
                    "INTEGER IDENTITY NOT NULL".to_owned()
                } else {
                    "INTEGER NOT NULL PRIMARY KEY".to_owned()
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
            if length > 2048 {
                "TEXT".to_owned()
            } else if length > 0 {
                format!("VARCHAR({length})")
            } else {
                "VARCHAR(100)".to_owned()
            }
        }
        ColumnType::Binary => "IMAGE".to_owned(),
        _ => UNKNOWN_COLUMN_TYPE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn vendor_facts() {
        let dialect = SybaseDialect;

        assert_eq!(dialect.default_port(), Some(5001));
        assert_eq!(
            dialect.driver_class(AccessMethod::Native),
            Some("net.sourceforge.jtds.jdbc.Driver")
        );
    }

    #[test]
    fn connection_urls() {
        let dialect = SybaseDialect;

        let url = dialect
            .connection_url(&ConnectionParams::native("ase.local", Some(5002), "prod"))
            .unwrap();
        expect!["jdbc:jtds:sybase://ase.local:5002/prod"].assert_eq(&url);
    }

    #[test]
    fn field_definitions() {
        let dialect = SybaseDialect;
        let definition = |column: &ColumnDescriptor| {
            dialect.column_definition(column, None, None, false, true, false)
        };

        let column = ColumnDescriptor::new("created_at", ColumnType::Date);
        expect!["created_at DATETIME"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("code", ColumnType::String).with_length(4000);
        expect!["code TEXT"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("id_run", ColumnType::Integer);
        let keyed = dialect.column_definition(&column, Some("id_run"), None, true, true, false);
        expect!["id_run INTEGER IDENTITY NOT NULL"].assert_eq(&keyed);
    }

    #[test]
    fn alter_table_statements() {
        let dialect = SybaseDialect;
        let column = ColumnDescriptor::new("description", ColumnType::String).with_length(255);

        let statement = dialect
            .modify_column_statement("audit_log", &column, None, false, None)
            .unwrap();
        expect!["ALTER TABLE audit_log MODIFY description VARCHAR(255)"].assert_eq(&statement);
    }
}
