use crate::common;
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ColumnType, ConnectionParams, DatabaseDialect,
    DialectCapabilities, DialectCapability, Error, ODBC_BRIDGE_DRIVER, UNKNOWN_COLUMN_TYPE,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
    BitmapIndex |
    FetchSize |
    Transactions |
    Schemas |
    Views |
    BatchUpdates |
    SetMaxRows |
    SetLong |
    GetBlob |
    TimestampToDateConversion
});

pub struct CacheDialect;

impl DatabaseDialect for CacheDialect {
    fn id(&self) -> &'static str {
        "CACHE"
    }

    fn name(&self) -> &'static str {
        "Intersystems Cache"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        Some(1972)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        match access {
            AccessMethod::Odbc => Some(ODBC_BRIDGE_DRIVER),
            AccessMethod::Native | AccessMethod::Jndi => Some("com.intersys.jdbc.CacheDriver"),
            _ => None,
        }
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        match params.access {
            AccessMethod::Native | AccessMethod::Jndi => Ok(format!(
                "jdbc:Cache://{}/{}",
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
            "ALTER TABLE {table} ALTER COLUMN {}",
            self.column_definition(column, technical_key, primary_key, use_auto_increment, true, false)
        ))
    }
}

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
                "INT NOT NULL PRIMARY KEY".to_owned()
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
            if length > 0 {
                format!("VARCHAR({length})")
            } else {
                "VARCHAR(255)".to_owned()
            }
        }
        _ => UNKNOWN_COLUMN_TYPE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn vendor_facts() {
        let dialect = CacheDialect;

        assert_eq!(dialect.default_port(), Some(1972));
        assert_eq!(
            dialect.driver_class(AccessMethod::Native),
            Some("com.intersys.jdbc.CacheDriver")
        );
        assert!(!dialect.supports_auto_increment());
        assert!(!dialect.supports_repository_storage());
        assert!(dialect.supports_bitmap_index());
    }

    #[test]
    fn connection_urls() {
        let dialect = CacheDialect;

        let url = dialect
            .connection_url(&ConnectionParams::native("cache.local", None, "SAMPLES"))
            .unwrap();
        expect!["jdbc:Cache://cache.local:1972/SAMPLES"].assert_eq(&url);
    }

    #[test]
    fn field_definitions() {
        let dialect = CacheDialect;
        let definition = |column: &ColumnDescriptor| {
            dialect.column_definition(column, None, None, false, true, false)
        };

        let column = ColumnDescriptor::new("deleted", ColumnType::Boolean);
        expect!["deleted CHAR(1)"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("amount", ColumnType::Number)
            .with_length(12)
            .with_precision(2);
        expect!["amount DECIMAL(12, 2)"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("note", ColumnType::String);
        expect!["note VARCHAR(255)"].assert_eq(&definition(&column));

        let column = ColumnDescriptor::new("payload", ColumnType::Binary);
        expect!["payload UNKNOWN"].assert_eq(&definition(&column));
    }

    #[test]
    fn alter_table_statements() {
        let dialect = CacheDialect;
        let column = ColumnDescriptor::new("description", ColumnType::String).with_length(255);

        let statement = dialect
            .add_column_statement("audit_log", &column, None, false, None)
            .unwrap();
        expect!["ALTER TABLE audit_log ADD description VARCHAR(255)"].assert_eq(&statement);

        let statement = dialect
            .modify_column_statement("audit_log", &column, None, false, None)
            .unwrap();
        expect!["ALTER TABLE audit_log ALTER COLUMN description VARCHAR(255)"].assert_eq(&statement);
    }
}
