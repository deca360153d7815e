//! SAP R/3 is reached through a dedicated plugin, not JDBC: there is no
//! driver, no URL and no DDL to generate.

use sql_dialect::{
    AccessMethod, AccessMethods, ColumnDescriptor, ConnectionParams, DatabaseDialect,
    DialectCapabilities, Error,
};

pub struct SapR3Dialect;

impl DatabaseDialect for SapR3Dialect {
    fn id(&self) -> &'static str {
        "SAPR3"
    }

    fn name(&self) -> &'static str {
        "SAP R/3 System"
    }

    fn capabilities(&self) -> DialectCapabilities {
        DialectCapabilities::EMPTY
    }

    fn access_methods(&self) -> AccessMethods {
        AccessMethod::Plugin.into()
    }

    fn default_port(&self) -> Option<u16> {
        None
    }

    fn driver_class(&self, _access: AccessMethod) -> Option<&'static str> {
        None
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        Err(Error::UnsupportedAccessMethod {
            dialect: self.id(),
            access: params.access,
        })
    }

    fn column_definition(
        &self,
        _column: &ColumnDescriptor,
        _technical_key: Option<&str>,
        _primary_key: Option<&str>,
        _use_auto_increment: bool,
        _include_name: bool,
        _include_newline: bool,
    ) -> String {
        String::new()
    }

    fn add_column_statement(
        &self,
        _table: &str,
        _column: &ColumnDescriptor,
        _technical_key: Option<&str>,
        _use_auto_increment: bool,
        _primary_key: Option<&str>,
    ) -> Option<String> {
        None
    }

    fn modify_column_statement(
        &self,
        _table: &str,
        _column: &ColumnDescriptor,
        _technical_key: Option<&str>,
        _use_auto_increment: bool,
        _primary_key: Option<&str>,
    ) -> Option<String> {
        None
    }

    fn drop_column_statement(&self, _table: &str, _column: &ColumnDescriptor) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_dialect::ColumnType;

    #[test]
    fn nothing_is_generated_for_a_plugin_only_system() {
        let dialect = SapR3Dialect;
        let column = ColumnDescriptor::new("MANDT", ColumnType::String).with_length(3);

        assert_eq!(dialect.access_methods(), AccessMethods::from(AccessMethod::Plugin));
        assert_eq!(dialect.driver_class(AccessMethod::Plugin), None);
        assert_eq!(dialect.add_column_statement("T001", &column, None, false, None), None);
        assert_eq!(dialect.modify_column_statement("T001", &column, None, false, None), None);
        assert_eq!(dialect.drop_column_statement("T001", &column), None);
        assert!(!dialect.supports_transactions());

        let err = dialect
            .connection_url(&ConnectionParams::native("sap.local", None, "PRD"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedAccessMethod {
                dialect: "SAPR3",
                access: AccessMethod::Native,
            }
        );
    }
}
