use crate::{
    AccessMethod, AccessMethods, ColumnDescriptor, ConnectionParams, DatabaseDialect,
    DialectCapabilities, Error,
};

/// A [DatabaseDialect](/trait.DatabaseDialect.html) implementor meant to
/// be used when a connection's type code matches no known dialect.
///
/// It advertises nothing: no access methods, no driver, no DDL.
pub struct EmptyDialect;

impl DatabaseDialect for EmptyDialect {
    fn id(&self) -> &'static str {
        "NONE"
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<EmptyDialect>()
    }

    fn capabilities(&self) -> DialectCapabilities {
        DialectCapabilities::EMPTY
    }

    fn access_methods(&self) -> AccessMethods {
        AccessMethods::EMPTY
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
