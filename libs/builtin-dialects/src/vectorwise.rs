//! VectorWise runs as an Ingres instance with its own symbolic port and a
//! columnar execution engine underneath the same SQL surface.

use crate::{common, ingres};
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ConnectionParams, DatabaseDialect, DialectCapabilities,
    DialectCapability, Error,
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
    TimestampToDateConversion
});

/// The symbolic instance used in the URL when no port is configured.
const DEFAULT_INSTANCE: &str = "VW7";

pub struct VectorWiseDialect;

impl DatabaseDialect for VectorWiseDialect {
    fn id(&self) -> &'static str {
        "VECTORWISE"
    }

    fn name(&self) -> &'static str {
        "VectorWise"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        None
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        ingres::driver_class(access)
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        ingres::base_connection_url(self, params, DEFAULT_INSTANCE)
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
            &ingres::field_type(column, technical_key, primary_key, use_auto_increment),
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
        ingres::modify_column_statement(self, table, column, technical_key, use_auto_increment, primary_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn ingres_surface_with_its_own_instance() {
        let dialect = VectorWiseDialect;

        assert_eq!(dialect.default_port(), None);
        assert_eq!(
            dialect.driver_class(AccessMethod::Native),
            Some("com.ingres.jdbc.IngresDriver")
        );

        let url = dialect
            .connection_url(&ConnectionParams::native("vw.local", None, "marts"))
            .unwrap();
        expect!["jdbc:ingres://vw.local:VW7/marts"].assert_eq(&url);
    }

    #[test]
    fn no_repository_storage_on_the_columnar_engine() {
        assert!(ingres::CAPABILITIES.contains(DialectCapability::RepositoryStorage));
        assert!(!CAPABILITIES.contains(DialectCapability::RepositoryStorage));
    }
}
