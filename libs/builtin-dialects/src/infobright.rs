//! Infobright is a columnar engine behind the MySQL protocol: same driver
//! and SQL surface, its own port, and no auto increment keys.

use crate::{common, mysql};
use sql_dialect::{
    AccessMethod, ColumnDescriptor, ConnectionParams, DatabaseDialect, DialectCapabilities,
    DialectCapability, Error, Quoted,
};

pub(crate) const CAPABILITIES: DialectCapabilities = enumflags2::make_bitflags!(DialectCapability::{
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

pub struct InfobrightDialect;

impl DatabaseDialect for InfobrightDialect {
    fn id(&self) -> &'static str {
        "INFOBRIGHT"
    }

    fn name(&self) -> &'static str {
        "Infobright"
    }

    fn capabilities(&self) -> DialectCapabilities {
        CAPABILITIES
    }

    fn default_port(&self) -> Option<u16> {
        Some(5029)
    }

    fn driver_class(&self, access: AccessMethod) -> Option<&'static str> {
        mysql::driver_class(access)
    }

    fn base_connection_url(&self, params: &ConnectionParams<'_>) -> Result<String, Error> {
        mysql::base_connection_url(self, params)
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
            &mysql::field_type(column, technical_key, primary_key, use_auto_increment),
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
        mysql::modify_column_statement(self, table, column, technical_key, use_auto_increment, primary_key)
    }

    fn limit_clause(&self, rows: usize) -> String {
        format!(" LIMIT {rows}")
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        mysql::RESERVED_WORDS
    }

    fn defaults_to_uppercase(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn mysql_surface_with_its_own_port() {
        let dialect = InfobrightDialect;

        assert_eq!(dialect.default_port(), Some(5029));
        assert_eq!(
            dialect.driver_class(AccessMethod::Native),
            Some("org.gjt.mm.mysql.Driver")
        );
        assert!(!dialect.supports_auto_increment());

        let url = dialect
            .connection_url(&ConnectionParams::native("bright.local", None, "marts"))
            .unwrap();
        expect!["jdbc:mysql://bright.local:5029/marts"].assert_eq(&url);
    }
}
