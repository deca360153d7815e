//! The built-in database dialects and the registry to select them by
//! type code.
//!
//! Connection definitions store a vendor type code; the engine resolves
//! it here once and keeps the `&'static dyn DatabaseDialect` for the
//! lifetime of the connection. Unknown codes fall back to
//! [`sql_dialect::EmptyDialect`].

mod common;

mod cache;
mod greenplum;
mod gupta;
mod hive;
mod infobright;
mod ingres;
mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod sap_r3;
mod sybase;
mod vectorwise;
mod vertica;

use sql_dialect::{DatabaseDialect, DialectRegistry, EmptyDialect};

pub const CACHE: &'static dyn DatabaseDialect = &cache::CacheDialect;
pub const GREENPLUM: &'static dyn DatabaseDialect = &greenplum::GreenplumDialect;
pub const SQLBASE: &'static dyn DatabaseDialect = &gupta::GuptaDialect;
pub const HIVE: &'static dyn DatabaseDialect = &hive::HiveDialect;
pub const INFOBRIGHT: &'static dyn DatabaseDialect = &infobright::InfobrightDialect;
pub const INGRES: &'static dyn DatabaseDialect = &ingres::IngresDialect;
pub const MSSQL: &'static dyn DatabaseDialect = &mssql::MsSqlDialect;
pub const MYSQL: &'static dyn DatabaseDialect = &mysql::MySqlDialect;
pub const ORACLE: &'static dyn DatabaseDialect = &oracle::OracleDialect;
pub const POSTGRES: &'static dyn DatabaseDialect = &postgres::PostgresDialect;
pub const SAP_R3: &'static dyn DatabaseDialect = &sap_r3::SapR3Dialect;
pub const SYBASE: &'static dyn DatabaseDialect = &sybase::SybaseDialect;
pub const VECTORWISE: &'static dyn DatabaseDialect = &vectorwise::VectorWiseDialect;
pub const VERTICA: &'static dyn DatabaseDialect = &vertica::VerticaDialect;

pub const EMPTY: &'static dyn DatabaseDialect = &EmptyDialect;

pub static BUILTIN_DIALECTS: DialectRegistry<'static> = &[
    CACHE, GREENPLUM, SQLBASE, HIVE, INFOBRIGHT, INGRES, MSSQL, MYSQL, ORACLE, POSTGRES, SAP_R3,
    SYBASE, VECTORWISE, VERTICA,
];

/// Find a dialect by its type code.
pub fn find_dialect(type_code: &str) -> Option<&'static dyn DatabaseDialect> {
    BUILTIN_DIALECTS
        .iter()
        .find(|dialect| dialect.is_id(type_code))
        .copied()
}

/// Like [`find_dialect`], falling back to [`EmptyDialect`] for unknown
/// codes so callers always get a usable dialect object.
pub fn dialect_or_empty(type_code: &str) -> &'static dyn DatabaseDialect {
    find_dialect(type_code).unwrap_or(EMPTY)
}
