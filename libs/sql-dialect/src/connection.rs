use enumflags2::{bitflags, BitFlags};
use std::fmt;

/// How a connection to the database is made.
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMethod {
    /// The vendor's own JDBC driver.
    Native,
    /// The JDBC-ODBC bridge against a DSN.
    Odbc,
    /// Oracle call interface.
    Oci,
    /// A container-managed datasource looked up by name.
    Jndi,
    /// A connection handled entirely by an external plugin.
    Plugin,
}

impl fmt::Display for AccessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessMethod::Native => "native",
            AccessMethod::Odbc => "ODBC",
            AccessMethod::Oci => "OCI",
            AccessMethod::Jndi => "JNDI",
            AccessMethod::Plugin => "plugin",
        };

        f.write_str(name)
    }
}

/// The access methods a dialect advertises.
pub type AccessMethods = BitFlags<AccessMethod>;

/// The bridge driver shared by every dialect that allows ODBC access.
pub const ODBC_BRIDGE_DRIVER: &str = "sun.jdbc.odbc.JdbcOdbcDriver";

/// Everything a dialect needs to render a connection URL.
///
/// `port` is `None` when the connection definition leaves it blank; the
/// dialect falls back to its default port or, where the vendor uses one, a
/// symbolic instance name.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionParams<'a> {
    pub access: AccessMethod,
    pub host: &'a str,
    pub port: Option<u16>,
    pub database: &'a str,
    /// Extra driver options to carry in the URL, in definition order.
    pub options: &'a [(&'a str, &'a str)],
}

impl<'a> ConnectionParams<'a> {
    pub fn native(host: &'a str, port: Option<u16>, database: &'a str) -> Self {
        ConnectionParams {
            access: AccessMethod::Native,
            host,
            port,
            database,
            options: &[],
        }
    }

    pub fn odbc(data_source: &'a str) -> Self {
        ConnectionParams {
            access: AccessMethod::Odbc,
            host: "",
            port: None,
            database: data_source,
            options: &[],
        }
    }

    pub fn with_access(mut self, access: AccessMethod) -> Self {
        self.access = access;
        self
    }

    pub fn with_options(mut self, options: &'a [(&'a str, &'a str)]) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_cover_the_common_shapes() {
        let params = ConnectionParams::native("db.local", Some(5432), "warehouse");
        assert_eq!(params.access, AccessMethod::Native);
        assert_eq!(params.port, Some(5432));

        let params = ConnectionParams::odbc("warehouse_dsn");
        assert_eq!(params.access, AccessMethod::Odbc);
        assert_eq!(params.database, "warehouse_dsn");

        let options = [("characterEncoding", "UTF-8")];
        let params = ConnectionParams::native("db.local", None, "warehouse").with_options(&options);
        assert_eq!(params.options.len(), 1);
    }
}
