use sql_dialect::ColumnDescriptor;

/// Wrap a rendered type in the optional field name prefix and trailing
/// newline every dialect's `column_definition` shares.
pub(crate) fn wrap_definition(
    column: &ColumnDescriptor,
    type_text: &str,
    include_name: bool,
    include_newline: bool,
) -> String {
    let mut definition = String::new();

    if include_name {
        definition.push_str(&column.name);
        definition.push(' ');
    }

    definition.push_str(type_text);

    if include_newline {
        definition.push('\n');
    }

    definition
}

/// `host:port`, falling back to the dialect default and leaving the port
/// off entirely when neither is known.
pub(crate) fn host_and_port(host: &str, port: Option<u16>, default: Option<u16>) -> String {
    match port.or(default) {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    }
}

/// The JDBC-ODBC bridge URL against a DSN.
pub(crate) fn odbc_url(data_source: &str) -> String {
    format!("jdbc:odbc:{data_source}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_dialect::ColumnType;

    #[test]
    fn definition_wrapping() {
        let column = ColumnDescriptor::new("created_at", ColumnType::Date);

        assert_eq!(wrap_definition(&column, "TIMESTAMP", true, false), "created_at TIMESTAMP");
        assert_eq!(wrap_definition(&column, "TIMESTAMP", false, false), "TIMESTAMP");
        assert_eq!(wrap_definition(&column, "TIMESTAMP", true, true), "created_at TIMESTAMP\n");
    }

    #[test]
    fn host_and_port_fallbacks() {
        assert_eq!(host_and_port("db.local", Some(5433), Some(5432)), "db.local:5433");
        assert_eq!(host_and_port("db.local", None, Some(5432)), "db.local:5432");
        assert_eq!(host_and_port("db.local", None, None), "db.local");
    }
}
