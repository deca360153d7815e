use enumflags2::{bitflags, BitFlags};

/// The SQL feature surface of a dialect.
///
/// Dialects declare their full set with `enumflags2::make_bitflags!`; the
/// convenience predicates on [`DatabaseDialect`](crate::DatabaseDialect)
/// read from it.
#[bitflags]
#[repr(u64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectCapability {
    /// Auto increment (identity) key columns.
    AutoIncrement,
    BitmapIndex,
    /// The JDBC driver honours a fetch size hint.
    FetchSize,
    Transactions,
    /// Committing a transaction with no pending statements is harmless.
    EmptyTransactions,
    Catalogs,
    Schemas,
    Sequences,
    Views,
    Synonyms,
    /// A real BOOLEAN column type, as opposed to CHAR(1) emulation.
    BooleanType,
    /// A TIMESTAMP type distinct from DATE.
    TimestampType,
    BatchUpdates,
    /// Individual row errors can be extracted from a failed batch.
    ErrorHandlingOnBatchUpdates,
    SetMaxRows,
    SetLong,
    SetCharacterStream,
    GetBlob,
    FloatRoundingOnUpdate,
    /// Statement metadata is available before execution.
    PreparedStatementMetadata,
    NewLinesInStatements,
    /// The dialect can host the engine's own repository tables.
    RepositoryStorage,
    /// Connection options may be appended to the URL.
    OptionsInUrl,
    TimestampToDateConversion,
}

/// A set of capability flags.
pub type DialectCapabilities = BitFlags<DialectCapability>;
