use thiserror::Error;

/// Low-level violations of the container format, carrying the bytes or
/// tokens that triggered them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid magic bytes {0:?}, expected \"JL\" or \"LJ\"")]
    InvalidMagic([u8; 2]),
    #[error("container validity marker is `{0}`, expected 26")]
    InvalidContainer(u8),
    #[error("unsupported header type `{0}`")]
    UnsupportedHeader(u8),
    #[error("seek to offset {offset} outside container of {len} bytes")]
    OutOfBounds { offset: u64, len: u64 },
    #[error("container truncated: needed {needed} bytes, {remaining} remain")]
    Truncated { needed: u64, remaining: u64 },
    #[error("invalid packed integer marker `{0:#04x}`")]
    InvalidPackedInt(u8),
    #[error("unknown column type marker `{0}`")]
    UnknownColumnType(String),
}

/// Error surfaced by [`open`](crate::open)/[`from_bytes`](crate::from_bytes)
/// and the query methods on [`Database`](crate::Database).
///
/// Decode failures identify the stage that hit the underlying
/// [`FormatError`]; no partially decoded database is ever returned.
#[derive(Error, Debug)]
pub enum MetakitError {
    #[error("locating table of contents")]
    Locate(#[source] FormatError),
    #[error("parsing schema")]
    Schema(#[source] FormatError),
    #[error("decoding column `{column}` of table `{table}`")]
    Column {
        table: String,
        column: String,
        #[source]
        source: FormatError,
    },
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
