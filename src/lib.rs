//! Read-only decoder for legacy Metakit database containers.
//!
//! A container is decoded in one linear pass at open time: the header
//! and footer are walked to find the table of contents, the embedded
//! structure definition is parsed into tables and typed columns, and
//! every table's column data is decoded into memory. The resulting
//! [`Database`] is immutable and can be handed between threads freely.
//!
//! ```rust
//! let db = metakit::open("catalog.mk")?;
//! for table in db.tables() {
//!     println!("{}: {} rows", table.name, table.row_count());
//! }
//! let ages = db.table("People")?.rows();
//! # Ok::<(), metakit::MetakitError>(())
//! ```
//!
//! There is no write path: re-encoding, schema migration, and other
//! container revisions are out of scope.

mod codec;
mod column;
mod decode;
mod err;
mod reader;
mod schema;
mod table;

pub use codec::{
    read_packed_bytes, read_packed_int, read_packed_string, write_packed_bytes, write_packed_int,
    write_packed_string,
};
pub use column::Value;
pub use err::{FormatError, MetakitError};
pub use reader::{ByteOrder, Reader};
pub use schema::{Column, ColumnType};
pub use table::{Database, Table, TableRef};

use std::path::Path;

/// Reads and decodes the container at `path`.
pub fn open(path: impl AsRef<Path>) -> Result<Database, MetakitError> {
    let bytes = std::fs::read(path)?;
    from_bytes(&bytes)
}

/// Decodes a container already held in memory.
pub fn from_bytes(bytes: &[u8]) -> Result<Database, MetakitError> {
    decode::decode(bytes)
}
