//! Positional stream adapters.
//!
//! Sequential read/write cursors over a single store object, so transfers
//! larger than memory can be expressed as repeated bounded reads and
//! writes against one key. Each adapter is scoped to exactly one object
//! for its lifetime and never owns the store connection it borrows.

mod read;
mod write;

pub use read::ObjectReader;
pub use write::ObjectWriter;
