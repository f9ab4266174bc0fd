//! # Core Module
//!
//! Stateless building blocks of the viewer: the record format and everything
//! that can be decided once, at load time.
//!
//! - [`constants`] - Column offset tables (`<FIELD>_START` / `<FIELD>_END`) for a record format
//! - [`schema`] - Validated, ordered field ranges and the column-to-field index
//! - [`record`] - Record kinds and the classifier turning raw lines into padded records
//! - [`io`] - Reading raw lines from files and readers
//!
//! Nothing in here knows about scrolling, filters or the cursor; that state lives
//! in [`crate::engine`].

pub mod constants;
pub mod io;
pub mod record;
pub mod schema;
