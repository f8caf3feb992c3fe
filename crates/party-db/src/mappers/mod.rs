//! Model to entity mappers
//!
//! Rows are validated on the way out of the database; a row that does not
//! map to a valid domain value is an `InvalidRecord` error.

mod nominee;
mod reaction;

pub use nominee::votes_by_handle;
