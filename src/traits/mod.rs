//! Trait definitions for corganize operations.

mod list;

pub use list::List;
