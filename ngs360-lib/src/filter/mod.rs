//! Column and global filtering.
//!
//! Filters are case-insensitive substring tests. A column filter is either a
//! plain string or a list of conditions joined by `AND`/`OR`.

mod condition;
mod matcher;

pub use condition::*;
pub use matcher::*;
