//! Row, cell and column types

mod column;
mod value;

pub use column::*;
pub use value::*;
