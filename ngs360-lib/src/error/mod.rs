//! Error types

mod params;
mod table;
mod wizard;

pub use params::*;
pub use table::*;
pub use wizard::*;
