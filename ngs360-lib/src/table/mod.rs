//! The tabular data controller.
//!
//! A [`TableController`] binds caller-supplied rows and column descriptors
//! to sort, filter, pagination and visibility state, and produces a
//! [`TableView`] describing what to draw.

mod controller;
mod events;
mod state;
mod view;

pub use controller::*;
pub use events::*;
pub use state::*;
pub use view::*;
