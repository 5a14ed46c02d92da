//! Pagination state and the policy behind the pagination footer.

mod footer;
mod policy;
mod state;

pub use footer::*;
pub use policy::*;
pub use state::*;
