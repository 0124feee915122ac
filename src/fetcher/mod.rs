//! Fetch cycle orchestration: catalog loading, collection building and
//! session state.

mod catalog;
mod collection;
mod session;

pub use catalog::*;
pub use collection::*;
pub use session::*;
