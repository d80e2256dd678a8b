pub mod error;
pub mod resolve;
pub mod subtree;
pub mod upsert;

pub use error::*;
pub use resolve::*;
pub use subtree::*;
pub use upsert::*;
