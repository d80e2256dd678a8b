pub mod node;
pub mod property;
pub mod subtree;

pub use node::*;
pub use property::*;
pub use subtree::*;

/// Store-assigned node identifier
pub type NodeId = i32;

/// Store-assigned property identifier
pub type PropertyId = i32;
