pub mod error;
pub mod mem;
pub mod postgres;
pub mod traits;

pub use error::*;
pub use mem::*;
pub use postgres::*;
pub use traits::*;
