mod error;
mod retry;
mod types;
pub mod reqwest;


pub use error::*;
pub use retry::*;
pub use types::*;
