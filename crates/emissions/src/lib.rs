pub mod aggregate;
pub mod closest;
mod error;
pub mod index;
pub mod pipeline;
mod settings;


pub use error::*;
pub use settings::*;
