mod client;
mod explorer;
mod rpc;

pub use client::*;
pub use explorer::*;
pub use rpc::*;
