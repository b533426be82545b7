mod csv_dir;
mod error;
mod json_sink;
mod types;


pub use csv_dir::CsvDirectory;
pub use error::*;
pub use json_sink::JsonFileSink;
pub use types::*;
