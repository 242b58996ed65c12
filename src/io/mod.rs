pub mod catalog_file;
pub mod receipt;

pub use catalog_file::*;
pub use receipt::*;
