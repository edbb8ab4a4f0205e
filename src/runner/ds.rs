pub mod error;
pub mod operations;
pub mod structure;
pub mod value;
