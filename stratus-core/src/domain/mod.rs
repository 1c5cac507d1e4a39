pub mod tool;
pub mod types;
