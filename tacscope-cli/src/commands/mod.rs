pub mod analyze;
pub mod cfg;
pub mod common;
