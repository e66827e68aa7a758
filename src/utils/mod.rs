pub mod debug;
pub mod input;

pub use input::{canonicalize_usage, read_request};
