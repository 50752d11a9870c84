pub mod json;
pub mod memory;

pub use json::{JsonConnector, JsonSource};
pub use memory::MemorySource;
