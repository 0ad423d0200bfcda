//! Document store adapters

mod json_file;
mod memory;

pub use json_file::JsonFileDocumentStore;
pub use memory::InMemoryDocumentStore;
