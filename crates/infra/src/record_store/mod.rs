//! Record store boundary.
//!
//! Handlers talk to a `dyn RecordStore`; the two backends differ only in
//! where the records live between requests.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryRecordStore;
pub use json_file::JsonFileRecordStore;
pub use r#trait::{RecordStore, StoreError};
