mod file_storage;

pub(crate) use file_storage::{read_json, write_json};
pub use file_storage::{FileStorage, Result, StorageError};
