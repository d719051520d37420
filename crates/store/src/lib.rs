pub mod fixtures;
pub mod json_file;
pub mod repository;

pub use json_file::JsonFileRepository;
pub use repository::{ProductRepository, RepositoryError};
