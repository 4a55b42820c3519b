use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use custdir_core::domain::customer::Customer;
use custdir_core::errors::ApplicationError;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileCustomerRepository;
pub use memory::InMemoryCustomerRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("could not read `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        ApplicationError::Persistence(value.to_string())
    }
}

/// Whole-collection storage for customer records.
///
/// Reads return the full ordered collection and writes replace it wholesale.
/// There is no partial update; callers that need read-modify-write atomicity
/// must serialize around the pair of calls themselves.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn load_all(&self) -> Result<Vec<Customer>, RepositoryError>;
    async fn replace_all(&self, customers: &[Customer]) -> Result<(), RepositoryError>;
}
