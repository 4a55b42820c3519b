pub mod config;
pub mod directory;
pub mod domain;
pub mod errors;

pub use directory::{CustomerFilter, PageRequest};
pub use domain::customer::{CityCount, Customer, CustomerDraft, CustomerId, NewCustomer};
pub use errors::{ApplicationError, DomainError, InterfaceError};
