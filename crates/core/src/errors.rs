use thiserror::Error;

use crate::domain::customer::CustomerId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("All fields are required")]
    MissingRequiredFields,
    #[error("City or Company does not exist")]
    UnknownCityOrCompany { city: String, company: String },
    #[error("Customer not found")]
    CustomerNotFound { id: Option<CustomerId> },
    #[error("page and limit must be positive integers")]
    InvalidPagination { field: &'static str, value: String },
    #[error("customer id sequence is exhausted after {last}")]
    IdSequenceExhausted { last: CustomerId },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    /// Text that is safe to hand back to a client. Internal details stay in
    /// the logs.
    pub fn user_message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } | Self::NotFound { message, .. } => message,
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::NotFound { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error @ DomainError::CustomerNotFound { .. }) => {
                Self::NotFound { message: error.to_string(), correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Domain(
                error @ (DomainError::MissingRequiredFields
                | DomainError::UnknownCityOrCompany { .. }
                | DomainError::InvalidPagination { .. }),
            ) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Domain(error @ DomainError::IdSequenceExhausted { .. }) => {
                Self::Internal { message: error.to_string(), correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Persistence(message) | ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::customer::CustomerId;
    use crate::errors::{ApplicationError, DomainError, InterfaceError};

    #[test]
    fn missing_fields_map_to_bad_request_with_client_message() {
        let interface =
            ApplicationError::from(DomainError::MissingRequiredFields).into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest { ref correlation_id, .. } if correlation_id == "req-1"
        ));
        assert_eq!(interface.user_message(), "All fields are required");
    }

    #[test]
    fn unknown_reference_maps_to_bad_request() {
        let interface = ApplicationError::from(DomainError::UnknownCityOrCompany {
            city: "Atlantis".to_owned(),
            company: "Initech".to_owned(),
        })
        .into_interface("req-2");

        assert!(matches!(interface, InterfaceError::BadRequest { .. }));
        assert_eq!(interface.user_message(), "City or Company does not exist");
    }

    #[test]
    fn unknown_customer_maps_to_not_found() {
        let interface =
            ApplicationError::from(DomainError::CustomerNotFound { id: Some(CustomerId(99)) })
                .into_interface("req-3");

        assert!(matches!(interface, InterfaceError::NotFound { .. }));
        assert_eq!(interface.user_message(), "Customer not found");
        assert_eq!(interface.correlation_id(), "req-3");
    }

    #[test]
    fn persistence_error_hides_detail_from_clients() {
        let interface =
            ApplicationError::Persistence("customers.json: permission denied".to_owned())
                .into_interface("req-4");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
        assert!(interface.to_string().contains("permission denied"));
    }

    #[test]
    fn exhausted_id_sequence_is_an_internal_error() {
        let interface = ApplicationError::from(DomainError::IdSequenceExhausted {
            last: CustomerId(i64::MAX),
        })
        .into_interface("req-5");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
        assert!(interface.to_string().contains(&i64::MAX.to_string()));
    }
}
