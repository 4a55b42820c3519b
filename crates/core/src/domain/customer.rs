use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub i64);

impl CustomerId {
    /// Parses a path segment into an id. Anything that is not a plain integer
    /// yields `None`, which callers treat as an unknown customer.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self)
    }

    /// `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub company: String,
}

/// Creation payload as it arrives on the wire. Every field is optional so a
/// missing field is reported as a validation failure, not a decode failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl NewCustomer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        city: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            city: Some(city.into()),
            company: Some(company.into()),
        }
    }
}

/// A creation payload whose four fields are all present and non-blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub company: String,
}

impl TryFrom<NewCustomer> for CustomerDraft {
    type Error = DomainError;

    fn try_from(payload: NewCustomer) -> Result<Self, Self::Error> {
        let (Some(first_name), Some(last_name), Some(city), Some(company)) = (
            required(payload.first_name),
            required(payload.last_name),
            required(payload.city),
            required(payload.company),
        ) else {
            return Err(DomainError::MissingRequiredFields);
        };

        Ok(Self { first_name, last_name, city, company })
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCount {
    pub city: String,
    pub customer_count: usize,
}
