//! Pure directory rules: search filters, pagination, city aggregation and the
//! admission checks a new customer must pass. Nothing here touches storage.

use std::collections::HashMap;

use crate::domain::customer::{CityCount, Customer, CustomerDraft, CustomerId};
use crate::errors::DomainError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Case-insensitive substring filters. Absent and empty needles match
/// everything; present needles are combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    first_name: Option<String>,
    last_name: Option<String>,
    city: Option<String>,
}

impl CustomerFilter {
    pub fn new(
        first_name: Option<&str>,
        last_name: Option<&str>,
        city: Option<&str>,
    ) -> Self {
        Self { first_name: needle(first_name), last_name: needle(last_name), city: needle(city) }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.city.is_none()
    }

    pub fn matches(&self, customer: &Customer) -> bool {
        contains(&customer.first_name, self.first_name.as_deref())
            && contains(&customer.last_name, self.last_name.as_deref())
            && contains(&customer.city, self.city.as_deref())
    }
}

fn needle(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !value.is_empty()).map(str::to_lowercase)
}

fn contains(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(needle),
        None => true,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_PAGE_SIZE }
    }
}

impl PageRequest {
    /// Parses raw query values. Blank values fall back to the defaults,
    /// `limit` is capped at `max_limit`, and anything that is not a positive
    /// integer is rejected.
    pub fn parse(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u32,
        max_limit: u32,
    ) -> Result<Self, DomainError> {
        let page = parse_positive("page", page)?.unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive("limit", limit)?.unwrap_or(default_limit).min(max_limit.max(1));
        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }

    /// Returns `[offset, offset + limit)` of `items`, clamped to its bounds.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.limit as usize).min(items.len());
        &items[start..end]
    }
}

fn parse_positive(field: &'static str, raw: Option<&str>) -> Result<Option<u32>, DomainError> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(DomainError::InvalidPagination { field, value: raw.to_string() }),
    }
}

pub fn search(customers: &[Customer], filter: &CustomerFilter, page: PageRequest) -> Vec<Customer> {
    if filter.is_empty() {
        return page.slice(customers).to_vec();
    }

    let matching: Vec<&Customer> =
        customers.iter().filter(|customer| filter.matches(customer)).collect();
    page.slice(&matching).iter().map(|customer| (*customer).clone()).collect()
}

pub fn find(customers: &[Customer], id: CustomerId) -> Option<&Customer> {
    customers.iter().find(|customer| customer.id == id)
}

/// Groups customers by exact city name, preserving first-seen order.
pub fn city_counts(customers: &[Customer]) -> Vec<CityCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CityCount> = Vec::new();

    for customer in customers {
        match positions.get(customer.city.as_str()) {
            Some(&position) => counts[position].customer_count += 1,
            None => {
                positions.insert(customer.city.as_str(), counts.len());
                counts.push(CityCount { city: customer.city.clone(), customer_count: 1 });
            }
        }
    }

    counts
}

/// One past the highest id on record, or 1 for an empty collection.
pub fn next_customer_id(customers: &[Customer]) -> Result<CustomerId, DomainError> {
    match customers.iter().map(|customer| customer.id).max() {
        None => Ok(CustomerId(1)),
        Some(last) => last.next().ok_or(DomainError::IdSequenceExhausted { last }),
    }
}

/// Runs the referential checks for `draft` against the existing collection
/// and returns the record to append.
///
/// Both the city and the company must already appear somewhere in the
/// collection (exact match). Either reference missing is the same failure.
pub fn admit(draft: CustomerDraft, existing: &[Customer]) -> Result<Customer, DomainError> {
    let CustomerDraft { first_name, last_name, city, company } = draft;

    let known_city = existing.iter().any(|customer| customer.city == city);
    let known_company = existing.iter().any(|customer| customer.company == company);
    if !known_city || !known_company {
        return Err(DomainError::UnknownCityOrCompany { city, company });
    }

    let id = next_customer_id(existing)?;
    Ok(Customer { id, first_name, last_name, city, company })
}
