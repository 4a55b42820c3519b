use std::collections::HashSet;

use custdir_core::domain::customer::{Customer, CustomerId};

use crate::repositories::{CustomerRepository, RepositoryError};

struct SeedCustomer {
    first_name: &'static str,
    last_name: &'static str,
    city: &'static str,
    company: &'static str,
}

const SEED_CUSTOMERS: &[SeedCustomer] = &[
    SeedCustomer { first_name: "Aarav", last_name: "Sharma", city: "Ahmedabad", company: "SIT" },
    SeedCustomer { first_name: "Priya", last_name: "Patel", city: "Surat", company: "Infosys" },
    SeedCustomer { first_name: "Rahul", last_name: "Shah", city: "Ahmedabad", company: "TCS" },
    SeedCustomer { first_name: "Sneha", last_name: "Mehta", city: "Vadodara", company: "Wipro" },
    SeedCustomer { first_name: "Vikram", last_name: "Desai", city: "Rajkot", company: "SIT" },
    SeedCustomer { first_name: "Ananya", last_name: "Joshi", city: "Surat", company: "TCS" },
    SeedCustomer { first_name: "Karan", last_name: "Trivedi", city: "Ahmedabad", company: "Infosys" },
    SeedCustomer { first_name: "Meera", last_name: "Pandya", city: "Gandhinagar", company: "Wipro" },
    SeedCustomer { first_name: "Rohan", last_name: "Bhatt", city: "Vadodara", company: "SIT" },
    SeedCustomer { first_name: "Isha", last_name: "Vyas", city: "Rajkot", company: "TCS" },
    SeedCustomer { first_name: "Arjun", last_name: "Parikh", city: "Ahmedabad", company: "Wipro" },
    SeedCustomer { first_name: "Diya", last_name: "Shukla", city: "Surat", company: "SIT" },
    SeedCustomer { first_name: "Nikhil", last_name: "Dave", city: "Gandhinagar", company: "Infosys" },
    SeedCustomer { first_name: "Pooja", last_name: "Rana", city: "Vadodara", company: "TCS" },
    SeedCustomer { first_name: "Siddharth", last_name: "Modi", city: "Ahmedabad", company: "SIT" },
    SeedCustomer { first_name: "Tanvi", last_name: "Chauhan", city: "Rajkot", company: "Wipro" },
    SeedCustomer { first_name: "Yash", last_name: "Solanki", city: "Surat", company: "Infosys" },
    SeedCustomer { first_name: "Kavya", last_name: "Gohil", city: "Bhavnagar", company: "TCS" },
    SeedCustomer { first_name: "Harsh", last_name: "Jadeja", city: "Ahmedabad", company: "Infosys" },
    SeedCustomer { first_name: "Riya", last_name: "Amin", city: "Vadodara", company: "Wipro" },
    SeedCustomer { first_name: "Dev", last_name: "Kothari", city: "Gandhinagar", company: "SIT" },
    SeedCustomer { first_name: "Nisha", last_name: "Sharma", city: "Surat", company: "TCS" },
    SeedCustomer { first_name: "Manav", last_name: "Thakkar", city: "Bhavnagar", company: "Infosys" },
    SeedCustomer { first_name: "Aditi", last_name: "Rathod", city: "Ahmedabad", company: "Wipro" },
];

/// Deterministic seed dataset for a fresh customers file.
///
/// Ids are dense (1..=n) and every city and company appears more than once
/// so the referential checks on create have something to match against.
pub struct SeedDataset;

impl SeedDataset {
    pub fn customers() -> Vec<Customer> {
        SEED_CUSTOMERS
            .iter()
            .zip(1..)
            .map(|(seed, id)| Customer {
                id: CustomerId(id),
                first_name: seed.first_name.to_string(),
                last_name: seed.last_name.to_string(),
                city: seed.city.to_string(),
                company: seed.company.to_string(),
            })
            .collect()
    }

    pub fn cities() -> Vec<&'static str> {
        let mut seen = HashSet::new();
        SEED_CUSTOMERS.iter().map(|seed| seed.city).filter(|city| seen.insert(*city)).collect()
    }

    /// Replace whatever the repository holds with the seed dataset.
    pub async fn load(repo: &dyn CustomerRepository) -> Result<SeedResult, RepositoryError> {
        let customers = Self::customers();
        repo.replace_all(&customers).await?;

        Ok(SeedResult { customers_seeded: customers.len(), cities: Self::cities() })
    }

    /// Verify that the repository content matches the seed contract.
    pub async fn verify(repo: &dyn CustomerRepository) -> Result<VerificationResult, RepositoryError> {
        let stored = repo.load_all().await?;
        let expected = Self::customers();
        let mut checks = Vec::new();

        checks.push(("customer-count", stored.len() == expected.len()));

        let dense_ids =
            stored.iter().zip(1..).all(|(customer, position)| customer.id == CustomerId(position));
        checks.push(("dense-ids", dense_ids));

        let stored_cities: HashSet<&str> =
            stored.iter().map(|customer| customer.city.as_str()).collect();
        let all_cities = Self::cities().iter().all(|city| stored_cities.contains(city));
        checks.push(("seed-cities", all_cities));

        checks.push(("seed-records", stored == expected));

        let all_present = checks.iter().all(|(_, passed)| *passed);
        Ok(VerificationResult { all_present, checks })
    }
}

#[derive(Debug)]
pub struct SeedResult {
    pub customers_seeded: usize,
    pub cities: Vec<&'static str>,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
