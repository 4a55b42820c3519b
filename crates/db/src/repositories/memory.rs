use tokio::sync::RwLock;

use custdir_core::domain::customer::Customer;

use super::{CustomerRepository, RepositoryError};

#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self { customers: RwLock::new(customers) }
    }

    pub async fn snapshot(&self) -> Vec<Customer> {
        self.customers.read().await.clone()
    }
}

#[async_trait::async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn load_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.clone())
    }

    async fn replace_all(&self, customers: &[Customer]) -> Result<(), RepositoryError> {
        let mut stored = self.customers.write().await;
        *stored = customers.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use custdir_core::domain::customer::{Customer, CustomerId};

    use crate::repositories::{CustomerRepository, InMemoryCustomerRepository};

    #[tokio::test]
    async fn in_memory_repo_replaces_whole_collection() {
        let repo = InMemoryCustomerRepository::with_customers(vec![Customer {
            id: CustomerId(1),
            first_name: "Old".to_string(),
            last_name: "Record".to_string(),
            city: "Goa".to_string(),
            company: "Acme".to_string(),
        }]);
        let replacement = vec![Customer {
            id: CustomerId(2),
            first_name: "New".to_string(),
            last_name: "Record".to_string(),
            city: "Pune".to_string(),
            company: "Initech".to_string(),
        }];

        repo.replace_all(&replacement).await.expect("replace collection");
        let found = repo.load_all().await.expect("load collection");

        assert_eq!(found, replacement);
        assert_eq!(repo.snapshot().await, replacement);
    }

    #[tokio::test]
    async fn default_repo_is_empty() {
        let repo = InMemoryCustomerRepository::default();
        assert!(repo.load_all().await.expect("load collection").is_empty());
    }
}
