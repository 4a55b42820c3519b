use std::sync::Arc;

use custdir_core::config::DirectoryConfig;
use custdir_core::directory::{self, CustomerFilter, PageRequest};
use custdir_core::{
    ApplicationError, CityCount, Customer, CustomerDraft, CustomerId, DomainError, NewCustomer,
};
use custdir_db::CustomerRepository;
use tokio::sync::Mutex;
use tracing::info;

/// Customer directory operations over an injected repository.
///
/// Reads go straight to the repository. Creates hold `create_lock` across
/// the load, admit, and replace steps so two creates in this process cannot
/// assign the same id or drop each other's append.
pub struct CustomerDirectory {
    repository: Arc<dyn CustomerRepository>,
    default_page_size: u32,
    max_page_size: u32,
    create_lock: Mutex<()>,
}

impl CustomerDirectory {
    pub fn new(repository: Arc<dyn CustomerRepository>, config: &DirectoryConfig) -> Self {
        Self {
            repository,
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
            create_lock: Mutex::new(()),
        }
    }

    pub fn page_request(
        &self,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<PageRequest, ApplicationError> {
        Ok(PageRequest::parse(page, limit, self.default_page_size, self.max_page_size)?)
    }

    pub async fn list(
        &self,
        filter: &CustomerFilter,
        page: PageRequest,
    ) -> Result<Vec<Customer>, ApplicationError> {
        let customers = self.repository.load_all().await?;
        Ok(directory::search(&customers, filter, page))
    }

    pub async fn get(&self, id: CustomerId) -> Result<Customer, ApplicationError> {
        let customers = self.repository.load_all().await?;
        directory::find(&customers, id)
            .cloned()
            .ok_or(ApplicationError::Domain(DomainError::CustomerNotFound { id: Some(id) }))
    }

    pub async fn list_cities(&self) -> Result<Vec<CityCount>, ApplicationError> {
        let customers = self.repository.load_all().await?;
        Ok(directory::city_counts(&customers))
    }

    pub async fn create(
        &self,
        payload: NewCustomer,
        correlation_id: &str,
    ) -> Result<Customer, ApplicationError> {
        let draft = CustomerDraft::try_from(payload)?;

        let _guard = self.create_lock.lock().await;
        let mut customers = self.repository.load_all().await?;
        let created = directory::admit(draft, &customers)?;
        customers.push(created.clone());
        self.repository.replace_all(&customers).await?;

        info!(
            event_name = "directory.customer.created",
            correlation_id = %correlation_id,
            customer_id = %created.id,
            customer_count = customers.len(),
            "customer created"
        );

        Ok(created)
    }

    /// Loads the full collection and reports its size.
    pub async fn record_count(&self) -> Result<usize, ApplicationError> {
        Ok(self.repository.load_all().await?.len())
    }
}
