use std::path::{Path, PathBuf};

use custdir_core::domain::customer::Customer;

use super::{CustomerRepository, RepositoryError};

/// Stores the collection as a single pretty-printed JSON array.
#[derive(Clone, Debug)]
pub struct JsonFileCustomerRepository {
    path: PathBuf,
}

impl JsonFileCustomerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl CustomerRepository for JsonFileCustomerRepository {
    async fn load_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| RepositoryError::Read { path: self.path.clone(), source })?;

        serde_json::from_slice::<Vec<Customer>>(&raw)
            .map_err(|error| RepositoryError::Decode(format!("{}: {error}", self.path.display())))
    }

    async fn replace_all(&self, customers: &[Customer]) -> Result<(), RepositoryError> {
        let encoded = serde_json::to_string_pretty(customers)
            .map_err(|error| RepositoryError::Encode(error.to_string()))?;

        tokio::fs::write(&self.path, encoded)
            .await
            .map_err(|source| RepositoryError::Write { path: self.path.clone(), source })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use custdir_core::domain::customer::{Customer, CustomerId};

    use crate::repositories::{CustomerRepository, JsonFileCustomerRepository, RepositoryError};

    fn customer(id: i64, city: &str) -> Customer {
        Customer {
            id: CustomerId(id),
            first_name: format!("First{id}"),
            last_name: "Doe".to_string(),
            city: city.to_string(),
            company: "Acme".to_string(),
        }
    }

    #[tokio::test]
    async fn replace_all_then_load_all_preserves_order() {
        let dir = TempDir::new().expect("tempdir");
        let repo = JsonFileCustomerRepository::new(dir.path().join("customers.json"));
        let customers = vec![customer(3, "Pune"), customer(1, "Goa"), customer(2, "Pune")];

        repo.replace_all(&customers).await.expect("write collection");
        let loaded = repo.load_all().await.expect("read collection");

        assert_eq!(loaded, customers);
    }

    #[tokio::test]
    async fn file_is_pretty_printed_json_array() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customers.json");
        let repo = JsonFileCustomerRepository::new(&path);

        repo.replace_all(&[customer(1, "Goa")]).await.expect("write collection");

        let raw = fs::read_to_string(&path).expect("read raw file");
        assert!(raw.starts_with("[\n  {\n    \"id\": 1,"), "unexpected layout: {raw}");
    }

    #[tokio::test]
    async fn reads_hand_written_files() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customers.json");
        fs::write(
            &path,
            r#"[{"id":1,"first_name":"Aarav","last_name":"Sharma","city":"Ahmedabad","company":"SIT"}]"#,
        )
        .expect("seed file");

        let loaded = JsonFileCustomerRepository::new(&path).load_all().await.expect("read");

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].city, "Ahmedabad");
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = TempDir::new().expect("tempdir");
        let repo = JsonFileCustomerRepository::new(dir.path().join("absent.json"));

        assert!(!repo.exists().await);
        let result = repo.load_all().await;
        assert!(matches!(result, Err(RepositoryError::Read { .. })));
    }

    #[tokio::test]
    async fn malformed_file_is_a_decode_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customers.json");
        fs::write(&path, "{ not json").expect("seed file");

        let result = JsonFileCustomerRepository::new(&path).load_all().await;

        let Err(RepositoryError::Decode(message)) = result else {
            panic!("expected decode error, got {result:?}");
        };
        assert!(message.contains("customers.json"));
    }
}
