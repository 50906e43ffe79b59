use std::env;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    // store-assigned identifier, None until the first commit
    fn id(&self) -> Option<i64>;
    fn version(&self) -> i64;
}

pub const BOOKS_TABLE_ENV: &str = "LIBRARY_BOOKS_TABLE";
pub const SEQUENCE_TABLE_ENV: &str = "LIBRARY_SEQUENCE_TABLE";
pub const DDB_ENDPOINT_ENV: &str = "LIBRARY_DDB_ENDPOINT";

// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub books_table: String,
    pub sequence_table: String,
    pub local_endpoint: String,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            books_table: "books".to_string(),
            sequence_table: "sequences".to_string(),
            local_endpoint: "http://localhost:8000".to_string(),
        }
    }

    pub fn from_env(branch_id: &str) -> Self {
        let mut config = Configuration::new(branch_id);
        if let Some(table) = non_empty_var(BOOKS_TABLE_ENV) {
            config.books_table = table;
        }
        if let Some(table) = non_empty_var(SEQUENCE_TABLE_ENV) {
            config.sequence_table = table;
        }
        if let Some(endpoint) = non_empty_var(DDB_ENDPOINT_ENV) {
            config.local_endpoint = endpoint;
        }
        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use crate::core::domain::{BOOKS_TABLE_ENV, Configuration};

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert_eq!("books", config.books_table.as_str());
        assert_eq!("sequences", config.sequence_table.as_str());
        assert_eq!("http://localhost:8000", config.local_endpoint.as_str());
    }

    #[tokio::test]
    async fn test_should_override_config_from_env() {
        std::env::set_var(BOOKS_TABLE_ENV, " branch_books ");
        let config = Configuration::from_env("test");
        std::env::remove_var(BOOKS_TABLE_ENV);
        assert_eq!("branch_books", config.books_table.as_str());
        assert_eq!("sequences", config.sequence_table.as_str());
    }
}
