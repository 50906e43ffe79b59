use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use async_trait::async_trait;
use crate::core::library::{LibraryError, LibraryResult};

/// Unit-of-work style persistence contract.
///
/// `add`, `update` and `remove` only stage changes; nothing is visible to other units of work
/// until `save_changes` applies everything staged as one atomic operation.
#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // get an entity, None when no record has the id
    async fn get(&self, id: i64) -> LibraryResult<Option<Entity>>;

    // all entities in store order
    async fn get_all(&self) -> LibraryResult<Vec<Entity>>;

    // stages a new entity, its id is assigned on save
    async fn add(&self, entity: &Entity) -> LibraryResult<()>;

    // stages the mutated state of a fetched entity
    async fn update(&self, entity: &Entity) -> LibraryResult<()>;

    // stages removal of a fetched entity
    async fn remove(&self, entity: &Entity) -> LibraryResult<()>;

    // applies staged changes or fails leaving none of them applied
    async fn save_changes(&self) -> LibraryResult<SaveResult>;
}

/// Outcome of a successful `save_changes`.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct SaveResult {
    // number of records written or removed
    pub affected: usize,
    // ids assigned to staged adds, in staging order
    pub created_ids: Vec<i64>,
}

impl SaveResult {
    pub fn new(affected: usize, created_ids: Vec<i64>) -> Self {
        SaveResult { affected, created_ids }
    }
}

pub const STORE_ENV: &str = "LIBRARY_STORE";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl FromStr for RepositoryStore {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" | "ddb" => Ok(RepositoryStore::DynamoDB),
            "local-dynamodb" | "local" => Ok(RepositoryStore::LocalDynamoDB),
            "memory" | "" => Ok(RepositoryStore::Memory),
            other => Err(LibraryError::runtime(
                format!("unknown repository store {}", other).as_str(), Some(STORE_ENV.to_string()))),
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "dynamodb"),
            RepositoryStore::LocalDynamoDB => write!(f, "local-dynamodb"),
            RepositoryStore::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_parse_store() {
        let stores = vec![
            RepositoryStore::DynamoDB,
            RepositoryStore::LocalDynamoDB,
            RepositoryStore::Memory,
        ];
        for store in stores {
            let parsed = RepositoryStore::from_str(store.to_string().as_str()).expect("should parse store");
            assert_eq!(store, parsed);
        }
        assert_eq!(RepositoryStore::Memory, RepositoryStore::from_str("").expect("should default"));
        assert!(RepositoryStore::from_str("postgres").is_err());
    }
}
