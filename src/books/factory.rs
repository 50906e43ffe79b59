use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::{MemoryBookRepository, MemoryBookTable};
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::build_db_client;

// builds a fresh unit of work; `memory` backs RepositoryStore::Memory and is ignored otherwise
pub async fn create_book_repository(config: &Configuration, store: RepositoryStore,
                                    memory: &MemoryBookTable) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::DynamoDB | RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config, store).await;
            Box::new(DDBBookRepository::new(client, config.books_table.as_str(), config.sequence_table.as_str()))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryBookRepository::new(memory))
        }
    }
}
