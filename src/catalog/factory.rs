use crate::books::factory;
use crate::books::repository::memory_book_repository::MemoryBookTable;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

pub async fn create_catalog_service(config: &Configuration, store: RepositoryStore,
                                    memory: &MemoryBookTable) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(config, store, memory).await;
    Box::new(CatalogServiceImpl::new(config, book_repo))
}
