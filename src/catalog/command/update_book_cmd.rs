use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::books::dto::UpdateBookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBookCommandRequest {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) price: Decimal,
}

impl UpdateBookCommandRequest {
    pub fn new(id: i64, title: &str, author: &str, price: Decimal) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            price,
        }
    }
    pub fn build_book(&self) -> UpdateBookDto {
        UpdateBookDto::new(self.id, self.title.as_str(), self.author.as_str(), self.price)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub updated: bool,
}

impl UpdateBookCommandResponse {
    pub fn new(updated: bool) -> Self {
        Self {
            updated,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(&req.build_book()).await
            .map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use crate::books::dto::CreateBookDto;
    use crate::books::repository::memory_book_repository::MemoryBookTable;
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_update_book() {
        let table = MemoryBookTable::new();
        let config = Configuration::new("test");
        let svc = factory::create_catalog_service(&config, RepositoryStore::Memory, &table).await;
        let book = svc.add_book(&CreateBookDto::new("test book", "author", dec!(3)))
            .await.expect("should add book");

        let cmd = UpdateBookCommand::new(
            factory::create_catalog_service(&config, RepositoryStore::Memory, &table).await);
        let res = cmd.execute(UpdateBookCommandRequest::new(book.id, "new title", "author", dec!(4)))
            .await.expect("should update book");
        assert!(res.updated);

        let loaded = svc.find_book_by_id(book.id).await.expect("should get book").expect("book should exist");
        assert_eq!("new title", loaded.title.as_str());
        assert_eq!(dec!(4), loaded.price);
    }

    #[tokio::test]
    async fn test_should_report_missing_and_invalid_update() {
        let table = MemoryBookTable::new();
        let config = Configuration::new("test");
        let svc = factory::create_catalog_service(&config, RepositoryStore::Memory, &table).await;
        let book = svc.add_book(&CreateBookDto::new("test book", "author", dec!(3)))
            .await.expect("should add book");

        let cmd = UpdateBookCommand::new(
            factory::create_catalog_service(&config, RepositoryStore::Memory, &table).await);
        let res = cmd.execute(UpdateBookCommandRequest::new(book.id + 1, "x", "y", dec!(1)))
            .await.expect("missing book is not an error");
        assert!(!res.updated);

        let err = cmd.execute(UpdateBookCommandRequest::new(book.id, "", "y", dec!(1)))
            .await.expect_err("should reject update");
        assert!(matches!(err, CommandError::InvalidArgument { field: "title", .. }));
    }
}
