use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetBookCommandRequest {
    pub(crate) book_id: i64,
}

impl GetBookCommandRequest {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetBookCommandResponse {
    pub book: Option<BookDto>,
}

impl GetBookCommandResponse {
    pub fn new(book: Option<BookDto>) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        self.catalog_service.find_book_by_id(req.book_id).await
            .map_err(CommandError::from).map(GetBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use crate::books::dto::CreateBookDto;
    use crate::books::repository::memory_book_repository::MemoryBookTable;
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_get_book() {
        let table = MemoryBookTable::new();
        let config = Configuration::new("test");
        let svc = factory::create_catalog_service(&config, RepositoryStore::Memory, &table).await;
        let book = svc.add_book(&CreateBookDto::new("test book", "author", dec!(3)))
            .await.expect("should add book");

        let svc = factory::create_catalog_service(&config, RepositoryStore::Memory, &table).await;
        let cmd = GetBookCommand::new(svc);
        let res = cmd.execute(GetBookCommandRequest::new(book.id)).await.expect("should get book");
        assert_eq!(Some(book), res.book);

        let res = cmd.execute(GetBookCommandRequest::new(99)).await.expect("should query book");
        assert_eq!(None, res.book);
    }
}
