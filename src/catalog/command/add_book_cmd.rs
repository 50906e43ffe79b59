use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookDto, CreateBookDto};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// a client supplied id is accepted on the wire but never used
#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) price: Decimal,
}

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, price: Decimal) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            price,
        }
    }
    pub fn build_book(&self) -> CreateBookDto {
        let mut book = CreateBookDto::new(self.title.as_str(), self.author.as_str(), self.price);
        book.id = self.id;
        book
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.add_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
