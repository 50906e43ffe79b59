pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDto, CreateBookDto, UpdateBookDto};
use crate::core::library::LibraryResult;

// CatalogService is the only caller of the book repository. Absence is reported as
// None/false, never as an error.
#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn find_book_by_id(&self, id: i64) -> LibraryResult<Option<BookDto>>;
    async fn add_book(&self, book: &CreateBookDto) -> LibraryResult<BookDto>;
    async fn update_book(&self, book: &UpdateBookDto) -> LibraryResult<bool>;
    async fn remove_book(&self, id: i64) -> LibraryResult<bool>;
}
