use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, CreateBookDto, UpdateBookDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};

pub struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub fn new(config: &Configuration, book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
        }
    }

    fn rejected(&self, err: LibraryError) -> LibraryError {
        tracing::warn!(branch = self.branch_id.as_str(), error = %err, "book rejected");
        err
    }

    fn commit_failed(&self, err: LibraryError) -> LibraryError {
        tracing::warn!(branch = self.branch_id.as_str(), error = %err, retryable = err.retryable(), "book commit failed");
        err
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.get_all().await?;
        tracing::debug!(branch = self.branch_id.as_str(), count = books.len(), "books listed");
        Ok(books.iter().map(BookDto::from).collect())
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<Option<BookDto>> {
        let book = self.book_repository.get(id).await?;
        tracing::debug!(branch = self.branch_id.as_str(), book_id = id, found = book.is_some(), "book lookup");
        Ok(book.as_ref().map(BookDto::from))
    }

    async fn add_book(&self, book: &CreateBookDto) -> LibraryResult<BookDto> {
        let entity = BookEntity::new(book.title.as_str(), book.author.as_str(), book.price)
            .map_err(|err| self.rejected(err))?;
        self.book_repository.add(&entity).await?;
        let res = self.book_repository.save_changes().await.map_err(|err| self.commit_failed(err))?;
        let id = res.created_ids.first().copied().ok_or_else(|| {
            LibraryError::database("book store did not assign an id", None, false)
        })?;
        let entity = entity.persisted(id)?;
        tracing::info!(branch = self.branch_id.as_str(), book_id = id, affected = res.affected, "book added");
        Ok(BookDto::from(&entity))
    }

    async fn update_book(&self, book: &UpdateBookDto) -> LibraryResult<bool> {
        let Some(mut entity) = self.book_repository.get(book.id).await? else {
            return Ok(false);
        };
        entity.update(book.title.as_str(), book.author.as_str(), book.price)
            .map_err(|err| self.rejected(err))?;
        self.book_repository.update(&entity).await?;
        let res = self.book_repository.save_changes().await.map_err(|err| self.commit_failed(err))?;
        tracing::info!(branch = self.branch_id.as_str(), book_id = book.id, affected = res.affected, "book updated");
        Ok(true)
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<bool> {
        let Some(entity) = self.book_repository.get(id).await? else {
            return Ok(false);
        };
        self.book_repository.remove(&entity).await?;
        let res = self.book_repository.save_changes().await.map_err(|err| self.commit_failed(err))?;
        tracing::info!(branch = self.branch_id.as_str(), book_id = id, affected = res.affected, "book removed");
        Ok(true)
    }
}
