pub mod ddb_book_repository;
pub mod memory_book_repository;

use tokio::sync::Mutex;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

pub trait BookRepository: Repository<BookEntity> {}

impl<T: Repository<BookEntity>> BookRepository for T {}

// PendingChange is a staged write waiting for save_changes
#[derive(Debug, PartialEq, Clone)]
pub(crate) enum PendingChange {
    Add(BookEntity),
    Update(BookEntity),
    Remove(BookEntity),
}

impl PendingChange {
    pub(crate) fn is_add(&self) -> bool {
        matches!(self, PendingChange::Add(_))
    }
}

// ChangeTracker collects the staged changes of a single unit of work
#[derive(Debug, Default)]
pub(crate) struct ChangeTracker {
    pending: Mutex<Vec<PendingChange>>,
}

impl ChangeTracker {
    pub(crate) async fn stage_add(&self, entity: &BookEntity) -> LibraryResult<()> {
        if let Some(id) = entity.id() {
            return Err(LibraryError::duplicate_key(format!("book {} is already persisted", id).as_str()));
        }
        self.pending.lock().await.push(PendingChange::Add(entity.clone()));
        Ok(())
    }

    pub(crate) async fn stage_update(&self, entity: &BookEntity) -> LibraryResult<()> {
        require_id(entity)?;
        self.pending.lock().await.push(PendingChange::Update(entity.clone()));
        Ok(())
    }

    pub(crate) async fn stage_remove(&self, entity: &BookEntity) -> LibraryResult<()> {
        require_id(entity)?;
        self.pending.lock().await.push(PendingChange::Remove(entity.clone()));
        Ok(())
    }

    // takes every staged change, leaving the tracker empty
    pub(crate) async fn drain(&self) -> Vec<PendingChange> {
        std::mem::take(&mut *self.pending.lock().await)
    }
}

pub(crate) fn require_id(entity: &BookEntity) -> LibraryResult<i64> {
    entity.id().ok_or_else(|| LibraryError::runtime("book has not been persisted yet", None))
}
