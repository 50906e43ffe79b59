use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::repository::{ChangeTracker, PendingChange, require_id};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{Repository, SaveResult};

#[derive(Debug)]
struct BookRows {
    next_id: i64,
    rows: BTreeMap<i64, BookEntity>,
}

impl Default for BookRows {
    fn default() -> Self {
        Self { next_id: 1, rows: BTreeMap::new() }
    }
}

// MemoryBookTable is the process-wide book storage shared by every unit of work.
// Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookTable {
    inner: Arc<RwLock<BookRows>>,
}

impl MemoryBookTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// MemoryBookRepository is one unit of work over a MemoryBookTable
#[derive(Debug)]
pub struct MemoryBookRepository {
    table: MemoryBookTable,
    tracker: ChangeTracker,
}

impl MemoryBookRepository {
    pub fn new(table: &MemoryBookTable) -> Self {
        Self {
            table: table.clone(),
            tracker: ChangeTracker::default(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn get(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        Ok(self.table.inner.read().await.rows.get(&id).cloned())
    }

    async fn get_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.table.inner.read().await.rows.values().cloned().collect())
    }

    async fn add(&self, entity: &BookEntity) -> LibraryResult<()> {
        self.tracker.stage_add(entity).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<()> {
        self.tracker.stage_update(entity).await
    }

    async fn remove(&self, entity: &BookEntity) -> LibraryResult<()> {
        self.tracker.stage_remove(entity).await
    }

    async fn save_changes(&self) -> LibraryResult<SaveResult> {
        let changes = self.tracker.drain().await;
        if changes.is_empty() {
            return Ok(SaveResult::default());
        }
        let mut table = self.table.inner.write().await;

        // verify everything before touching a row so a rejected commit leaves no trace
        for change in &changes {
            match change {
                PendingChange::Add(_) => {}
                PendingChange::Update(entity) | PendingChange::Remove(entity) => {
                    let id = require_id(entity)?;
                    match table.rows.get(&id) {
                        None => {
                            return Err(LibraryError::not_found(format!("book {} no longer exists", id).as_str()));
                        }
                        Some(stored) if stored.version() != entity.version() => {
                            return Err(LibraryError::unavailable(
                                format!("book {} was modified concurrently, expected version {} found {}",
                                        id, entity.version(), stored.version()).as_str(), None, true));
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        let mut created_ids = Vec::new();
        let affected = changes.len();
        for change in changes {
            match change {
                PendingChange::Add(entity) => {
                    let id = table.next_id;
                    table.next_id += 1;
                    table.rows.insert(id, entity.persisted(id)?);
                    created_ids.push(id);
                }
                PendingChange::Update(entity) => {
                    let id = require_id(&entity)?;
                    let next = bump_version(&entity)?;
                    table.rows.insert(id, next);
                }
                PendingChange::Remove(entity) => {
                    let id = require_id(&entity)?;
                    table.rows.remove(&id);
                }
            }
        }
        tracing::debug!(affected, created = ?created_ids, "memory book table committed");
        Ok(SaveResult::new(affected, created_ids))
    }
}

fn bump_version(entity: &BookEntity) -> LibraryResult<BookEntity> {
    BookEntity::restore(require_id(entity)?, entity.version() + 1,
                        entity.title(), entity.author(), entity.price())
}
