use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, ReturnValue, TransactWriteItem, Update};

use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::repository::{ChangeTracker, PendingChange, require_id};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{Repository, SaveResult};
use crate::utils::ddb::{parse_decimal_attribute, parse_number_attribute, parse_string_attribute};

// DynamoDB rejects transactions with more items than this
const MAX_TRANSACT_ITEMS: usize = 100;
const SCAN_PAGE_SIZE: i32 = 500;
const BOOKS_SEQUENCE: &str = "books";

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    sequence_table: String,
    tracker: ChangeTracker,
}

impl DDBBookRepository {
    pub fn new(client: Client, table_name: &str, sequence_table: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            sequence_table: sequence_table.to_string(),
            tracker: ChangeTracker::default(),
        }
    }

    // reserves `count` consecutive ids from the atomic counter and returns the first one
    async fn reserve_ids(&self, count: usize) -> LibraryResult<i64> {
        let table_name: &str = self.sequence_table.as_ref();
        let out = self.client
            .update_item()
            .table_name(table_name)
            .key("sequence_name", AttributeValue::S(BOOKS_SEQUENCE.to_string()))
            .update_expression("ADD next_id :n")
            .expression_attribute_values(":n", AttributeValue::N(count.to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await.map_err(LibraryError::from)?;
        let last = out.attributes()
            .map(|attrs| parse_number_attribute("next_id", attrs))
            .unwrap_or_default();
        if last < count as i64 {
            return Err(LibraryError::database(
                format!("books sequence returned {} for {} ids", last, count).as_str(), None, false));
        }
        Ok(last - count as i64 + 1)
    }

    fn put_item(&self, id: i64, entity: &BookEntity) -> TransactWriteItem {
        let put = Put::builder()
            .table_name(self.table_name.as_str())
            .set_item(Some(book_to_item(id, 0, entity)))
            .condition_expression("attribute_not_exists(book_id)")
            .build();
        TransactWriteItem::builder().put(put).build()
    }

    fn update_item(&self, id: i64, entity: &BookEntity) -> TransactWriteItem {
        let update = Update::builder()
            .table_name(self.table_name.as_str())
            .key("book_id", AttributeValue::N(id.to_string()))
            .update_expression("SET #title = :title, #author = :author, #price = :price, #version = :version")
            .expression_attribute_names("#title", "title")
            .expression_attribute_names("#author", "author")
            .expression_attribute_names("#price", "price")
            .expression_attribute_names("#version", "version")
            .expression_attribute_values(":title", AttributeValue::S(entity.title().to_string()))
            .expression_attribute_values(":author", AttributeValue::S(entity.author().to_string()))
            .expression_attribute_values(":price", AttributeValue::N(entity.price().to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version() + 1).to_string()))
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version().to_string()))
            .condition_expression("attribute_exists(book_id) AND #version = :old_version")
            .build();
        TransactWriteItem::builder().update(update).build()
    }

    fn delete_item(&self, id: i64, entity: &BookEntity) -> TransactWriteItem {
        let delete = Delete::builder()
            .table_name(self.table_name.as_str())
            .key("book_id", AttributeValue::N(id.to_string()))
            .expression_attribute_names("#version", "version")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version().to_string()))
            .condition_expression("attribute_exists(book_id) AND #version = :old_version")
            .build();
        TransactWriteItem::builder().delete(delete).build()
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn get(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(id.to_string()))
            .consistent_read(true)
            .send()
            .await.map_err(LibraryError::from)?;
        match out.item() {
            Some(map) => map_to_book(map).map(Some),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut books = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let out = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key.take())
                .limit(SCAN_PAGE_SIZE)
                .send()
                .await.map_err(LibraryError::from)?;
            for item in out.items().unwrap_or_default() {
                books.push(map_to_book(item)?);
            }
            match out.last_evaluated_key() {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key.clone()),
                _ => break,
            }
        }
        // scan order is hash order, the catalog lists by id
        books.sort_by_key(|b| b.id().unwrap_or_default());
        Ok(books)
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
        if changes.len() > MAX_TRANSACT_ITEMS {
            return Err(LibraryError::runtime(
                format!("cannot save {} book changes in one transaction", changes.len()).as_str(), None));
        }

        let adds = changes.iter().filter(|c| c.is_add()).count();
        let mut next_id = if adds > 0 { self.reserve_ids(adds).await? } else { 0 };

        let mut created_ids = vec![];
        let mut items = vec![];
        for change in &changes {
            match change {
                PendingChange::Add(entity) => {
                    items.push(self.put_item(next_id, entity));
                    created_ids.push(next_id);
                    next_id += 1;
                }
                PendingChange::Update(entity) => {
                    items.push(self.update_item(require_id(entity)?, entity));
                }
                PendingChange::Remove(entity) => {
                    items.push(self.delete_item(require_id(entity)?, entity));
                }
            }
        }

        self.client
            .transact_write_items()
            .set_transact_items(Some(items))
            .send()
            .await.map_err(LibraryError::from)?;
        tracing::debug!(table = self.table_name.as_str(), affected = changes.len(), created = ?created_ids, "books transaction committed");
        Ok(SaveResult::new(changes.len(), created_ids))
    }
}

fn book_to_item(id: i64, version: i64, entity: &BookEntity) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("book_id".to_string(), AttributeValue::N(id.to_string())),
        ("version".to_string(), AttributeValue::N(version.to_string())),
        ("title".to_string(), AttributeValue::S(entity.title().to_string())),
        ("author".to_string(), AttributeValue::S(entity.author().to_string())),
        ("price".to_string(), AttributeValue::N(entity.price().to_string())),
    ])
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> LibraryResult<BookEntity> {
    let id = parse_number_attribute("book_id", map);
    let price = parse_decimal_attribute("price", map)?;
    BookEntity::restore(
        id,
        parse_number_attribute("version", map),
        parse_string_attribute("title", map).unwrap_or_default().as_str(),
        parse_string_attribute("author", map).unwrap_or_default().as_str(),
        price,
    ).map_err(|err| LibraryError::serialization(format!("stored book {} is invalid: {}", id, err).as_str()))
}
