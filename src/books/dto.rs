use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;

// BookDto is the listing/detail projection handed out by the Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: Decimal,
}

impl BookDto {
    pub fn new(id: i64, title: &str, author: &str, price: Decimal) -> BookDto {
        BookDto {
            id,
            title: title.to_string(),
            author: author.to_string(),
            price,
        }
    }
}

// Only persisted entities are projected, unsaved ones project with id 0.
impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        BookDto::new(other.id().unwrap_or_default(), other.title(), other.author(), other.price())
    }
}

// CreateBookDto carries the fields of a new book. The id is accepted for compatibility
// with clients that echo a full record back, and is ignored: identity is store-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    pub price: Decimal,
}

impl CreateBookDto {
    pub fn new(title: &str, author: &str, price: Decimal) -> CreateBookDto {
        CreateBookDto {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            price,
        }
    }
}

// UpdateBookDto replaces title, author and price of the book addressed by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: Decimal,
}

impl UpdateBookDto {
    pub fn new(id: i64, title: &str, author: &str, price: Decimal) -> UpdateBookDto {
        UpdateBookDto {
            id,
            title: title.to_string(),
            author: author.to_string(),
            price,
        }
    }
}
