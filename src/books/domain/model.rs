use rust_decimal::Decimal;
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

pub const TITLE_FIELD: &str = "title";
pub const AUTHOR_FIELD: &str = "author";
pub const PRICE_FIELD: &str = "price";

// BookEntity is the single authoritative record of a catalog book. Every construction and
// every mutation runs the same checks, so an instance that exists is always valid.
#[derive(Debug, PartialEq, Clone)]
pub struct BookEntity {
    id: Option<i64>,
    version: i64,
    title: String,
    author: String,
    price: Decimal,
}

impl BookEntity {
    pub fn new(title: &str, author: &str, price: Decimal) -> LibraryResult<Self> {
        let (title, author) = validate(title, author, price)?;
        Ok(Self {
            id: None,
            version: 0,
            title,
            author,
            price,
        })
    }

    // rebuilds a row loaded from a store
    pub fn restore(id: i64, version: i64, title: &str, author: &str, price: Decimal) -> LibraryResult<Self> {
        let (title, author) = validate(title, author, price)?;
        Ok(Self {
            id: Some(id),
            version,
            title,
            author,
            price,
        })
    }

    /// Replaces title, author and price together.
    ///
    /// Nothing is written unless all three values pass validation.
    pub fn update(&mut self, title: &str, author: &str, price: Decimal) -> LibraryResult<()> {
        let (title, author) = validate(title, author, price)?;
        self.title = title;
        self.author = author;
        self.price = price;
        Ok(())
    }

    // attaches the id a store assigned on commit; an id can only be attached once
    pub fn persisted(self, id: i64) -> LibraryResult<Self> {
        match self.id {
            Some(existing) if existing != id => Err(LibraryError::runtime(
                format!("book {} cannot be re-identified as {}", existing, id).as_str(), None)),
            _ => Ok(Self { id: Some(id), ..self }),
        }
    }
}

fn validate(title: &str, author: &str, price: Decimal) -> LibraryResult<(String, String)> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LibraryError::invalid_argument(TITLE_FIELD, "Title is required."));
    }
    let author = author.trim();
    if author.is_empty() {
        return Err(LibraryError::invalid_argument(AUTHOR_FIELD, "Author is required."));
    }
    if price < Decimal::ZERO {
        return Err(LibraryError::invalid_argument(PRICE_FIELD, "Price cannot be negative."));
    }
    Ok((title.to_string(), author.to_string()))
}

impl Identifiable for BookEntity {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn price(&self) -> Decimal {
        self.price
    }
}
