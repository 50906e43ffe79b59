use rust_decimal::Decimal;
use crate::core::domain::Identifiable;

pub mod model;

// Book exposes the read side of a catalog record; mutation only happens through BookEntity
pub trait Book: Identifiable {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn price(&self) -> Decimal;
}
