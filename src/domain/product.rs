use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// A batched write of a product's new on-hand quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdate {
    pub id: Uuid,
    pub quantity: i32,
}
