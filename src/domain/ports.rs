use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::customer::Customer;
use super::errors::DomainError;
use super::order::{NewOrderLine, OrderView};
use super::product::{Product, StockUpdate};

pub trait CustomerRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;
    fn create(&self, name: &str, email: &str) -> Result<Customer, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError>;

    /// Batched lookup by id set. Result order is not guaranteed and duplicate
    /// input ids collapse to one entry per distinct id.
    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError>;

    /// Batched write of new on-hand quantities, one update per product id.
    fn update_quantity(&self, updates: Vec<StockUpdate>) -> Result<Vec<Product>, DomainError>;

    fn create(
        &self,
        name: &str,
        price: BigDecimal,
        quantity: i32,
    ) -> Result<Product, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Persist an order and its lines, assigning id and timestamps.
    fn create(
        &self,
        customer_id: Uuid,
        lines: Vec<NewOrderLine>,
    ) -> Result<OrderView, DomainError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
}
