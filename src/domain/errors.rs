use thiserror::Error;
use uuid::Uuid;

/// Request-rejection errors raised by the application services.
///
/// Every variant except `Internal` represents invalid input, not a system
/// fault: callers get a user-facing rejection and nothing is persisted.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Customer not found")]
    CustomerNotFound,

    #[error("No products found for the requested ids")]
    NoProductsFound,

    #[error("Products not found: {}", format_ids(.0))]
    ProductsNotFound(Vec<Uuid>),

    #[error("Insufficient stock for products: {}", format_ids(.0))]
    InsufficientStock(Vec<Uuid>),

    #[error("Product '{0}' is already registered")]
    DuplicateProduct(String),

    #[error("Customer with email '{0}' is already registered")]
    DuplicateCustomer(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
