use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::Product;

/// Product registration: refuses creation when the name is already taken.
/// No stock merging happens on a name collision.
pub struct CreateProductService<P> {
    products: P,
}

impl<P: ProductRepository> CreateProductService<P> {
    pub fn new(products: P) -> Self {
        Self { products }
    }

    pub fn execute(
        &self,
        name: &str,
        price: BigDecimal,
        quantity: i32,
    ) -> Result<Product, DomainError> {
        if self.products.find_by_name(name)?.is_some() {
            return Err(DomainError::DuplicateProduct(name.to_string()));
        }

        self.products.create(name, price, quantity)
    }
}
