use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;

/// Customer registration: one account per email address.
pub struct CreateCustomerService<C> {
    customers: C,
}

impl<C: CustomerRepository> CreateCustomerService<C> {
    pub fn new(customers: C) -> Self {
        Self { customers }
    }

    pub fn execute(&self, name: &str, email: &str) -> Result<Customer, DomainError> {
        if self.customers.find_by_email(email)?.is_some() {
            return Err(DomainError::DuplicateCustomer(email.to_string()));
        }

        self.customers.create(name, email)
    }
}
