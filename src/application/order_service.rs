use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrderLine, OrderLineRequest, OrderView};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::product::StockUpdate;

/// Order creation workflow: validates the request against the customer and
/// product repositories, persists the order with price snapshots, then writes
/// the decremented stock quantities back in one batched update.
pub struct CreateOrderService<C, P, O> {
    customers: C,
    products: P,
    orders: O,
}

impl<C, P, O> CreateOrderService<C, P, O>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    pub fn new(customers: C, products: P, orders: O) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }

    /// All four validations run before any side effect; the first failure
    /// aborts the workflow and nothing is persisted.
    ///
    /// When a product id repeats in the request, lookups use the first
    /// matching line. The batched product lookup collapses duplicate ids, so
    /// repeated lines neither double-check nor double-decrement stock.
    pub fn execute(
        &self,
        customer_id: Uuid,
        lines: Vec<OrderLineRequest>,
    ) -> Result<OrderView, DomainError> {
        self.customers
            .find_by_id(customer_id)?
            .ok_or(DomainError::CustomerNotFound)?;

        let ids: Vec<Uuid> = lines.iter().map(|l| l.product_id).collect();
        let found = self.products.find_all_by_id(&ids)?;

        if found.is_empty() {
            return Err(DomainError::NoProductsFound);
        }

        let missing: Vec<Uuid> = lines
            .iter()
            .map(|l| l.product_id)
            .filter(|id| !found.iter().any(|p| p.id == *id))
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::ProductsNotFound(missing));
        }

        // Strict greater-than: ordering exactly the on-hand quantity is
        // allowed and drives the stock to zero.
        let insufficient: Vec<Uuid> = lines
            .iter()
            .filter(|l| {
                found
                    .iter()
                    .find(|p| p.id == l.product_id)
                    .is_some_and(|p| l.quantity > p.quantity)
            })
            .map(|l| l.product_id)
            .collect();
        if !insufficient.is_empty() {
            return Err(DomainError::InsufficientStock(insufficient));
        }

        let new_lines: Vec<NewOrderLine> = lines
            .iter()
            .map(|l| {
                let product = found
                    .iter()
                    .find(|p| p.id == l.product_id)
                    .ok_or_else(|| DomainError::ProductsNotFound(vec![l.product_id]))?;
                Ok(NewOrderLine {
                    product_id: l.product_id,
                    quantity: l.quantity,
                    unit_price: product.price.clone(),
                })
            })
            .collect::<Result<_, DomainError>>()?;

        let order = self.orders.create(customer_id, new_lines)?;

        let updates: Vec<StockUpdate> = found
            .iter()
            .map(|p| {
                let requested = lines
                    .iter()
                    .find(|l| l.product_id == p.id)
                    .map(|l| l.quantity)
                    .unwrap_or(0);
                StockUpdate {
                    id: p.id,
                    quantity: p.quantity - requested,
                }
            })
            .collect();
        self.products.update_quantity(updates)?;

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use uuid::Uuid;

    use super::CreateOrderService;
    use crate::domain::customer::Customer;
    use crate::domain::errors::DomainError;
    use crate::domain::order::{NewOrderLine, OrderLineRequest, OrderLineView, OrderView};
    use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
    use crate::domain::product::{Product, StockUpdate};

    struct FakeCustomers {
        customers: Vec<Customer>,
    }

    impl CustomerRepository for FakeCustomers {
        fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
            Ok(self.customers.iter().find(|c| c.id == id).cloned())
        }

        fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
            Ok(self.customers.iter().find(|c| c.email == email).cloned())
        }

        fn create(&self, name: &str, email: &str) -> Result<Customer, DomainError> {
            Ok(Customer {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email: email.to_string(),
                created_at: Utc::now(),
            })
        }
    }

    struct FakeProducts {
        products: Vec<Product>,
        lookups: Mutex<u32>,
        applied_updates: Mutex<Vec<StockUpdate>>,
    }

    impl FakeProducts {
        fn with(products: Vec<Product>) -> Self {
            Self {
                products,
                lookups: Mutex::new(0),
                applied_updates: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProductRepository for FakeProducts {
        fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError> {
            Ok(self.products.iter().find(|p| p.name == name).cloned())
        }

        fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
            *self.lookups.lock().unwrap() += 1;
            // Duplicate input ids collapse: one entry per distinct match.
            Ok(self
                .products
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect())
        }

        fn update_quantity(
            &self,
            updates: Vec<StockUpdate>,
        ) -> Result<Vec<Product>, DomainError> {
            self.applied_updates.lock().unwrap().extend(updates.clone());
            Ok(self
                .products
                .iter()
                .filter_map(|p| {
                    updates.iter().find(|u| u.id == p.id).map(|u| Product {
                        quantity: u.quantity,
                        ..p.clone()
                    })
                })
                .collect())
        }

        fn create(
            &self,
            name: &str,
            price: BigDecimal,
            quantity: i32,
        ) -> Result<Product, DomainError> {
            Ok(Product {
                id: Uuid::new_v4(),
                name: name.to_string(),
                price,
                quantity,
                created_at: Utc::now(),
            })
        }
    }

    struct FakeOrders {
        created: Mutex<Vec<(Uuid, Vec<NewOrderLine>)>>,
    }

    impl FakeOrders {
        fn new() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
            }
        }
    }

    impl OrderRepository for FakeOrders {
        fn create(
            &self,
            customer_id: Uuid,
            lines: Vec<NewOrderLine>,
        ) -> Result<OrderView, DomainError> {
            self.created
                .lock()
                .unwrap()
                .push((customer_id, lines.clone()));
            Ok(OrderView {
                id: Uuid::new_v4(),
                customer_id,
                created_at: Utc::now(),
                lines: lines
                    .into_iter()
                    .map(|l| OrderLineView {
                        id: Uuid::new_v4(),
                        product_id: l.product_id,
                        quantity: l.quantity,
                        unit_price: l.unit_price,
                    })
                    .collect(),
            })
        }

        fn find_by_id(&self, _id: Uuid) -> Result<Option<OrderView>, DomainError> {
            Ok(None)
        }
    }

    fn customer() -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    fn product(name: &str, price: &str, quantity: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            quantity,
            created_at: Utc::now(),
        }
    }

    fn service(
        customers: Vec<Customer>,
        products: Vec<Product>,
    ) -> CreateOrderService<FakeCustomers, FakeProducts, FakeOrders> {
        CreateOrderService::new(
            FakeCustomers { customers },
            FakeProducts::with(products),
            FakeOrders::new(),
        )
    }

    #[test]
    fn creates_order_and_decrements_stock() {
        let customer = customer();
        let widget = product("Widget", "5.0", 10);
        let widget_id = widget.id;
        let svc = service(vec![customer.clone()], vec![widget]);

        let order = svc
            .execute(
                customer.id,
                vec![OrderLineRequest {
                    product_id: widget_id,
                    quantity: 4,
                }],
            )
            .expect("order should be created");

        assert_eq!(order.customer_id, customer.id);
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].product_id, widget_id);
        assert_eq!(order.lines[0].quantity, 4);
        assert_eq!(
            order.lines[0].unit_price,
            BigDecimal::from_str("5.0").unwrap()
        );

        let updates = svc.products.applied_updates.lock().unwrap();
        assert_eq!(
            *updates,
            vec![StockUpdate {
                id: widget_id,
                quantity: 6
            }]
        );
    }

    #[test]
    fn unknown_customer_fails_before_any_product_lookup() {
        let widget = product("Widget", "5.0", 10);
        let widget_id = widget.id;
        let svc = service(vec![], vec![widget]);

        let err = svc
            .execute(
                Uuid::new_v4(),
                vec![OrderLineRequest {
                    product_id: widget_id,
                    quantity: 1,
                }],
            )
            .expect_err("should be rejected");

        assert!(matches!(err, DomainError::CustomerNotFound));
        assert_eq!(*svc.products.lookups.lock().unwrap(), 0);
        assert!(svc.orders.created.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_batch_lookup_fails_with_no_products_found() {
        let customer = customer();
        let svc = service(vec![customer.clone()], vec![]);

        let err = svc
            .execute(
                customer.id,
                vec![OrderLineRequest {
                    product_id: Uuid::new_v4(),
                    quantity: 1,
                }],
            )
            .expect_err("should be rejected");

        assert!(matches!(err, DomainError::NoProductsFound));
        assert!(svc.orders.created.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_product_id_fails_with_products_not_found() {
        let customer = customer();
        let widget = product("Widget", "5.0", 10);
        let widget_id = widget.id;
        let unknown = Uuid::new_v4();
        let svc = service(vec![customer.clone()], vec![widget]);

        let err = svc
            .execute(
                customer.id,
                vec![
                    OrderLineRequest {
                        product_id: widget_id,
                        quantity: 1,
                    },
                    OrderLineRequest {
                        product_id: unknown,
                        quantity: 1,
                    },
                ],
            )
            .expect_err("should be rejected");

        match err {
            DomainError::ProductsNotFound(missing) => assert_eq!(missing, vec![unknown]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(svc.orders.created.lock().unwrap().is_empty());
        assert!(svc.products.applied_updates.lock().unwrap().is_empty());
    }

    #[test]
    fn requesting_more_than_on_hand_fails_with_insufficient_stock() {
        let customer = customer();
        let widget = product("Widget", "5.0", 10);
        let widget_id = widget.id;
        let svc = service(vec![customer.clone()], vec![widget]);

        let err = svc
            .execute(
                customer.id,
                vec![OrderLineRequest {
                    product_id: widget_id,
                    quantity: 11,
                }],
            )
            .expect_err("should be rejected");

        match err {
            DomainError::InsufficientStock(ids) => assert_eq!(ids, vec![widget_id]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(svc.orders.created.lock().unwrap().is_empty());
        assert!(svc.products.applied_updates.lock().unwrap().is_empty());
    }

    #[test]
    fn requesting_exactly_on_hand_quantity_succeeds_and_zeroes_stock() {
        let customer = customer();
        let widget = product("Widget", "5.0", 10);
        let widget_id = widget.id;
        let svc = service(vec![customer.clone()], vec![widget]);

        svc.execute(
            customer.id,
            vec![OrderLineRequest {
                product_id: widget_id,
                quantity: 10,
            }],
        )
        .expect("equal quantity is allowed");

        let updates = svc.products.applied_updates.lock().unwrap();
        assert_eq!(
            *updates,
            vec![StockUpdate {
                id: widget_id,
                quantity: 0
            }]
        );
    }

    #[test]
    fn line_prices_snapshot_each_product_independently() {
        let customer = customer();
        let widget = product("Widget", "5.0", 10);
        let gadget = product("Gadget", "12.50", 3);
        let (widget_id, gadget_id) = (widget.id, gadget.id);
        let svc = service(vec![customer.clone()], vec![widget, gadget]);

        let order = svc
            .execute(
                customer.id,
                vec![
                    OrderLineRequest {
                        product_id: widget_id,
                        quantity: 2,
                    },
                    OrderLineRequest {
                        product_id: gadget_id,
                        quantity: 3,
                    },
                ],
            )
            .expect("order should be created");

        let price_of = |id: Uuid| {
            order
                .lines
                .iter()
                .find(|l| l.product_id == id)
                .map(|l| l.unit_price.clone())
                .expect("line present")
        };
        assert_eq!(price_of(widget_id), BigDecimal::from_str("5.0").unwrap());
        assert_eq!(price_of(gadget_id), BigDecimal::from_str("12.50").unwrap());

        let mut updates = svc.products.applied_updates.lock().unwrap().clone();
        updates.sort_by_key(|u| u.id);
        let mut expected = vec![
            StockUpdate {
                id: widget_id,
                quantity: 8,
            },
            StockUpdate {
                id: gadget_id,
                quantity: 0,
            },
        ];
        expected.sort_by_key(|u| u.id);
        assert_eq!(updates, expected);
    }

    #[test]
    fn duplicate_product_id_in_request_uses_first_matching_line() {
        let customer = customer();
        let widget = product("Widget", "5.0", 10);
        let widget_id = widget.id;
        let svc = service(vec![customer.clone()], vec![widget]);

        // Two lines for the same product: the stock decrement is computed
        // from the first line only.
        let order = svc
            .execute(
                customer.id,
                vec![
                    OrderLineRequest {
                        product_id: widget_id,
                        quantity: 3,
                    },
                    OrderLineRequest {
                        product_id: widget_id,
                        quantity: 5,
                    },
                ],
            )
            .expect("order should be created");

        assert_eq!(order.lines.len(), 2);
        let updates = svc.products.applied_updates.lock().unwrap();
        assert_eq!(
            *updates,
            vec![StockUpdate {
                id: widget_id,
                quantity: 7
            }]
        );
    }

    #[test]
    fn insufficient_line_among_valid_lines_rejects_the_whole_order() {
        let customer = customer();
        let widget = product("Widget", "5.0", 10);
        let gadget = product("Gadget", "2.0", 1);
        let (widget_id, gadget_id) = (widget.id, gadget.id);
        let svc = service(vec![customer.clone()], vec![widget, gadget]);

        let err = svc
            .execute(
                customer.id,
                vec![
                    OrderLineRequest {
                        product_id: widget_id,
                        quantity: 1,
                    },
                    OrderLineRequest {
                        product_id: gadget_id,
                        quantity: 2,
                    },
                ],
            )
            .expect_err("should be rejected");

        match err {
            DomainError::InsufficientStock(ids) => assert_eq!(ids, vec![gadget_id]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(svc.orders.created.lock().unwrap().is_empty());
        assert!(svc.products.applied_updates.lock().unwrap().is_empty());
    }
}
