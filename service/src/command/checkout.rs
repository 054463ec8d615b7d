//! [`Command`] for ordering everything in a [`Cart`].

use common::Money;
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{
    order::{Address, Customer, Kind, PaymentMethod},
    Order,
};
use crate::{
    cart::Cart,
    domain::{menu, order},
    Service,
};

use super::{
    place_order::{self, PlaceOrder},
    Command,
};

/// [`Command`] for ordering everything in a [`Cart`].
///
/// Places a separate [`Order`] per [`Cart`] item, stopping at the first
/// failure.
#[derive(Clone, Debug)]
pub struct Checkout {
    /// [`Cart`] to order.
    pub cart: Cart,

    /// [`Customer`] placing the [`Order`]s.
    pub customer: order::Customer,

    /// Delivery [`Address`].
    pub address: order::Address,

    /// Chosen [`PaymentMethod`].
    pub payment_method: order::PaymentMethod,

    /// Chosen [`Kind`].
    pub kind: order::Kind,
}

impl<Api> Command<Checkout> for Service<Api>
where
    Self: Command<
        PlaceOrder,
        Ok = place_order::Output,
        Err = Traced<place_order::ExecutionError>,
    >,
{
    type Ok = place_order::Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: Checkout) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Checkout {
            cart,
            customer,
            address,
            payment_method,
            kind,
        } = cmd;

        if cart.is_empty() {
            return Err(tracerr::new!(E::EmptyCart));
        }

        let mut out = place_order::Output {
            amount: Money::ZERO,
            payment_required: false,
        };
        let mut placed = Vec::with_capacity(cart.len());
        for item in cart.items() {
            let line = order::Line {
                food_name: item.product.name.clone(),
                price: item.product.price,
                quantity: item.quantity,
            };
            let placed_order = match self
                .execute(PlaceOrder {
                    customer: customer.clone(),
                    address: address.clone(),
                    payment_method,
                    kind,
                    line,
                })
                .await
            {
                Ok(o) => o,
                Err(e) => {
                    log::warn!(
                        "checkout stopped after {} of {} orders: {e}",
                        placed.len(),
                        cart.len(),
                    );
                    return Err(tracerr::new!(E::PlaceOrder {
                        placed,
                        done: out,
                        source: e.into_inner(),
                    }));
                }
            };

            placed.push(item.product.id.clone());
            out = place_order::Output {
                amount: out.amount + placed_order.amount,
                payment_required: out.payment_required
                    || placed_order.payment_required,
            };
        }

        Ok(out)
    }
}

/// Error of [`Checkout`] [`Command`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// [`Cart`] has nothing to order.
    #[display("Cart is empty")]
    EmptyCart,

    /// [`PlaceOrder`] error.
    ///
    /// The [`Order`]s of the items preceding the failed one stay placed.
    #[display("Failed to place an order: {source}")]
    PlaceOrder {
        /// [`menu::Id`]s of the [`Cart`] items ordered before the failure.
        placed: Vec<menu::Id>,

        /// Summary of the [`Order`]s placed before the failure.
        done: place_order::Output,

        /// Cause of the failure.
        source: place_order::ExecutionError,
    },
}

#[cfg(all(test, feature = "http"))]
mod spec {
    use ::http::StatusCode;
    use common::Money;

    use crate::{
        cart::{Cart, Product},
        command::Command as _,
        domain::{
            order::{self, Kind, PaymentMethod},
            Quantity,
        },
        infra::backend::fake::Fake,
        Config, Service,
    };

    use super::{place_order, Checkout, ExecutionError};

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: id.parse().unwrap(),
            name: format!("Food {id}").parse().unwrap(),
            image_url: format!("{id}.png").parse().unwrap(),
            price: price.parse().unwrap(),
        }
    }

    fn cmd(cart: Cart) -> Checkout {
        Checkout {
            cart,
            customer: order::Customer {
                email: "jane@spoon.lk".parse().unwrap(),
                first_name: "Jane".parse().unwrap(),
                last_name: "Perera".parse().unwrap(),
            },
            address: "12 Galle Road, Colombo".parse().unwrap(),
            payment_method: PaymentMethod::Card,
            kind: Kind::Delivery,
        }
    }

    #[tokio::test]
    async fn orders_every_item() {
        let backend = Fake::default();
        let service = Service::new(Config::default(), backend.clone());
        let mut cart = Cart::default();
        cart.add(product("a", "500"), Quantity::new(2).unwrap());
        cart.add(product("b", "150"), Quantity::ONE);

        let out = service.execute(cmd(cart)).await.unwrap();

        assert_eq!(out.amount, "1150".parse::<Money>().unwrap());
        assert!(out.payment_required);
        assert_eq!(backend.calls(), ["create_order", "create_order"]);
    }

    #[tokio::test]
    async fn rejects_empty_cart() {
        let backend = Fake::default();
        let service = Service::new(Config::default(), backend.clone());

        let err = service.execute(cmd(Cart::default())).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::EmptyCart));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn stops_at_first_failure() {
        let backend =
            Fake::rejecting(StatusCode::SERVICE_UNAVAILABLE, "try later");
        let service = Service::new(Config::default(), backend.clone());
        let mut cart = Cart::default();
        cart.add(product("a", "500"), Quantity::ONE);
        cart.add(product("b", "150"), Quantity::ONE);

        let err = service.execute(cmd(cart)).await.unwrap_err();

        let ExecutionError::PlaceOrder { placed, done, .. } = err.as_ref()
        else {
            panic!("not a `PlaceOrder` error");
        };
        assert!(placed.is_empty());
        assert_eq!(done.amount, Money::ZERO);
        assert_eq!(backend.calls(), ["create_order"]);
    }

    #[tokio::test]
    async fn reports_orders_placed_before_failure() {
        let backend = Fake::rejecting_nth(
            "create_order",
            2,
            StatusCode::SERVICE_UNAVAILABLE,
            "try later",
        );
        let service = Service::new(Config::default(), backend.clone());
        let mut cart = Cart::default();
        cart.add(product("a", "500"), Quantity::new(2).unwrap());
        cart.add(product("b", "150"), Quantity::ONE);
        cart.add(product("c", "90"), Quantity::ONE);

        let err = service.execute(cmd(cart)).await.unwrap_err();

        let ExecutionError::PlaceOrder {
            placed,
            done,
            source,
        } = err.as_ref()
        else {
            panic!("not a `PlaceOrder` error");
        };
        assert_eq!(placed, &vec![product("a", "500").id]);
        assert_eq!(done.amount, "1000".parse::<Money>().unwrap());
        assert!(done.payment_required);
        assert!(matches!(source, place_order::ExecutionError::Backend(_)));
        assert_eq!(backend.calls(), ["create_order", "create_order"]);
    }
}
