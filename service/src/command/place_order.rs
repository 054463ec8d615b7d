//! [`Command`] for placing an [`Order`].

use common::{operations::Insert, Date, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    order::{Address, Customer, Kind, Line, PaymentMethod},
    Order,
};
use crate::{
    domain::order,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for placing an [`Order`] of a single food [`Line`].
///
/// The [`Order`] is dated today and starts as pending.
#[derive(Clone, Debug)]
pub struct PlaceOrder {
    /// [`Customer`] placing the [`Order`].
    pub customer: order::Customer,

    /// Delivery [`Address`].
    pub address: order::Address,

    /// Chosen [`PaymentMethod`].
    pub payment_method: order::PaymentMethod,

    /// Chosen [`Kind`].
    pub kind: order::Kind,

    /// Ordered [`Line`].
    pub line: order::Line,
}

/// Output of [`PlaceOrder`] [`Command`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Output {
    /// Total amount of the placed [`Order`].
    pub amount: Money,

    /// Indicator whether the amount is to be paid by card right away.
    pub payment_required: bool,
}

impl<Api> Command<PlaceOrder> for Service<Api>
where
    Api: Backend<Insert<order::Draft>, Err = Traced<backend::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: PlaceOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let PlaceOrder {
            customer,
            address,
            payment_method,
            kind,
            line,
        } = cmd;

        if !kind.allows(payment_method) {
            return Err(tracerr::new!(E::PaymentMethodNotAllowed {
                kind,
                payment_method,
            }));
        }

        let draft = order::Draft {
            customer,
            address,
            payment_method,
            kind,
            date: Date::today(),
            line,
        };
        let amount = draft.amount();

        self.backend()
            .execute(Insert(draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(Output {
            amount,
            payment_required: payment_method == order::PaymentMethod::Card,
        })
    }
}

/// Error of [`PlaceOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`PaymentMethod`] cannot be used with the [`Kind`] of [`Order`].
    #[display("`{kind}` orders cannot be paid by `{payment_method}`")]
    PaymentMethodNotAllowed {
        /// Chosen [`Kind`].
        kind: order::Kind,

        /// Chosen [`PaymentMethod`].
        payment_method: order::PaymentMethod,
    },
}
