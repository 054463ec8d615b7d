//! [`Command`] for paying an order amount by card.

use common::{operations::Insert, DateTime, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    payment::{Card, Phone},
    user::Email,
};
use crate::{
    domain::{payment, user, Payment},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for paying an order amount by card.
#[derive(Clone, Debug)]
pub struct MakePayment {
    /// Contact [`Email`] of the payer.
    pub email: user::Email,

    /// Contact [`Phone`] of the payer.
    pub phone: payment::Phone,

    /// [`Card`] to charge.
    pub card: payment::Card,

    /// Amount to charge.
    pub amount: Money,
}

impl<Api> Command<MakePayment> for Service<Api>
where
    Api: Backend<Insert<Payment>, Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: MakePayment) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MakePayment {
            email,
            phone,
            card,
            amount,
        } = cmd;

        if amount == Money::ZERO {
            return Err(tracerr::new!(E::NothingToPay));
        }

        self.backend()
            .execute(Insert(Payment {
                email,
                phone,
                card,
                amount,
                paid_at: DateTime::now().coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`MakePayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// Amount to pay is zero.
    #[display("There is nothing to pay")]
    NothingToPay,
}

#[cfg(all(test, feature = "http"))]
mod spec {
    use common::Money;
    use secrecy::SecretBox;

    use crate::{
        command::Command as _, domain::payment, infra::backend::fake::Fake,
        Config, Service,
    };

    use super::{ExecutionError, MakePayment};

    fn cmd(amount: Money) -> MakePayment {
        MakePayment {
            email: "jane@spoon.lk".parse().unwrap(),
            phone: "0771234567".parse().unwrap(),
            card: payment::Card {
                holder: "JANE PERERA".parse().unwrap(),
                number: SecretBox::new(Box::new(
                    "4111 1111 1111 1111".parse().unwrap(),
                )),
                expiry: "08/27".parse().unwrap(),
                cvv: SecretBox::new(Box::new("123".parse().unwrap())),
            },
            amount,
        }
    }

    #[tokio::test]
    async fn pays() {
        let backend = Fake::default();
        let service = Service::new(Config::default(), backend.clone());

        service
            .execute(cmd("2400".parse().unwrap()))
            .await
            .unwrap();

        assert_eq!(backend.calls(), ["create_payment"]);
    }

    #[tokio::test]
    async fn zero_amount_never_reaches_backend() {
        let backend = Fake::default();
        let service = Service::new(Config::default(), backend.clone());

        let err = service.execute(cmd(Money::ZERO)).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NothingToPay));
        assert!(backend.calls().is_empty());
    }
}
