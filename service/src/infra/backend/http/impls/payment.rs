//! [`Payment`]-related [`Backend`] implementations.

use common::{operations::Insert, Money};
use reqwest::Method;
use secrecy::ExposeSecret as _;
use serde::Serialize;
use tracerr::Traced;

use crate::{
    domain::{payment::PaymentDateTime, Payment},
    infra::{backend, Backend, Http},
};

/// [`Payment`] as the backend accepts it.
///
/// Holds exposed card secrets, so it's never logged.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPayment {
    email: String,
    #[serde(rename = "phonenumber")]
    phone_number: String,
    card_holder_name: String,
    card_number: String,
    #[serde(rename = "expireDate")]
    expiry: String,
    cvv: String,
    payment_date: PaymentDateTime,
    amount: Money,
}

impl From<&Payment> for NewPayment {
    fn from(payment: &Payment) -> Self {
        Self {
            email: payment.email.to_string(),
            phone_number: payment.phone.to_string(),
            card_holder_name: payment.card.holder.to_string(),
            card_number: payment.card.number.expose_secret().grouped(),
            expiry: payment.card.expiry.to_string(),
            cvv: payment.card.cvv.expose_secret().as_ref().to_owned(),
            payment_date: payment.paid_at,
            amount: payment.amount,
        }
    }
}

impl Backend<Insert<Payment>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(payment): Insert<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::POST, "/payment/create")
            .json(&NewPayment::from(&payment));
        self.perform(req).await.map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::domain::{
        payment::{Card, PaymentDateTime},
        Payment,
    };

    use super::NewPayment;

    #[test]
    fn encodes_payment() {
        let payment = Payment {
            email: "jane@spoon.lk".parse().unwrap(),
            phone: "+94 771234567".parse().unwrap(),
            card: Card {
                holder: "JANE PERERA".parse().unwrap(),
                number: SecretBox::new(Box::new(
                    "4111111111111111".parse().unwrap(),
                )),
                expiry: "08/27".parse().unwrap(),
                cvv: SecretBox::new(Box::new("123".parse().unwrap())),
            },
            amount: "2400".parse().unwrap(),
            paid_at: PaymentDateTime::from_rfc3339("2025-03-01T10:20:30Z")
                .unwrap(),
        };

        let json = serde_json::to_value(NewPayment::from(&payment)).unwrap();

        assert_eq!(
            json,
            json!({
                "email": "jane@spoon.lk",
                "phonenumber": "+94 771234567",
                "cardHolderName": "JANE PERERA",
                "cardNumber": "4111 1111 1111 1111",
                "expireDate": "08/27",
                "cvv": "123",
                "paymentDate": "2025-03-01T10:20:30Z",
                "amount": "2400",
            }),
        );
    }
}
