//! [`Order`]-related [`Backend`] implementations.

use common::{
    operations::{By, Insert, Select, Update},
    pagination::Selector,
    Date, DateTime, Money,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        order::{self, Kind, PaymentMethod, Status},
        user, Order, Quantity,
    },
    infra::{
        backend::{self, http::Envelope},
        Backend, Http,
    },
    read::order::{list::Page, Report},
};

use super::{decode_all, pagination, parse, Error, Field, PageEnvelope};

/// [`Order`] as the backend represents it.
#[derive(Debug, Deserialize)]
struct RawOrder {
    #[serde(rename = "_id")]
    id: String,
    email: String,
    #[serde(rename = "firstname")]
    first_name: String,
    #[serde(rename = "lastname")]
    last_name: String,
    address: String,
    #[serde(rename = "paymentmethod")]
    payment_method: String,
    amount: Money,
    #[serde(rename = "orderType")]
    kind: String,
    #[serde(rename = "orderDate")]
    date: String,
    #[serde(rename = "foodname")]
    food_name: String,
    price: Money,
    qty: u32,
    status: String,
}

impl TryFrom<RawOrder> for Order {
    type Error = Field;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        // Storage may widen the date to a full timestamp.
        let date = raw
            .date
            .trim()
            .parse::<Date>()
            .ok()
            .or_else(|| Some(DateTime::from_rfc3339(&raw.date).ok()?.date()))
            .ok_or("orderDate")?;

        Ok(Self {
            id: parse("_id", &raw.id)?,
            customer: order::Customer {
                email: parse("email", &raw.email)?,
                first_name: parse("firstname", &raw.first_name)?,
                last_name: parse("lastname", &raw.last_name)?,
            },
            address: parse("address", &raw.address)?,
            payment_method: parse("paymentmethod", &raw.payment_method)?,
            amount: raw.amount,
            kind: parse("orderType", &raw.kind)?,
            date,
            line: order::Line {
                food_name: parse("foodname", &raw.food_name)?,
                price: raw.price,
                quantity: Quantity::new(raw.qty).ok_or("qty")?,
            },
            status: parse("status", &raw.status)?,
        })
    }
}

/// [`order::Draft`] as the backend accepts it.
#[derive(Debug, Serialize)]
struct NewOrder {
    email: String,
    #[serde(rename = "firstname")]
    first_name: String,
    #[serde(rename = "lastname")]
    last_name: String,
    address: String,
    #[serde(rename = "paymentmethod")]
    payment_method: PaymentMethod,
    amount: Money,
    #[serde(rename = "orderType")]
    kind: Kind,
    #[serde(rename = "orderDate")]
    date: Date,
    #[serde(rename = "foodname")]
    food_name: String,
    price: Money,
    qty: u32,
    status: Status,
}

impl From<order::Draft> for NewOrder {
    fn from(draft: order::Draft) -> Self {
        let amount = draft.amount();
        let order::Draft {
            customer,
            address,
            payment_method,
            kind,
            date,
            line,
        } = draft;
        Self {
            email: customer.email.to_string(),
            first_name: customer.first_name.to_string(),
            last_name: customer.last_name.to_string(),
            address: address.to_string(),
            payment_method,
            amount,
            kind,
            date,
            food_name: line.food_name.to_string(),
            price: line.price,
            qty: line.quantity.get(),
            status: Status::Pending,
        }
    }
}

/// Body of an [`Order`] [`Status`] change.
#[derive(Debug, Serialize)]
struct StatusChange {
    status: Status,
}

impl Backend<Select<By<Page, Selector<()>>>> for Http {
    type Ok = Page;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page, Selector<()>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Selector { arguments, .. } = by.into_inner();

        let req = self
            .request(Method::GET, "/order/getall")
            .query(&pagination(&arguments));
        let envelope: PageEnvelope<RawOrder> =
            self.fetch(req).await.map_err(tracerr::wrap!())?;

        Ok(envelope.into_page(&arguments))
    }
}

impl Backend<Select<By<Vec<Order>, user::Email>>> for Http {
    type Ok = Vec<Order>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Order>, user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();

        let req =
            self.request(Method::GET, &format!("/order/viewOrder/{email}"));
        let Envelope { data } = self
            .fetch::<Envelope<Vec<RawOrder>>>(req)
            .await
            .map_err(tracerr::wrap!())?;

        Ok(decode_all(data))
    }
}

impl Backend<Select<By<Report, ()>>> for Http {
    type Ok = Report;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<Report, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.request(Method::GET, "/report/pdf");
        let bytes = self
            .send(req)
            .await
            .map_err(tracerr::wrap!())?
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(Report::from(bytes.to_vec()))
    }
}

impl Backend<Insert<order::Draft>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<order::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::POST, "/order/create")
            .json(&NewOrder::from(draft));
        self.perform(req).await.map_err(tracerr::wrap!())
    }
}

impl Backend<Update<(order::Id, Status)>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update((id, status)): Update<(order::Id, Status)>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::PUT, &format!("/order/updateStatus/{id}"))
            .json(&StatusChange { status });
        self.perform(req).await.map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::Date;
    use serde_json::json;

    use crate::domain::{
        order::{self, Kind, PaymentMethod, Status},
        Order, Quantity,
    };

    use super::{NewOrder, RawOrder};

    fn raw() -> serde_json::Value {
        json!({
            "_id": "6701",
            "email": "jane@spoon.lk",
            "firstname": "Jane",
            "lastname": "Perera",
            "address": "12 Galle Road, Colombo",
            "paymentmethod": "cod",
            "amount": "2400",
            "orderType": "Delivery",
            "orderDate": "2024-12-05",
            "foodname": "Chicken Koththu",
            "price": "1200",
            "qty": 2,
            "status": "Pending",
        })
    }

    fn decode(json: serde_json::Value) -> Result<Order, &'static str> {
        Order::try_from(serde_json::from_value::<RawOrder>(json).unwrap())
    }

    #[test]
    fn decodes_order() {
        let order = decode(raw()).unwrap();

        assert_eq!(order.id.to_string(), "6701");
        assert_eq!(order.customer.first_name.to_string(), "Jane");
        assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
        assert_eq!(order.kind, Kind::Delivery);
        assert_eq!(order.status, Status::Pending);
        assert_eq!(order.line.quantity.get(), 2);
        assert_eq!(order.amount.to_string(), "2400.00");
        assert_eq!(order.date.to_string(), "2024-12-05");
    }

    #[test]
    fn decodes_widened_date() {
        let mut json = raw();
        json["orderDate"] = json!("2024-12-05T00:00:00.000Z");

        assert_eq!(decode(json).unwrap().date.to_string(), "2024-12-05");
    }

    #[test]
    fn rejects_unknown_status() {
        let mut json = raw();
        json["status"] = json!("lost");

        assert_eq!(decode(json).err(), Some("status"));

        let mut json = raw();
        json["qty"] = json!(0);

        assert_eq!(decode(json).err(), Some("qty"));
    }

    #[test]
    fn encodes_new_order() {
        let draft = order::Draft {
            customer: order::Customer {
                email: "jane@spoon.lk".parse().unwrap(),
                first_name: "Jane".parse().unwrap(),
                last_name: "Perera".parse().unwrap(),
            },
            address: "12 Galle Road".parse().unwrap(),
            payment_method: PaymentMethod::Card,
            kind: Kind::TakeAway,
            date: "2024-12-05".parse::<Date>().unwrap(),
            line: order::Line {
                food_name: "Milk Tea".parse().unwrap(),
                price: "150".parse().unwrap(),
                quantity: Quantity::new(3).unwrap(),
            },
        };

        let json = serde_json::to_value(NewOrder::from(draft)).unwrap();

        assert_eq!(
            json,
            json!({
                "email": "jane@spoon.lk",
                "firstname": "Jane",
                "lastname": "Perera",
                "address": "12 Galle Road",
                "paymentmethod": "card",
                "amount": "450",
                "orderType": "Take Away",
                "orderDate": "2024-12-05",
                "foodname": "Milk Tea",
                "price": "150",
                "qty": 3,
                "status": "pending",
            }),
        );
    }
}
