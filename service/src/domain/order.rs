//! [`Order`] definitions.

use common::{define_kind, Date, Money};
use derive_more::{AsRef, Display};

use crate::domain::{menu, user, Quantity};

use super::define_text;

/// Order of a single food line placed by a customer.
#[derive(Clone, Debug)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// [`Customer`] who placed this [`Order`].
    pub customer: Customer,

    /// Delivery [`Address`] of this [`Order`].
    pub address: Address,

    /// [`PaymentMethod`] of this [`Order`].
    pub payment_method: PaymentMethod,

    /// Total amount of this [`Order`].
    pub amount: Money,

    /// [`Kind`] of this [`Order`].
    pub kind: Kind,

    /// [`Date`] this [`Order`] was placed on.
    pub date: Date,

    /// Ordered [`Line`].
    pub line: Line,

    /// Current [`Status`] of this [`Order`].
    pub status: Status,
}

/// [`Order`] contents submitted on placement.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Customer`] placing the [`Order`].
    pub customer: Customer,

    /// Delivery [`Address`].
    pub address: Address,

    /// Chosen [`PaymentMethod`].
    pub payment_method: PaymentMethod,

    /// Chosen [`Kind`].
    pub kind: Kind,

    /// [`Date`] of placement.
    pub date: Date,

    /// Ordered [`Line`].
    pub line: Line,
}

impl Draft {
    /// Returns the total amount of this [`Draft`].
    #[must_use]
    pub fn amount(&self) -> Money {
        self.line.amount()
    }
}

/// Customer of an [`Order`].
#[derive(Clone, Debug)]
pub struct Customer {
    /// Contact [`user::Email`].
    pub email: user::Email,

    /// First [`user::Name`].
    pub first_name: user::Name,

    /// Last [`user::Name`].
    pub last_name: user::Name,
}

/// Food line of an [`Order`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    /// [`menu::Name`] of the ordered food.
    pub food_name: menu::Name,

    /// Unit price of the ordered food.
    pub price: Money,

    /// Ordered [`Quantity`].
    pub quantity: Quantity,
}

impl Line {
    /// Returns the amount of this [`Line`].
    #[must_use]
    pub fn amount(&self) -> Money {
        self.price * self.quantity.get()
    }
}

/// ID of an [`Order`], opaque to the client.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is not blank.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.trim().is_empty() && id.trim() == id).then_some(Self(id))
    }
}

impl std::str::FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Id`")
    }
}

define_text! {
    /// Delivery address of an [`Order`].
    pub struct Address(max = 512);
}

define_kind! {
    #[doc = "Fulfilment status of an [`Order`]."]
    enum Status {
        #[doc = "Placed, not yet fulfilled."]
        Pending = "pending",

        #[doc = "Fulfilled."]
        Success = "success",

        #[doc = "Cancelled by the restaurant."]
        Cancelled = "cancelled",
    }
}

define_kind! {
    #[doc = "Kind of an [`Order`] fulfilment."]
    enum Kind {
        #[doc = "Delivered to the [`Address`]."]
        Delivery = "Delivery",

        #[doc = "Collected by the customer."]
        TakeAway = "Take Away",
    }
}

impl Kind {
    /// Indicates whether the given [`PaymentMethod`] may be used with this
    /// [`Kind`] of [`Order`].
    #[must_use]
    pub const fn allows(self, method: PaymentMethod) -> bool {
        match self {
            Self::Delivery => true,
            Self::TakeAway => matches!(method, PaymentMethod::Card),
        }
    }

    /// Returns the [`PaymentMethod`] preselected for this [`Kind`].
    #[must_use]
    pub const fn default_payment_method(self) -> PaymentMethod {
        match self {
            Self::Delivery => PaymentMethod::CashOnDelivery,
            Self::TakeAway => PaymentMethod::Card,
        }
    }
}

define_kind! {
    #[doc = "Payment method of an [`Order`]."]
    enum PaymentMethod {
        #[doc = "Cash paid on delivery."]
        CashOnDelivery = "cod",

        #[doc = "Card paid upfront."]
        Card = "card",
    }
}
