//! In-memory [`Backend`] recording the operations executed on it.

use std::sync::{Arc, Mutex, PoisonError};

use ::http::StatusCode;
use common::{
    operations::{By, Delete, Insert, Select, Update},
    pagination::Page,
    DateTime,
};
use secrecy::SecretBox;
use tracerr::Traced;

use crate::{
    domain::{
        feedback, menu,
        order::{self, Status},
        user::{self, session, Session},
        Feedback, Food, Payment, User,
    },
    infra::{backend, http, Backend},
    read,
};

/// In-memory [`Backend`].
#[derive(Clone, Debug, Default)]
pub(crate) struct Fake {
    /// Names of the executed operations, in execution order.
    calls: Arc<Mutex<Vec<&'static str>>>,

    /// Message every operation is rejected with, if any.
    rejection: Option<(StatusCode, &'static str)>,

    /// Operation and its occurrence (1-based) the rejection is limited to.
    rejected_call: Option<(&'static str, usize)>,

    /// Number of [`Feedback`]s on the wall.
    feedback: Arc<Mutex<usize>>,
}

impl Fake {
    /// Creates a new [`Fake`] rejecting every operation with the provided
    /// `status` and `message`.
    pub(crate) fn rejecting(
        status: StatusCode,
        message: &'static str,
    ) -> Self {
        Self {
            rejection: Some((status, message)),
            ..Self::default()
        }
    }

    /// Creates a new [`Fake`] rejecting only the `nth` execution of the
    /// named operation with the provided `status` and `message`.
    pub(crate) fn rejecting_nth(
        call: &'static str,
        nth: usize,
        status: StatusCode,
        message: &'static str,
    ) -> Self {
        Self {
            rejection: Some((status, message)),
            rejected_call: Some((call, nth)),
            ..Self::default()
        }
    }

    /// Sets the number of [`Feedback`]s on the wall.
    pub(crate) fn set_feedback(&self, count: usize) {
        *self.feedback.lock().unwrap_or_else(PoisonError::into_inner) = count;
    }

    /// Returns names of the operations executed so far.
    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records the named operation and resolves its outcome.
    fn record(
        &self,
        call: &'static str,
    ) -> Result<(), Traced<backend::Error>> {
        let occurrence = {
            let mut calls =
                self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push(call);
            calls.iter().filter(|c| **c == call).count()
        };
        let rejected = self
            .rejected_call
            .map_or(true, |(c, nth)| c == call && nth == occurrence);
        match self.rejection.filter(|_| rejected) {
            Some((status, message)) => {
                Err(tracerr::new!(backend::Error::from(http::Error::Status {
                    status,
                    message: Some(message.into()),
                })))
            }
            None => Ok(()),
        }
    }
}

/// Implements [`Backend`] operations of [`Fake`] having no output.
macro_rules! impl_unit_ops {
    ($($op:ty => $name:literal),* $(,)?) => {$(
        impl Backend<$op> for Fake {
            type Ok = ();
            type Err = Traced<backend::Error>;

            async fn execute(&self, _: $op) -> Result<(), Self::Err> {
                self.record($name)
            }
        }
    )*};
}

impl_unit_ops! {
    Insert<Session> => "authorize",
    Delete<By<Session, session::Current>> => "deauthorize",
    Insert<user::Registration> => "register",
    Insert<menu::Draft> => "create_food",
    Update<menu::Edit> => "update_food",
    Delete<By<Food, menu::Id>> => "delete_food",
    Insert<order::Draft> => "create_order",
    Update<(order::Id, Status)> => "update_order_status",
    Insert<feedback::Draft> => "create_feedback",
    Insert<Payment> => "create_payment",
}

impl Backend<Insert<session::Credentials>> for Fake {
    type Ok = Session;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Insert<session::Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        self.record("login")?;
        let token = session::Token::new("t0k3n").unwrap();
        Ok(Session {
            token: SecretBox::new(Box::new(token)),
        })
    }
}

impl Backend<Select<By<User, session::Current>>> for Fake {
    type Ok = User;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<User, session::Current>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.record("me")?;
        Ok(User {
            id: user::Id::new("u1").unwrap(),
            first_name: "Jane".parse().unwrap(),
            last_name: "Perera".parse().unwrap(),
            email: "jane@spoon.lk".parse().unwrap(),
            role: user::Role::Admin,
        })
    }
}

impl
    Backend<
        Select<
            By<read::feedback::list::Page, read::feedback::list::Selector>,
        >,
    > for Fake
{
    type Ok = read::feedback::list::Page;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::feedback::list::Page, read::feedback::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        self.record("feedback")?;
        let count =
            *self.feedback.lock().unwrap_or_else(PoisonError::into_inner);
        let wall = (1..=count)
            .map(|n| Feedback {
                id: feedback::Id::new(n.to_string()).unwrap(),
                content: feedback::Draft {
                    customer_name: format!("Guest {n}").parse().unwrap(),
                    email: "guest@spoon.lk".parse().unwrap(),
                    rating: "5".parse().unwrap(),
                    text: "Lovely".parse().unwrap(),
                },
                created_at: DateTime::now().coerce(),
            })
            .collect::<Vec<_>>();
        Ok(Page::from_slice(&wall, &by.into_inner().arguments))
    }
}
