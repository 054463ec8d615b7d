//! [`Command`] for leaving [`Feedback`].

use common::operations::Insert;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    feedback::{CustomerName, Rating, Text},
    user::Email,
    Feedback,
};
use crate::{
    domain::{feedback, user},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for leaving [`Feedback`].
#[derive(Clone, Debug)]
pub struct SubmitFeedback {
    /// [`CustomerName`] to sign the [`Feedback`] with.
    pub customer_name: feedback::CustomerName,

    /// [`Email`] of the author.
    pub email: user::Email,

    /// Given [`Rating`].
    pub rating: feedback::Rating,

    /// [`Text`] of the [`Feedback`].
    pub text: feedback::Text,
}

impl<Api> Command<SubmitFeedback> for Service<Api>
where
    Api: Backend<Insert<feedback::Draft>, Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        cmd: SubmitFeedback,
    ) -> Result<Self::Ok, Self::Err> {
        let SubmitFeedback {
            customer_name,
            email,
            rating,
            text,
        } = cmd;

        self.backend()
            .execute(Insert(feedback::Draft {
                customer_name,
                email,
                rating,
                text,
            }))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

#[cfg(all(test, feature = "http"))]
mod spec {
    use crate::{
        command::Command as _, infra::backend::fake::Fake, Config, Service,
    };

    use super::SubmitFeedback;

    #[tokio::test]
    async fn submits() {
        let backend = Fake::default();
        let service = Service::new(Config::default(), backend.clone());

        service
            .execute(SubmitFeedback {
                customer_name: "Nimal".parse().unwrap(),
                email: "nimal@spoon.lk".parse().unwrap(),
                rating: "5".parse().unwrap(),
                text: "Best koththu in town".parse().unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(backend.calls(), ["create_feedback"]);
    }
}
