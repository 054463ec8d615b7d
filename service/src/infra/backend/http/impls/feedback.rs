//! [`Feedback`]-related [`Backend`] implementations.

use common::{
    operations::{By, Insert, Select},
    pagination::Selector,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        feedback::{self, CreationDateTime, Rating},
        Feedback,
    },
    infra::{backend, Backend, Http},
    read::feedback::list::Page,
};

use super::{pagination, parse, Field, PageEnvelope};

/// [`Feedback`] as the backend represents it.
#[derive(Debug, Deserialize)]
struct RawFeedback {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "customername")]
    customer_name: String,
    email: String,
    ratings: u32,
    #[serde(rename = "feedback")]
    text: String,
    #[serde(rename = "createdAt")]
    created_at: String,
}

impl TryFrom<RawFeedback> for Feedback {
    type Error = Field;

    fn try_from(raw: RawFeedback) -> Result<Self, Self::Error> {
        Ok(Self {
            id: feedback::Id::new(raw.id).ok_or("_id")?,
            content: feedback::Draft {
                customer_name: parse("customername", &raw.customer_name)?,
                email: parse("email", &raw.email)?,
                rating: u8::try_from(raw.ratings)
                    .ok()
                    .and_then(Rating::new)
                    .ok_or("ratings")?,
                text: parse("feedback", &raw.text)?,
            },
            created_at: CreationDateTime::from_rfc3339(&raw.created_at)
                .map_err(|_| "createdAt")?,
        })
    }
}

/// [`feedback::Draft`] as the backend accepts it.
#[derive(Debug, Serialize)]
struct NewFeedback {
    #[serde(rename = "customername")]
    customer_name: String,
    email: String,
    ratings: u8,
    #[serde(rename = "feedback")]
    text: String,
}

impl From<feedback::Draft> for NewFeedback {
    fn from(draft: feedback::Draft) -> Self {
        Self {
            customer_name: draft.customer_name.to_string(),
            email: draft.email.to_string(),
            ratings: draft.rating.stars(),
            text: draft.text.to_string(),
        }
    }
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
            .request(Method::GET, "/feedback/getall")
            .query(&pagination(&arguments));
        let envelope: PageEnvelope<RawFeedback> =
            self.fetch(req).await.map_err(tracerr::wrap!())?;

        Ok(envelope.into_page(&arguments))
    }
}

impl Backend<Insert<feedback::Draft>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<feedback::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::POST, "/feedback/create")
            .json(&NewFeedback::from(draft));
        self.perform(req).await.map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::domain::Feedback;

    use super::RawFeedback;

    fn decode(json: serde_json::Value) -> Result<Feedback, &'static str> {
        Feedback::try_from(
            serde_json::from_value::<RawFeedback>(json).unwrap(),
        )
    }

    #[test]
    fn decodes_feedback() {
        let feedback = decode(json!({
            "_id": "f1",
            "customername": "Nimal",
            "email": "nimal@spoon.lk",
            "ratings": 4,
            "feedback": "Great koththu!",
            "createdAt": "2025-03-01T10:20:30.123Z",
        }))
        .unwrap();

        assert_eq!(feedback.content.rating.stars(), 4);
        assert_eq!(feedback.content.text.to_string(), "Great koththu!");
        assert_eq!(feedback.created_at.date().to_string(), "2025-03-01");
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let res = decode(json!({
            "_id": "f1",
            "customername": "Nimal",
            "email": "nimal@spoon.lk",
            "ratings": 9,
            "feedback": "Great koththu!",
            "createdAt": "2025-03-01T10:20:30.123Z",
        }));

        assert_eq!(res.err(), Some("ratings"));
    }
}
