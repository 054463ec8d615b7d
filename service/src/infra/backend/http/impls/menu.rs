//! [`Food`]-related [`Backend`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    pagination::Selector,
    Money,
};
use reqwest::{
    multipart::{Form, Part},
    Method,
};
use serde::Deserialize;
use tracerr::Traced;

use crate::{
    domain::{menu, Food},
    infra::{backend, Backend, Http},
    read::menu::list::{Filter, Page},
};

use super::{pagination, parse, Field, PageEnvelope};

/// [`Food`] as the backend represents it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFood {
    #[serde(rename = "_id")]
    id: String,
    food_name: String,
    price: Money,
    #[serde(default)]
    description: String,
    food_category: String,
    #[serde(default)]
    image_url: String,
}

impl TryFrom<RawFood> for Food {
    type Error = Field;

    fn try_from(raw: RawFood) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse("_id", &raw.id)?,
            name: parse("foodName", &raw.food_name)?,
            price: raw.price,
            description: parse("description", &raw.description)?,
            category: parse("foodCategory", &raw.food_category)?,
            image_url: parse("imageUrl", &raw.image_url)?,
        })
    }
}

/// Builds a multipart [`Form`] out of the provided [`menu::Draft`].
fn form(draft: menu::Draft) -> Form {
    let form = Form::new()
        .text("foodName", draft.name.to_string())
        .text("price", draft.price.amount().normalize().to_string())
        .text("description", draft.description.to_string())
        .text("foodCategory", draft.category.to_string());
    match draft.image {
        menu::Image::Upload(upload) => form.part(
            "image",
            Part::bytes(upload.bytes).file_name(upload.file_name),
        ),
        menu::Image::Existing(url) => form.text("imageUrl", url.to_string()),
    }
}

impl Backend<Select<By<Page, Selector<Filter>>>> for Http {
    type Ok = Page;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page, Selector<Filter>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Selector { arguments, filter } = by.into_inner();

        let req = match filter {
            Filter::All => self.request(Method::GET, "/menu/all"),
            Filter::Category(category) => self
                .request(Method::GET, "/menu/search")
                .query(&[("category", category.to_string())])
                .query(&[("query", "")]),
            Filter::Search(query) => self
                .request(Method::GET, "/menu/search")
                .query(&[("category", "")])
                .query(&[("query", query.to_string())]),
        };
        let envelope: PageEnvelope<RawFood> = self
            .fetch(req.query(&pagination(&arguments)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(envelope.into_page(&arguments))
    }
}

impl Backend<Insert<menu::Draft>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<menu::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::POST, "/menu/create")
            .multipart(form(draft));
        self.perform(req).await.map_err(tracerr::wrap!())
    }
}

impl Backend<Update<menu::Edit>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(edit): Update<menu::Edit>,
    ) -> Result<Self::Ok, Self::Err> {
        let menu::Edit { id, draft } = edit;

        let req = self
            .request(Method::PUT, &format!("/menu/updateFood/{id}"))
            .multipart(form(draft));
        self.perform(req).await.map_err(tracerr::wrap!())
    }
}

impl Backend<Delete<By<Food, menu::Id>>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Food, menu::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let req =
            self.request(Method::DELETE, &format!("/menu/deleteFood/{id}"));
        self.perform(req).await.map_err(tracerr::wrap!())
    }
}
