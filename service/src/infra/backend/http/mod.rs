//! JSON-over-HTTP [`Backend`] implementation.

mod impls;

use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

use ::http::StatusCode;
use derive_more::{Display, Error as StdError, From};
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret as _, SecretBox};
use serde::{de::DeserializeOwned, Deserialize};
use tracerr::Traced;
use tracing as log;

use crate::{domain::user::session, infra::backend};
#[cfg(doc)]
use crate::infra::Backend;

/// [`Http`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL every request path is appended to.
    pub base_url: String,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// JSON-over-HTTP [`Backend`] client.
///
/// Clones share the same connection pool and [`session::Token`].
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest::Client`].
    client: reqwest::Client,

    /// Base URL without a trailing slash.
    base_url: Arc<str>,

    /// [`session::Token`] authorizing requests, if any.
    token: Arc<RwLock<Option<SecretBox<session::Token>>>>,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the underlying [`reqwest::Client`].
    pub fn new(conf: &Config) -> Result<Self, Traced<backend::Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self {
            client,
            base_url: conf.base_url.trim_end_matches('/').into(),
            token: Arc::default(),
        })
    }

    /// Indicates whether a [`session::Token`] is attached to requests.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replaces the [`session::Token`] attached to requests.
    fn authorize(&self, token: Option<SecretBox<session::Token>>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Builds a request to the given `path`, authorized if possible.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        match &*self.token.read().unwrap_or_else(PoisonError::into_inner) {
            Some(token) => req.bearer_auth(token.expose_secret().as_ref()),
            None => req,
        }
    }

    /// Sends the request, turning non-successful responses into errors.
    async fn send(
        &self,
        req: RequestBuilder,
    ) -> Result<Response, Traced<backend::Error>> {
        let resp = req
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let path = resp.url().path().to_owned();
        let message = resp
            .json::<Rejection>()
            .await
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.trim().is_empty());
        log::debug!("`{path}` responded with `{status}`: {message:?}");
        Err(tracerr::new!(Error::Status { status, message }))
            .map_err(tracerr::map_from)
    }

    /// Sends the request and decodes its JSON response body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, Traced<backend::Error>> {
        self.send(req)
            .await
            .map_err(tracerr::wrap!())?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }

    /// Sends the request, ignoring its response body.
    async fn perform(
        &self,
        req: RequestBuilder,
    ) -> Result<(), Traced<backend::Error>> {
        self.send(req).await.map_err(tracerr::wrap!()).map(drop)
    }
}

/// Body of a rejected request.
#[derive(Debug, Deserialize)]
struct Rejection {
    /// Human-readable reason of the rejection.
    message: Option<String>,
}

/// Envelope of a successful response.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    /// Payload of the response.
    data: T,
}

/// Envelope of a page of a collection.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct PageEnvelope<T> {
    /// Items of the page.
    #[serde(default)]
    data: Vec<T>,

    /// Total number of pages of the collection.
    #[serde(rename = "totalPages", default)]
    total_pages: Option<u32>,
}

/// [`Http`] client error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request couldn't be sent or its response couldn't be read.
    #[display("Request failed: {_0}")]
    #[from]
    Request(reqwest::Error),

    /// Response has a non-successful status.
    #[display("Responded with `{status}`")]
    Status {
        /// [`StatusCode`] of the response.
        status: StatusCode,

        /// Message of the response, if any.
        message: Option<String>,
    },

    /// Response contains a value the domain rejects.
    #[display("Response contains malformed `{_0}`")]
    Malformed(#[error(not(source))] &'static str),
}

impl Error {
    /// Returns the message a request was rejected with as a bad one.
    #[must_use]
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Self::Status {
                status: StatusCode::BAD_REQUEST,
                message,
            } => message.as_deref(),
            Self::Status { .. } | Self::Request(_) | Self::Malformed(_) => None,
        }
    }

    /// Indicates whether a request was refused for lack of authorization.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Status {
                status: StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN,
                ..
            },
        )
    }
}
