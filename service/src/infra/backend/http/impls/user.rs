//! [`User`]-related [`Backend`] implementations.

use common::operations::{By, Delete, Insert, Select};
use reqwest::Method;
use secrecy::{ExposeSecret as _, SecretBox};
use serde::{Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        user::{self, session, Role, Session},
        User,
    },
    infra::{
        backend::{self, http::Envelope},
        Backend, Http,
    },
};

use super::{malformed, parse, Field};

/// [`User`] as the backend represents it.
#[derive(Debug, Deserialize)]
struct RawUser {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "firstname")]
    first_name: String,
    #[serde(rename = "lastname")]
    last_name: String,
    email: String,
    role: String,
}

impl TryFrom<RawUser> for User {
    type Error = Field;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user::Id::new(raw.id).ok_or("_id")?,
            first_name: parse("firstname", &raw.first_name)?,
            last_name: parse("lastname", &raw.last_name)?,
            email: parse("email", &raw.email)?,
            role: parse("role", &raw.role)?,
        })
    }
}

/// [`session::Credentials`] as the backend accepts them.
#[derive(Serialize)]
struct Login<'a> {
    email: String,
    password: &'a str,
}

/// Successful response to a [`Login`].
#[derive(Deserialize)]
struct Granted {
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// [`user::Registration`] as the backend accepts it.
#[derive(Serialize)]
struct SignUp<'a> {
    #[serde(rename = "firstname")]
    first_name: String,
    #[serde(rename = "lastname")]
    last_name: String,
    email: String,
    password: &'a str,
    role: Role,
}

impl Backend<Insert<session::Credentials>> for Http {
    type Ok = Session;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(creds): Insert<session::Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.request(Method::POST, "/login").json(&Login {
            email: creds.email.to_string(),
            password: creds.password.expose_secret().as_ref(),
        });
        let Envelope { data } = self
            .fetch::<Envelope<Granted>>(req)
            .await
            .map_err(tracerr::wrap!())?;

        let token = session::Token::new(data.access_token)
            .ok_or_else(|| malformed("accessToken"))?;
        Ok(Session {
            token: SecretBox::new(Box::new(token)),
        })
    }
}

impl Backend<Insert<Session>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(session): Insert<Session>,
    ) -> Result<Self::Ok, Self::Err> {
        self.authorize(Some(session.token));
        log::debug!("requests are authorized now");
        Ok(())
    }
}

impl Backend<Delete<By<Session, session::Current>>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Delete<By<Session, session::Current>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.authorize(None);
        log::debug!("requests are anonymous now");
        Ok(())
    }
}

impl Backend<Insert<user::Registration>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(reg): Insert<user::Registration>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.request(Method::POST, "/register").json(&SignUp {
            first_name: reg.first_name.to_string(),
            last_name: reg.last_name.to_string(),
            email: reg.email.to_string(),
            password: reg.password.expose_secret().as_ref(),
            role: reg.role,
        });
        self.perform(req).await.map_err(tracerr::wrap!())
    }
}

impl Backend<Select<By<User, session::Current>>> for Http {
    type Ok = User;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<User, session::Current>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.request(Method::GET, "/me");
        let Envelope { data } = self
            .fetch::<Envelope<RawUser>>(req)
            .await
            .map_err(tracerr::wrap!())?;

        User::try_from(data).map_err(malformed)
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Delete, Insert};
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::{
        domain::{
            user::{session, Role, Session},
            User,
        },
        infra::{
            backend::http::{Config, Http},
            Backend as _,
        },
    };

    use super::RawUser;

    #[test]
    fn decodes_user() {
        let raw = serde_json::from_value::<RawUser>(json!({
            "_id": "u1",
            "firstname": "Jane",
            "lastname": "Perera",
            "email": "jane@spoon.lk",
            "role": "admin",
        }))
        .unwrap();

        let user = User::try_from(raw).unwrap();

        assert_eq!(user.role, Role::Admin);
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn session_authorizes_requests() {
        let http = Http::new(&Config {
            base_url: "http://localhost:5000/api/v1/".into(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert!(!http.is_authorized());

        let token = session::Token::new("t0k3n").unwrap();
        http.execute(Insert(Session {
            token: SecretBox::new(Box::new(token)),
        }))
        .await
        .unwrap();
        assert!(http.clone().is_authorized());

        http.execute(Delete(By::<Session, _>::new(session::Current)))
            .await
            .unwrap();
        assert!(!http.is_authorized());
    }
}
