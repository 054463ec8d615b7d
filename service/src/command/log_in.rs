//! [`Command`] for logging a [`User`] in.

use common::operations::{By, Delete, Insert, Select};
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::{Email, Password};
use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for logging a [`User`] in.
///
/// Authorizes all the subsequent [`Backend`] operations with the obtained
/// [`Session`]. The [`Session`] is dropped again if the [`User`] can't be
/// fetched with it.
#[derive(Clone, Debug)]
pub struct LogIn {
    /// [`Email`] of the [`User`].
    pub email: user::Email,

    /// [`Password`] of the [`User`].
    pub password: SecretBox<user::Password>,
}

impl<Api> Command<LogIn> for Service<Api>
where
    Api: Backend<
            Insert<session::Credentials>,
            Ok = Session,
            Err = Traced<backend::Error>,
        > + Backend<Insert<Session>, Err = Traced<backend::Error>>
        + Backend<
            Select<By<User, session::Current>>,
            Ok = User,
            Err = Traced<backend::Error>,
        > + Backend<
            Delete<By<Session, session::Current>>,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: LogIn) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let LogIn { email, password } = cmd;

        let session = match self
            .backend()
            .execute(Insert(session::Credentials { email, password }))
            .await
        {
            Ok(session) => session,
            Err(e)
                if e.as_ref().is_unauthorized()
                    || e.as_ref().rejection().is_some() =>
            {
                return Err(tracerr::new!(E::WrongCredentials));
            }
            Err(e) => {
                return Err(e).map_err(tracerr::map_from_and_wrap!(=> E));
            }
        };

        self.backend()
            .execute(Insert(session))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let fetched = self
            .backend()
            .execute(Select(By::new(session::Current)))
            .await;
        if fetched.is_err() {
            if let Err(e) = self
                .backend()
                .execute(Delete(By::new(session::Current)))
                .await
            {
                log::warn!("failed to drop unused session: {e}");
            }
        }
        fetched.map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`LogIn`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`LogIn`] contains wrong credentials.
    #[display("Invalid email or password")]
    WrongCredentials,
}

#[cfg(all(test, feature = "http"))]
mod spec {
    use ::http::StatusCode;
    use secrecy::SecretBox;

    use crate::{
        command::Command as _,
        domain::user::Role,
        infra::backend::fake::Fake,
        Config, Service,
    };

    use super::{ExecutionError, LogIn};

    fn cmd() -> LogIn {
        LogIn {
            email: "jane@spoon.lk".parse().unwrap(),
            password: SecretBox::new(Box::new("secret".parse().unwrap())),
        }
    }

    #[tokio::test]
    async fn authorizes_and_fetches_user() {
        let backend = Fake::default();
        let service = Service::new(Config::default(), backend.clone());

        let user = service.execute(cmd()).await.unwrap();

        assert_eq!(user.role, Role::Admin);
        assert_eq!(backend.calls(), ["login", "authorize", "me"]);
    }

    #[tokio::test]
    async fn rejected_login_means_wrong_credentials() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED] {
            let backend = Fake::rejecting(status, "Invalid credentials");
            let service = Service::new(Config::default(), backend.clone());

            let err = service.execute(cmd()).await.unwrap_err();

            assert!(matches!(err.as_ref(), ExecutionError::WrongCredentials));
            assert_eq!(backend.calls(), ["login"]);
        }
    }

    #[tokio::test]
    async fn server_failure_is_backend_error() {
        let backend =
            Fake::rejecting(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        let service = Service::new(Config::default(), backend);

        let err = service.execute(cmd()).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Backend(_)));
    }

    #[tokio::test]
    async fn drops_session_when_user_is_unavailable() {
        let backend = Fake::rejecting_nth(
            "me",
            1,
            StatusCode::INTERNAL_SERVER_ERROR,
            "oops",
        );
        let service = Service::new(Config::default(), backend.clone());

        let err = service.execute(cmd()).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Backend(_)));
        assert_eq!(
            backend.calls(),
            ["login", "authorize", "me", "deauthorize"],
        );
    }
}
