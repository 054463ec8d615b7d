//! [`Command`] for registering a new [`User`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    user::{Email, Name, Password, Role},
    User,
};
use crate::{
    domain::user,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`User`].
#[derive(Clone, Debug)]
pub struct RegisterUser {
    /// First [`Name`] of a new [`User`].
    pub first_name: user::Name,

    /// Last [`Name`] of a new [`User`].
    pub last_name: user::Name,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,

    /// Repeated [`Password`] of a new [`User`].
    pub password_confirmation: SecretBox<user::Password>,

    /// [`Role`] of a new [`User`].
    pub role: user::Role,
}

impl<Api> Command<RegisterUser> for Service<Api>
where
    Api: Backend<Insert<user::Registration>, Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RegisterUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterUser {
            first_name,
            last_name,
            email,
            password,
            password_confirmation,
            role,
        } = cmd;

        if password.expose_secret() != password_confirmation.expose_secret() {
            return Err(tracerr::new!(E::PasswordMismatch));
        }

        self.backend()
            .execute(Insert(user::Registration {
                first_name,
                last_name,
                email,
                password,
                role,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`RegisterUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Password`] and its confirmation differ.
    #[display("Passwords do not match")]
    PasswordMismatch,
}

#[cfg(all(test, feature = "http"))]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        command::Command as _, domain::user::Role, infra::backend::fake::Fake,
        Config, Service,
    };

    use super::{ExecutionError, RegisterUser};

    fn cmd(password: &str, confirmation: &str) -> RegisterUser {
        RegisterUser {
            first_name: "Jane".parse().unwrap(),
            last_name: "Perera".parse().unwrap(),
            email: "jane@spoon.lk".parse().unwrap(),
            password: SecretBox::new(Box::new(password.parse().unwrap())),
            password_confirmation: SecretBox::new(Box::new(
                confirmation.parse().unwrap(),
            )),
            role: Role::Customer,
        }
    }

    #[tokio::test]
    async fn registers() {
        let backend = Fake::default();
        let service = Service::new(Config::default(), backend.clone());

        service.execute(cmd("secret1", "secret1")).await.unwrap();

        assert_eq!(backend.calls(), ["register"]);
    }

    #[tokio::test]
    async fn mismatch_never_reaches_backend() {
        let backend = Fake::default();
        let service = Service::new(Config::default(), backend.clone());

        let err = service
            .execute(cmd("secret1", "secret2"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::PasswordMismatch));
        assert!(backend.calls().is_empty());
    }
}
