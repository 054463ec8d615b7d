//! [`Command`] for logging the current [`User`] out.

use common::operations::{By, Delete};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user::{session, Session},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for logging the current [`User`] out.
///
/// Forgets the current [`Session`], so the subsequent [`Backend`] operations
/// are anonymous.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogOut;

impl<Api> Command<LogOut> for Service<Api>
where
    Api: Backend<
        Delete<By<Session, session::Current>>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(&self, _: LogOut) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Delete(By::new(session::Current)))
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

    use super::LogOut;

    #[tokio::test]
    async fn forgets_session() {
        let backend = Fake::default();
        let service = Service::new(Config::default(), backend.clone());

        service.execute(LogOut).await.unwrap();

        assert_eq!(backend.calls(), ["deauthorize"]);
    }
}
