//! [`Command`] for changing the [`Status`] of an [`Order`].

use common::operations::Update;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{order::Status, Order};
use crate::{
    domain::order,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for changing the [`Status`] of an [`Order`].
#[derive(Clone, Debug)]
pub struct UpdateOrderStatus {
    /// ID of the [`Order`].
    pub id: order::Id,

    /// New [`Status`] of the [`Order`].
    pub status: order::Status,
}

impl<Api> Command<UpdateOrderStatus> for Service<Api>
where
    Api: Backend<
        Update<(order::Id, order::Status)>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        cmd: UpdateOrderStatus,
    ) -> Result<Self::Ok, Self::Err> {
        let UpdateOrderStatus { id, status } = cmd;

        self.backend()
            .execute(Update((id, status)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
