//! [`Command`] for removing a [`Food`] from the menu.

use common::operations::{By, Delete};
use tracerr::Traced;

use crate::{
    domain::{menu, Food},
    infra::{backend, Backend},
    Service,
};

use super::{Command, Confirmable, Confirmed};

/// [`Command`] for removing a [`Food`] from the menu.
///
/// Executable only once [`Confirmed`].
#[derive(Clone, Debug)]
pub struct DeleteFood {
    /// ID of the [`Food`] to remove.
    pub id: menu::Id,

    /// [`menu::Name`] of the [`Food`] to remove.
    pub name: menu::Name,
}

impl From<&Food> for DeleteFood {
    fn from(food: &Food) -> Self {
        Self {
            id: food.id.clone(),
            name: food.name.clone(),
        }
    }
}

impl Confirmable for DeleteFood {
    fn prompt(&self) -> String {
        format!("Are you sure you want to delete `{}`?", self.name)
    }
}

impl<Api> Command<Confirmed<DeleteFood>> for Service<Api>
where
    Api: Backend<Delete<By<Food, menu::Id>>, Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        cmd: Confirmed<DeleteFood>,
    ) -> Result<Self::Ok, Self::Err> {
        let DeleteFood { id, .. } = cmd.into_inner();

        self.backend()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
