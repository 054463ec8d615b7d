//! [`Command`] for editing an existing [`Food`].

use common::{operations::Update, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    menu::{Category, Description, Image, Name},
    Food,
};
use crate::{
    domain::menu,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for editing an existing [`Food`].
///
/// Replaces all the contents of the [`Food`].
#[derive(Clone, Debug)]
pub struct UpdateFood {
    /// ID of the [`Food`] to edit.
    pub id: menu::Id,

    /// New [`Name`] of the [`Food`].
    pub name: menu::Name,

    /// New unit price of the [`Food`].
    pub price: Money,

    /// New [`Description`] of the [`Food`].
    pub description: menu::Description,

    /// New [`Category`] of the [`Food`].
    pub category: menu::Category,

    /// New or kept [`Image`] of the [`Food`].
    pub image: menu::Image,
}

impl<Api> Command<UpdateFood> for Service<Api>
where
    Api: Backend<Update<menu::Edit>, Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateFood) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateFood {
            id,
            name,
            price,
            description,
            category,
            image,
        } = cmd;

        if price == Money::ZERO {
            return Err(tracerr::new!(E::ZeroPrice));
        }

        let draft = menu::Draft {
            name,
            price,
            description,
            category,
            image,
        };
        self.backend()
            .execute(Update(menu::Edit { id, draft }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`UpdateFood`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Food`] is priced at zero.
    #[display("Price must be greater than zero")]
    ZeroPrice,
}
