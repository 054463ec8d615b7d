//! [`Command`] for adding a new [`Food`] to the menu.

use common::{operations::Insert, Money};
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

/// [`Command`] for adding a new [`Food`] to the menu.
#[derive(Clone, Debug)]
pub struct CreateFood {
    /// [`Name`] of a new [`Food`].
    pub name: menu::Name,

    /// Unit price of a new [`Food`].
    pub price: Money,

    /// [`Description`] of a new [`Food`].
    pub description: menu::Description,

    /// [`Category`] of a new [`Food`].
    pub category: menu::Category,

    /// [`Image`] of a new [`Food`].
    pub image: menu::Image,
}

impl<Api> Command<CreateFood> for Service<Api>
where
    Api: Backend<Insert<menu::Draft>, Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateFood) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateFood {
            name,
            price,
            description,
            category,
            image,
        } = cmd;

        if price == Money::ZERO {
            return Err(tracerr::new!(E::ZeroPrice));
        }

        self.backend()
            .execute(Insert(menu::Draft {
                name,
                price,
                description,
                category,
                image,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`CreateFood`] [`Command`] execution.
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
