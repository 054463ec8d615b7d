//! [`Order`] read model definition.
//!
//! [`Order`]: crate::domain::Order

use derive_more::{AsRef, Debug, From, Into};

/// PDF report over all the [`Order`]s.
///
/// [`Order`]: crate::domain::Order
#[derive(AsRef, Clone, Debug, From, Into)]
#[as_ref(forward)]
#[debug("Report({} bytes)", _0.len())]
pub struct Report(Vec<u8>);

pub mod list {
    //! [`Order`] list definitions.

    use common::define_pagination;

    use crate::domain::Order;

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = Order;

    /// Filter for [`Selector`].
    ///
    /// The order registry isn't narrowed by anything.
    pub type Filter = ();
}
