//! [`Query`] collection related to [`Order`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{
    domain::{user, Order},
    read,
};

use super::BackendQuery;

/// Queries a page of the order registry.
pub type List =
    BackendQuery<By<read::order::list::Page, read::order::list::Selector>>;

/// Queries all the [`Order`]s placed with the given [`user::Email`].
pub type ByEmail = BackendQuery<By<Vec<Order>, user::Email>>;

/// Queries the PDF [`read::order::Report`] over all the [`Order`]s.
pub type Report = BackendQuery<By<read::order::Report, ()>>;
