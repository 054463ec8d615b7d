//! [`Query`] collection related to the menu [`Food`].

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Food, Query};

use super::BackendQuery;

/// Queries a page of the menu, optionally narrowed by a category or a
/// search query.
pub type List =
    BackendQuery<By<read::menu::list::Page, read::menu::list::Selector>>;
