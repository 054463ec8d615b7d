//! [`Query`] collection related to [`Feedback`].

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Feedback, Query};

use super::BackendQuery;

/// Queries a page of the [`Feedback`] wall.
pub type List = BackendQuery<
    By<read::feedback::list::Page, read::feedback::list::Selector>,
>;
