//! [`Query`] collection related to a [`User`].

use common::operations::By;

#[cfg(doc)]
use crate::{domain::user::Session, Query};
use crate::domain::{user::session, User};

use super::BackendQuery;

/// Queries the [`User`] of the current [`Session`].
pub type Me = BackendQuery<By<User, session::Current>>;
