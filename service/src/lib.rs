//! Service contains the business logic of the ordering client.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod cart;
pub mod command;
pub mod domain;
pub mod infra;
pub mod list;
pub mod query;
pub mod read;

use common::pagination::Limit;

#[cfg(doc)]
use infra::Backend;

pub use self::{command::Command, list::List, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`PageSizes`] of the paginated lists.
    pub page_sizes: PageSizes,
}

/// Fixed page sizes of the paginated [`List`]s.
#[derive(Clone, Copy, Debug)]
pub struct PageSizes {
    /// Page size of the customer-facing menu grid.
    pub menu: Limit,

    /// Page size of the admin food grid.
    pub foods: Limit,

    /// Page size of the order registry.
    pub orders: Limit,

    /// Page size of the feedback wall.
    pub feedback: Limit,
}

impl PageSizes {
    /// [`PageSizes`] the restaurant views are designed for.
    pub const DEFAULT: Self = Self {
        menu: Limit::new(12).expect("non-zero"),
        foods: Limit::new(4).expect("non-zero"),
        orders: Limit::new(3).expect("non-zero"),
        feedback: Limit::new(6).expect("non-zero"),
    };
}

impl Default for PageSizes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Api> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Backend`] of this [`Service`].
    backend: Api,
}

impl<Api> Service<Api> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub const fn new(config: Config, backend: Api) -> Self {
        Self { config, backend }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Backend`] of this [`Service`].
    #[must_use]
    pub const fn backend(&self) -> &Api {
        &self.backend
    }
}
