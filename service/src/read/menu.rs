//! [`Food`] read model definition.
//!
//! [`Food`]: crate::domain::Food

pub mod list {
    //! [`Food`] list definitions.

    use common::define_pagination;

    use crate::domain::{define_text, menu, Food};

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = Food;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub enum Filter {
        /// Whole menu.
        #[default]
        All,

        /// [`Food`] of the given [`menu::Category`] only.
        Category(menu::Category),

        /// [`Food`] matching the given [`SearchQuery`].
        Search(SearchQuery),
    }

    impl Filter {
        /// Creates a new [`Filter`] out of the optional criteria.
        ///
        /// A [`SearchQuery`] takes precedence over a [`menu::Category`].
        #[must_use]
        pub fn new(
            category: Option<menu::Category>,
            search: Option<SearchQuery>,
        ) -> Self {
            match (category, search) {
                (_, Some(query)) => Self::Search(query),
                (Some(category), None) => Self::Category(category),
                (None, None) => Self::All,
            }
        }
    }

    define_text! {
        /// Free-text query to search [`Food`] for.
        pub struct SearchQuery(max = 256);
    }

}
