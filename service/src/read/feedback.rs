//! [`Feedback`] read model definition.
//!
//! [`Feedback`]: crate::domain::Feedback

pub mod list {
    //! [`Feedback`] list definitions.

    use common::define_pagination;

    use crate::domain::Feedback;

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = Feedback;

    /// Filter for [`Selector`].
    pub type Filter = ();
}
