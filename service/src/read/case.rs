//! [`Case`]-related read definitions.

#[cfg(doc)]
use crate::domain::Case;

pub mod list {
    //! [`Case`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::case;
    #[cfg(doc)]
    use crate::domain::Case;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = case::Id;

    /// Cursor pointing to a specific [`Case`] in a list.
    pub type Cursor = case::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`case::Status`] to filter by.
        pub status: Option<case::Status>,

        /// [`case::City`] to filter by.
        pub city: Option<case::City>,

        /// Text to fuzzy search for in the case number and party names.
        pub search: Option<String>,
    }

    /// Total count of [`Case`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
