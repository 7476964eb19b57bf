//! [`Todo`]-related read definitions.

use common::Date;
use derive_more::{Deref, From, Into};

use crate::domain::{case, todo};
#[cfg(doc)]
use crate::domain::{Case, Todo};

/// Count of pending [`Todo`]s due within a deadline.
#[derive(Clone, Copy, Debug, Deref, Eq, From, Hash, Into, PartialEq)]
pub struct DueCount(pub i32);

/// Deadline harvested from the milestone/financial records of a
/// [`Case`] being processed.
///
/// Deadlines are the source of truth the system reminders are
/// reconciled against.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deadline {
    /// ID of the [`Case`] the deadline belongs to.
    pub case_id: case::Id,

    /// [`case::Number`] of the [`Case`], used in reminder texts.
    pub case_number: case::Number,

    /// Field the deadline was harvested from.
    pub key: todo::SourceKey,

    /// [`Date`] the deadline is due on.
    pub due: Date,
}

pub mod list {
    //! [`Todo`] list definitions.

    use common::{define_pagination, Date};
    use derive_more::{From, Into};

    use crate::domain::{case, todo};
    #[cfg(doc)]
    use crate::domain::Todo;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = todo::Id;

    /// Cursor pointing to a specific [`Todo`] in a list.
    pub type Cursor = todo::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`case::Id`] to filter by.
        pub case_id: Option<case::Id>,

        /// Indicator whether only pending (not completed) [`Todo`]s
        /// should be listed.
        pub pending: bool,

        /// [`Date`] to list only [`Todo`]s due on or before.
        pub due_before: Option<Date>,
    }

    /// Total count of [`Todo`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
