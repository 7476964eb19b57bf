//! [`Query`] collection related to the multiple [`Todo`]s.

use common::{operations::By, Date};

use crate::read;
#[cfg(doc)]
use crate::{domain::Todo, Query};

use super::DatabaseQuery;

/// Queries a list of [`Todo`]s.
pub type List =
    DatabaseQuery<By<read::todo::list::Page, read::todo::list::Selector>>;

/// Queries total count of [`Todo`] list items.
pub type TotalCount = DatabaseQuery<By<read::todo::list::TotalCount, ()>>;

/// Queries the count of pending [`Todo`]s due on or before a [`Date`].
pub type DueCount = DatabaseQuery<By<read::todo::DueCount, Date>>;
