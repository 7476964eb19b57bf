//! [`Query`] collection related to the multiple [`Case`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Case, Query};

use super::DatabaseQuery;

/// Queries a list of [`Case`]s.
pub type List =
    DatabaseQuery<By<read::case::list::Page, read::case::list::Selector>>;

/// Queries total count of [`Case`] list items.
pub type TotalCount = DatabaseQuery<By<read::case::list::TotalCount, ()>>;
