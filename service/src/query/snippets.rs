//! [`Query`] collection related to [`Snippet`]s.

use common::operations::By;

use crate::domain::{snippet, Snippet};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Snippet`] by its [`snippet::Id`].
pub type ById = DatabaseQuery<By<Option<Snippet>, snippet::Id>>;

/// Queries all the live [`Snippet`]s, optionally of a single
/// [`snippet::Kind`].
pub type All = DatabaseQuery<By<Vec<Snippet>, Option<snippet::Kind>>>;
