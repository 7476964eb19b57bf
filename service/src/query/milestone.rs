//! [`Query`] collection related to a [`Milestone`].

use common::operations::By;

use crate::domain::{case, Milestone};
#[cfg(doc)]
use crate::{domain::Case, Query};

use super::DatabaseQuery;

/// Queries the [`Milestone`] record of a [`Case`].
pub type ByCase = DatabaseQuery<By<Option<Milestone>, case::Id>>;
