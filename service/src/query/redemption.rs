//! [`Query`] collection related to a [`Redemption`] record.

use common::operations::By;

use crate::domain::{case, Redemption};
#[cfg(doc)]
use crate::{domain::Case, Query};

use super::DatabaseQuery;

/// Queries the [`Redemption`] record of a [`Case`].
pub type ByCase = DatabaseQuery<By<Option<Redemption>, case::Id>>;
