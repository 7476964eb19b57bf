//! [`Query`] collection related to a [`Financial`] record.

use common::operations::By;

use crate::domain::{case, Financial};
#[cfg(doc)]
use crate::{domain::Case, Query};

use super::DatabaseQuery;

/// Queries the [`Financial`] record of a [`Case`].
pub type ByCase = DatabaseQuery<By<Option<Financial>, case::Id>>;
