//! [`Query`] collection related to [`BankContact`]s.

use common::operations::By;

use crate::domain::{bank, BankContact};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`BankContact`] by its [`bank::Id`].
pub type ById = DatabaseQuery<By<Option<BankContact>, bank::Id>>;

/// Queries all the live [`BankContact`]s.
pub type All = DatabaseQuery<By<Vec<BankContact>, ()>>;
