//! [`Redemption`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateTimeOf, Money};

use super::{bank, case};

/// Mortgage-redemption details of a [`Case`], one record per case.
///
/// Tracks the clearing of the seller's outstanding mortgage so the title
/// can be transferred unencumbered.
///
/// [`Case`]: super::Case
#[derive(Clone, Debug)]
pub struct Redemption {
    /// ID of the [`Case`] this [`Redemption`] belongs to.
    ///
    /// [`Case`]: super::Case
    pub case_id: case::Id,

    /// Bank holding the mortgage being redeemed.
    pub bank: Option<bank::Name>,

    /// Outstanding amount to redeem.
    pub amount: Option<Money>,

    /// [`Date`] the redemption was applied for.
    pub applied_on: Option<Date>,

    /// [`Date`] the mortgage annotation was cleared.
    pub cleared_on: Option<Date>,

    /// [`DateTime`] when this [`Redemption`] was last updated.
    pub updated_at: UpdateDateTime,
}

impl Redemption {
    /// Creates an empty [`Redemption`] for the given [`Case`].
    ///
    /// [`Case`]: super::Case
    #[must_use]
    pub fn empty(case_id: case::Id) -> Self {
        Self {
            case_id,
            bank: None,
            amount: None,
            applied_on: None,
            cleared_on: None,
            updated_at: DateTimeOf::now(),
        }
    }
}

/// [`DateTime`] when a [`Redemption`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Redemption, unit::Update)>;
