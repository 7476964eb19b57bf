//! [`Financial`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money};

use super::{bank, case};

/// Financial details of a [`Case`], one record per case.
///
/// [`Case`]: super::Case
#[derive(Clone, Debug)]
pub struct Financial {
    /// ID of the [`Case`] this [`Financial`] belongs to.
    ///
    /// [`Case`]: super::Case
    pub case_id: case::Id,

    /// Total transaction price.
    pub total_price: Option<Money>,

    /// Mortgage bank of the buyer.
    pub buyer_bank: Option<bank::Name>,

    /// Redeeming bank of the seller.
    pub seller_bank: Option<bank::Name>,

    /// [`VatKind`] of this transaction.
    pub vat: Option<VatKind>,

    /// [`Date`] the land value increment tax is due by.
    pub land_tax_due: Option<Date>,

    /// [`Date`] the deed tax is due by.
    pub deed_tax_due: Option<Date>,

    /// [`DateTime`] when this [`Financial`] was last updated.
    pub updated_at: UpdateDateTime,
}

impl Financial {
    /// Creates an empty [`Financial`] for the given [`Case`].
    ///
    /// [`Case`]: super::Case
    #[must_use]
    pub fn empty(case_id: case::Id) -> Self {
        Self {
            case_id,
            total_price: None,
            buyer_bank: None,
            seller_bank: None,
            vat: None,
            land_tax_due: None,
            deed_tax_due: None,
            updated_at: DateTimeOf::now(),
        }
    }
}

define_kind! {
    #[doc = "Business-tax treatment of a transaction."]
    enum VatKind {
        #[doc = "Standard business tax applies."]
        Standard = 1,

        #[doc = "Self-use dwelling, preferential treatment."]
        SelfUse = 2,

        #[doc = "Exempt transaction between private individuals."]
        Exempt = 3,
    }
}

/// [`DateTime`] when a [`Financial`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Financial, unit::Update)>;
