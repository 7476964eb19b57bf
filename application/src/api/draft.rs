//! [`Draft`]-related definitions.

use common::Money;
use juniper::GraphQLObject;
use service::extract;

use crate::{api, Context};

/// Best-effort partial case record extracted from contract document text.
///
/// Every field is optional: a section the extraction heuristics could not
/// find simply stays `null`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "CaseDraft", context = Context)]
pub struct Draft {
    /// Case number found in the document.
    pub number: Option<api::case::Number>,

    /// Buying party fields found in the document.
    pub buyer: Party,

    /// Selling party fields found in the document.
    pub seller: Party,

    /// Total transaction price found in the document.
    pub total_price: Option<Money>,

    /// Contract signing stage found in the document.
    pub contract: api::milestone::Stage,

    /// Sealing stage found in the document.
    pub seal: api::milestone::Stage,

    /// Tax payment stage found in the document.
    pub tax_payment: api::milestone::Stage,

    /// Balance payment stage found in the document.
    pub balance: api::milestone::Stage,
}

impl From<extract::Draft> for Draft {
    fn from(draft: extract::Draft) -> Self {
        Self {
            number: draft.number.map(Into::into),
            buyer: draft.buyer.into(),
            seller: draft.seller.into(),
            total_price: draft.total_price,
            contract: draft.contract.into(),
            seal: draft.seal.into(),
            tax_payment: draft.tax_payment.into(),
            balance: draft.balance.into(),
        }
    }
}

/// Party fields extracted from one side of the document.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "CaseDraftParty", context = Context)]
pub struct Party {
    /// Name of the party found in the document.
    pub name: Option<api::case::PartyName>,

    /// Phone of the party found in the document.
    pub phone: Option<api::case::Phone>,
}

impl From<extract::PartyDraft> for Party {
    fn from(party: extract::PartyDraft) -> Self {
        Self {
            name: party.name.map(Into::into),
            phone: party.phone.map(Into::into),
        }
    }
}
