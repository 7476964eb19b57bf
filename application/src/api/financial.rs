//! [`Financial`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{From, Into};
use juniper::{graphql_object, GraphQLEnum};
use service::domain;

use crate::{api, Context};

/// Financial record of a `Case`: the agreed price, the banks involved
/// and the tax deadlines, one record per case.
#[derive(Clone, Debug, From, Into)]
pub struct Financial(domain::Financial);

/// Financial record of a `Case`.
#[graphql_object(context = Context)]
impl Financial {
    /// ID of the `Case` this `Financial` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Financial.caseId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn case_id(&self) -> api::case::Id {
        self.0.case_id.into()
    }

    /// Total transaction price.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Financial.totalPrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn total_price(&self) -> Option<Money> {
        self.0.total_price
    }

    /// Mortgage bank of the buyer.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Financial.buyerBank",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn buyer_bank(&self) -> Option<api::bank::Name> {
        self.0.buyer_bank.clone().map(Into::into)
    }

    /// Redeeming bank of the seller.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Financial.sellerBank",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn seller_bank(&self) -> Option<api::bank::Name> {
        self.0.seller_bank.clone().map(Into::into)
    }

    /// Business-tax treatment of the transaction.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Financial.vat",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn vat(&self) -> Option<VatKind> {
        self.0.vat.map(Into::into)
    }

    /// `Date` the land value increment tax is due by.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Financial.landTaxDue",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn land_tax_due(&self) -> Option<Date> {
        self.0.land_tax_due
    }

    /// `Date` the deed tax is due by.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Financial.deedTaxDue",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn deed_tax_due(&self) -> Option<Date> {
        self.0.deed_tax_due
    }

    /// `DateTime` when this `Financial` was last updated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Financial.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Business-tax treatment of a transaction.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum VatKind {
    /// Standard business tax applies.
    Standard,

    /// Self-use dwelling, preferential treatment.
    SelfUse,

    /// Exempt transaction between private individuals.
    Exempt,
}

impl From<domain::financial::VatKind> for VatKind {
    fn from(kind: domain::financial::VatKind) -> Self {
        use domain::financial::VatKind as K;
        match kind {
            K::Standard => Self::Standard,
            K::SelfUse => Self::SelfUse,
            K::Exempt => Self::Exempt,
        }
    }
}

impl From<VatKind> for domain::financial::VatKind {
    fn from(kind: VatKind) -> Self {
        use VatKind as K;
        match kind {
            K::Standard => Self::Standard,
            K::SelfUse => Self::SelfUse,
            K::Exempt => Self::Exempt,
        }
    }
}
