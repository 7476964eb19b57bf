//! [`Redemption`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{From, Into};
use juniper::graphql_object;
use service::domain;

use crate::{api, Context};

/// Mortgage-redemption record of a `Case`: the clearing of the seller's
/// outstanding mortgage, one record per case.
#[derive(Clone, Debug, From, Into)]
pub struct Redemption(domain::Redemption);

/// Mortgage-redemption record of a `Case`.
#[graphql_object(context = Context)]
impl Redemption {
    /// ID of the `Case` this `Redemption` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Redemption.caseId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn case_id(&self) -> api::case::Id {
        self.0.case_id.into()
    }

    /// Bank holding the mortgage being redeemed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Redemption.bank",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn bank(&self) -> Option<api::bank::Name> {
        self.0.bank.clone().map(Into::into)
    }

    /// Outstanding amount to redeem.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Redemption.amount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn amount(&self) -> Option<Money> {
        self.0.amount
    }

    /// `Date` the redemption was applied for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Redemption.appliedOn",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn applied_on(&self) -> Option<Date> {
        self.0.applied_on
    }

    /// `Date` the mortgage annotation was cleared.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Redemption.clearedOn",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn cleared_on(&self) -> Option<Date> {
        self.0.cleared_on
    }

    /// `DateTime` when this `Redemption` was last updated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Redemption.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}
