//! [`Milestone`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLInputObject, GraphQLObject, GraphQLScalar,
};
use service::domain;

use crate::{api, api::scalar, Context};

/// Milestone record of a `Case`: the dated stages the transaction moves
/// through, one record per case.
#[derive(Clone, Debug, From, Into)]
pub struct Milestone(domain::Milestone);

/// Milestone record of a `Case`.
#[graphql_object(context = Context)]
impl Milestone {
    /// ID of the `Case` this `Milestone` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.caseId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn case_id(&self) -> api::case::Id {
        self.0.case_id.into()
    }

    /// `Date` the sale contract was signed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.contractDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn contract_date(&self) -> Option<Date> {
        self.0.contract_date
    }

    /// Sign-difference stage (remainder of the down payment).
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.signDiff",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn sign_diff(&self) -> Stage {
        self.0.sign_diff.clone().into()
    }

    /// Sealing stage.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.seal",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn seal(&self) -> Stage {
        self.0.seal.clone().into()
    }

    /// Tax payment stage.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.taxPayment",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn tax_payment(&self) -> Stage {
        self.0.tax_payment.clone().into()
    }

    /// `Date` the title transfer was registered.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.transferDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn transfer_date(&self) -> Option<Date> {
        self.0.transfer_date
    }

    /// Balance payment stage.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.balance",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn balance(&self) -> Stage {
        self.0.balance.clone().into()
    }

    /// Handover stage.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.handover",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn handover(&self) -> Stage {
        self.0.handover.clone().into()
    }

    /// `Date` the seller's mortgage redemption was cleared.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.redemptionDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn redemption_date(&self) -> Option<Date> {
        self.0.redemption_date
    }

    /// `DateTime` of the appointed sealing meeting.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.sealMeetingAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn seal_meeting_at(&self) -> Option<DateTime> {
        self.0.seal_meeting_at.map(|at| at.coerce())
    }

    /// `DateTime` of the appointed handover meeting.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.handoverMeetingAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn handover_meeting_at(&self) -> Option<DateTime> {
        self.0.handover_meeting_at.map(|at| at.coerce())
    }

    /// `DateTime` when this `Milestone` was last updated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Milestone.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Payment method of a `Milestone` stage (轉帳, 現金, 支票, ...).
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "StageMethod",
    with = scalar::Via::<domain::milestone::Method>,
)]
pub struct Method(domain::milestone::Method);

/// Single payment stage of a `Milestone`: an expected date, an agreed
/// amount and a payment method.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "MilestoneStage", context = Context)]
pub struct Stage {
    /// `Date` this stage is due on.
    pub date: Option<Date>,

    /// Agreed amount of this stage.
    pub amount: Option<Money>,

    /// Payment method of this stage.
    pub method: Option<Method>,
}

impl From<domain::milestone::Stage> for Stage {
    fn from(stage: domain::milestone::Stage) -> Self {
        Self {
            date: stage.date,
            amount: stage.amount,
            method: stage.method.map(Into::into),
        }
    }
}

/// Single payment stage of a `Milestone`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "MilestoneStageInput")]
pub struct StageInput {
    /// `Date` this stage is due on.
    pub date: Option<Date>,

    /// Agreed amount of this stage.
    pub amount: Option<Money>,

    /// Payment method of this stage.
    pub method: Option<Method>,
}

impl From<StageInput> for domain::milestone::Stage {
    fn from(stage: StageInput) -> Self {
        Self {
            date: stage.date,
            amount: stage.amount,
            method: stage.method.map(Into::into),
        }
    }
}
