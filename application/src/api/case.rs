//! [`Case`]-related definitions.

use std::future;

use common::{DateTime, Handler as _};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject,
    GraphQLScalar,
};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A conveyancing case.
#[derive(Clone, Debug, From)]
pub struct Case {
    /// ID of this [`Case`].
    id: Id,

    /// Underlying [`domain::Case`].
    case: OnceCell<domain::Case>,
}

impl From<domain::Case> for Case {
    fn from(case: domain::Case) -> Self {
        Self {
            id: case.id.into(),
            case: OnceCell::new_with(Some(case)),
        }
    }
}

impl Case {
    /// Creates a new [`Case`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Case`] with the provided ID exists,
    /// otherwise accessing this [`Case`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            case: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Case`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Case`] doesn't exist.
    async fn case(&self, ctx: &Context) -> Result<&domain::Case, Error> {
        let id = self.id.into();
        self.case
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::case::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|c| {
                        future::ready(c.ok_or_else(|| {
                            api::query::CaseError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A conveyancing case.
#[graphql_object(context = Context)]
impl Case {
    /// Unique identifier of this `Case`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Human-assigned unique number of this `Case`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.number",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn number(&self, ctx: &Context) -> Result<Number, Error> {
        Ok(self.case(ctx).await?.number.clone().into())
    }

    /// Buying party of this `Case`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.buyer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn buyer(&self, ctx: &Context) -> Result<Party, Error> {
        Ok(self.case(ctx).await?.buyer.clone().into())
    }

    /// Selling party of this `Case`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.seller",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn seller(&self, ctx: &Context) -> Result<Party, Error> {
        Ok(self.case(ctx).await?.seller.clone().into())
    }

    /// City the property of this `Case` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.city",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn city(&self, ctx: &Context) -> Result<Option<City>, Error> {
        Ok(self.case(ctx).await?.city.clone().map(Into::into))
    }

    /// Current status of this `Case`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.case(ctx).await?.status.into())
    }

    /// Land-tax ruling applied to this `Case`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.taxKind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn tax_kind(&self, ctx: &Context) -> Result<TaxKind, Error> {
        Ok(self.case(ctx).await?.tax_kind.into())
    }

    /// Reason this `Case` was cancelled, if it was.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.cancellation",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn cancellation(
        &self,
        ctx: &Context,
    ) -> Result<Option<Cancellation>, Error> {
        Ok(self.case(ctx).await?.cancellation.map(Into::into))
    }

    /// Free-form notes of this `Case`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.notes",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn notes(&self, ctx: &Context) -> Result<Option<Notes>, Error> {
        Ok(self.case(ctx).await?.notes.clone().map(Into::into))
    }

    /// Task checklist of this `Case`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.checklist",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn checklist(
        &self,
        ctx: &Context,
    ) -> Result<Vec<ChecklistTask>, Error> {
        Ok(self
            .case(ctx)
            .await?
            .checklist
            .iter()
            .map(|(label, done)| ChecklistTask {
                label: label.to_owned(),
                done,
            })
            .collect())
    }

    /// Identity of the operator who created this `Case`, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.ownerId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn owner_id(
        &self,
        ctx: &Context,
    ) -> Result<Option<OwnerId>, Error> {
        Ok(self.case(ctx).await?.owner.map(Into::into))
    }

    /// Milestone record of this `Case`, if one was written already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.milestone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn milestone(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Milestone>, Error> {
        ctx.service()
            .execute(query::milestone::ByCase::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|m| m.map(Into::into))
    }

    /// Financial record of this `Case`, if one was written already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.financial",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn financial(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Financial>, Error> {
        ctx.service()
            .execute(query::financial::ByCase::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|f| f.map(Into::into))
    }

    /// Mortgage-redemption record of this `Case`, if one was written
    /// already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.redemption",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn redemption(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Redemption>, Error> {
        ctx.service()
            .execute(query::redemption::ByCase::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|r| r.map(Into::into))
    }

    /// `DateTime` when this `Case` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.case(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Case` was last updated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Case.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.case(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of a `Case`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::case::Id)]
#[into(domain::case::Id)]
#[graphql(name = "CaseId", transparent)]
pub struct Id(Uuid);

/// Identity stamp of the operator who created a `Case`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::case::OwnerId)]
#[into(domain::case::OwnerId)]
#[graphql(name = "CaseOwnerId", transparent)]
pub struct OwnerId(Uuid);

/// Human-assigned unique number of a `Case`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CaseNumber",
    with = scalar::Via::<domain::case::Number>,
)]
pub struct Number(domain::case::Number);

/// Name of a `Case` party.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PartyName",
    with = scalar::Via::<domain::case::PartyName>,
)]
pub struct PartyName(domain::case::PartyName);

/// Phone number of a `Case` party or a bank contact.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "Phone",
    with = scalar::Via::<domain::case::Phone>,
)]
pub struct Phone(domain::case::Phone);

/// City a `Case` property is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CaseCity",
    with = scalar::Via::<domain::case::City>,
)]
pub struct City(domain::case::City);

/// Free-form notes of a `Case` or a bank contact.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "Notes",
    with = scalar::Via::<domain::case::Notes>,
)]
pub struct Notes(domain::case::Notes);

/// Party of a `Case` (a buyer or a seller).
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "CaseParty", context = Context)]
pub struct Party {
    /// Name of this party.
    pub name: PartyName,

    /// Phone number of this party.
    pub phone: Option<Phone>,
}

impl From<domain::case::Party> for Party {
    fn from(party: domain::case::Party) -> Self {
        Self {
            name: party.name.into(),
            phone: party.phone.map(Into::into),
        }
    }
}

/// Status of a `Case`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "CaseStatus")]
pub enum Status {
    /// The transaction is in progress.
    Processing,

    /// The transaction completed and the property was handed over.
    Closed,

    /// The transaction was cancelled before completion.
    Cancelled,
}

impl From<domain::case::Status> for Status {
    fn from(status: domain::case::Status) -> Self {
        use domain::case::Status as S;
        match status {
            S::Processing => Self::Processing,
            S::Closed => Self::Closed,
            S::Cancelled => Self::Cancelled,
        }
    }
}

impl From<Status> for domain::case::Status {
    fn from(status: Status) -> Self {
        use Status as S;
        match status {
            S::Processing => Self::Processing,
            S::Closed => Self::Closed,
            S::Cancelled => Self::Cancelled,
        }
    }
}

/// Land-tax ruling applied to a `Case`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "CaseTaxKind")]
pub enum TaxKind {
    /// General land value increment tax rate.
    General,

    /// Self-use dwelling preferential rate.
    SelfUse,
}

impl From<domain::case::TaxKind> for TaxKind {
    fn from(kind: domain::case::TaxKind) -> Self {
        use domain::case::TaxKind as K;
        match kind {
            K::General => Self::General,
            K::SelfUse => Self::SelfUse,
        }
    }
}

impl From<TaxKind> for domain::case::TaxKind {
    fn from(kind: TaxKind) -> Self {
        use TaxKind as K;
        match kind {
            K::General => Self::General,
            K::SelfUse => Self::SelfUse,
        }
    }
}

/// Reason a `Case` was cancelled.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "CaseCancellation")]
pub enum Cancellation {
    /// Both parties agreed to rescind.
    Mutual,

    /// The buyer breached the contract.
    BuyerBreach,

    /// The seller breached the contract.
    SellerBreach,
}

impl From<domain::case::Cancellation> for Cancellation {
    fn from(reason: domain::case::Cancellation) -> Self {
        use domain::case::Cancellation as C;
        match reason {
            C::Mutual => Self::Mutual,
            C::BuyerBreach => Self::BuyerBreach,
            C::SellerBreach => Self::SellerBreach,
        }
    }
}

impl From<Cancellation> for domain::case::Cancellation {
    fn from(reason: Cancellation) -> Self {
        use Cancellation as C;
        match reason {
            C::Mutual => Self::Mutual,
            C::BuyerBreach => Self::BuyerBreach,
            C::SellerBreach => Self::SellerBreach,
        }
    }
}

/// Single task on a `Case` checklist.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "CaseChecklistTask", context = Context)]
pub struct ChecklistTask {
    /// Label of this task.
    pub label: String,

    /// Indicator whether this task is done.
    pub done: bool,
}

/// Single task on a `Case` checklist.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "CaseChecklistTaskInput")]
pub struct ChecklistTaskInput {
    /// Label of this task.
    pub label: String,

    /// Indicator whether this task is done.
    pub done: bool,
}

/// Builds a [`domain::case::Checklist`] from the provided input tasks.
#[must_use]
pub fn checklist(
    tasks: Vec<ChecklistTaskInput>,
) -> domain::case::Checklist {
    let mut checklist = domain::case::Checklist::default();
    for task in tasks {
        checklist.set(task.label, task.done);
    }
    checklist
}

/// Outcome of importing `Case`s from a spreadsheet.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "CaseImportResult", context = Context)]
pub struct ImportResult {
    /// Number of new `Case`s created.
    pub created: i32,

    /// Number of existing `Case`s updated.
    pub updated: i32,
}

pub mod list {
    //! Definitions related to the [`Case`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use super::{Case, Id};
    use crate::{api::scalar, AsError, Context, Error};

    /// Cursor for the `Case` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::case::list::Cursor)]
    #[graphql(
        name = "CaseListCursor",
        with = scalar::Via::<read::case::list::Cursor>,
    )]
    pub struct Cursor(pub read::case::list::Cursor);

    /// Edge in the [`Case`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::case::list::Edge);

    /// Edge in the `Case` list.
    #[graphql_object(name = "CaseListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `CaseListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `CaseListEdge`.
        #[must_use]
        pub fn node(&self) -> Case {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees `Case` \
                          existence"
            )]
            unsafe {
                Case::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Case`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::case::list::Connection);

    /// Connection of the `Case` list.
    #[graphql_object(name = "CaseListConnection", context = Context)]
    impl Connection {
        /// Edges of this `CaseListConnection`.
        #[must_use]
        pub fn edges(&self) -> Vec<Edge> {
            self.0.edges.iter().copied().map(Into::into).collect()
        }

        /// Information about the page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            PageInfo {
                info: self.0.page_info(),
                start_cursor: self.0.edges.first().map(|e| e.cursor.into()),
                end_cursor: self.0.edges.last().map(|e| e.cursor.into()),
            }
        }
    }

    /// Information about a [`Connection`] page.
    #[derive(Clone, Copy, Debug)]
    pub struct PageInfo {
        /// Underlying [`read::case::list::PageInfo`].
        info: read::case::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,
    }

    /// Information about a `CaseListConnection` page.
    #[graphql_object(name = "CaseListPageInfo", context = Context)]
    impl PageInfo {
        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.info.has_next_page
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.info.has_previous_page
        }

        /// Start cursor of the page.
        #[must_use]
        pub fn start_cursor(&self) -> &Option<Cursor> {
            &self.start_cursor
        }

        /// End cursor of the page.
        #[must_use]
        pub fn end_cursor(&self) -> &Option<Cursor> {
            &self.end_cursor
        }

        /// Total `Case` count.
        pub async fn total_count(&self, ctx: &Context) -> Result<i32, Error> {
            ctx.service()
                .execute(query::cases::TotalCount::by(()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}
