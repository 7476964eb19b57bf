//! GraphQL [`Query`]s definitions.

use common::Date;
use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Case` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CASE_NOT_EXISTS` - the `Case` with the specified ID does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "case",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn case(
        id: api::case::Id,
        ctx: &Context,
    ) -> Result<api::Case, Error> {
        ctx.service()
            .execute(query::case::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| CaseError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Case` with the specified number.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CASE_NOT_EXISTS` - the `Case` with the specified number does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            number = %number,
            gql.name = "caseByNumber",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn case_by_number(
        number: api::case::Number,
        ctx: &Context,
    ) -> Result<api::Case, Error> {
        ctx.service()
            .execute(query::case::ByNumber::by(number.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| CaseError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of `Case`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            city = ?city.as_ref().map(ToString::to_string),
            first = ?first,
            gql.name = "cases",
            last = ?last,
            search = ?search,
            status = ?status,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn cases(
        first: Option<i32>,
        after: Option<api::case::list::Cursor>,
        last: Option<i32>,
        before: Option<api::case::list::Cursor>,
        status: Option<api::case::Status>,
        city: Option<api::case::City>,
        search: Option<String>,
        ctx: &Context,
    ) -> Result<api::case::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        ctx.service()
            .execute(query::cases::List::by(read::case::list::Selector {
                arguments: read::case::list::Arguments::new(
                    first,
                    after.map(Into::into),
                    last,
                    before.map(Into::into),
                    DEFAULT_PAGE_SIZE,
                )
                .ok_or_else(|| api::PaginationError::Ambiguous.into())
                .map_err(ctx.error())?,
                filter: read::case::list::Filter {
                    status: status.map(Into::into),
                    city: city.map(Into::into),
                    search,
                },
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Milestone` record of the specified `Case`, if one was
    /// written already.
    #[tracing::instrument(
        skip_all,
        fields(
            case_id = %case_id,
            gql.name = "milestone",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn milestone(
        case_id: api::case::Id,
        ctx: &Context,
    ) -> Result<Option<api::Milestone>, Error> {
        ctx.service()
            .execute(query::milestone::ByCase::by(case_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|m| m.map(Into::into))
    }

    /// Returns the `Financial` record of the specified `Case`, if one was
    /// written already.
    #[tracing::instrument(
        skip_all,
        fields(
            case_id = %case_id,
            gql.name = "financial",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn financial(
        case_id: api::case::Id,
        ctx: &Context,
    ) -> Result<Option<api::Financial>, Error> {
        ctx.service()
            .execute(query::financial::ByCase::by(case_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|f| f.map(Into::into))
    }

    /// Returns the `Redemption` record of the specified `Case`, if one was
    /// written already.
    #[tracing::instrument(
        skip_all,
        fields(
            case_id = %case_id,
            gql.name = "redemption",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn redemption(
        case_id: api::case::Id,
        ctx: &Context,
    ) -> Result<Option<api::Redemption>, Error> {
        ctx.service()
            .execute(query::redemption::ByCase::by(case_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|r| r.map(Into::into))
    }

    /// Fetches the page of `Todo`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            case_id = ?case_id.as_ref().map(ToString::to_string),
            due_before = ?due_before.as_ref().map(ToString::to_string),
            first = ?first,
            gql.name = "todos",
            last = ?last,
            pending_only = ?pending_only,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn todos(
        first: Option<i32>,
        after: Option<api::todo::list::Cursor>,
        last: Option<i32>,
        before: Option<api::todo::list::Cursor>,
        case_id: Option<api::case::Id>,
        pending_only: Option<bool>,
        due_before: Option<Date>,
        ctx: &Context,
    ) -> Result<api::todo::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 20;

        ctx.service()
            .execute(query::todos::List::by(read::todo::list::Selector {
                arguments: read::todo::list::Arguments::new(
                    first,
                    after.map(Into::into),
                    last,
                    before.map(Into::into),
                    DEFAULT_PAGE_SIZE,
                )
                .ok_or_else(|| api::PaginationError::Ambiguous.into())
                .map_err(ctx.error())?,
                filter: read::todo::list::Filter {
                    case_id: case_id.map(Into::into),
                    pending: pending_only.unwrap_or(false),
                    due_before,
                },
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns all the `BankContact`s of the address book.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "bankContacts",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn bank_contacts(
        ctx: &Context,
    ) -> Result<Vec<api::BankContact>, Error> {
        ctx.service()
            .execute(query::bank_contacts::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|contacts| contacts.into_iter().map(Into::into).collect())
    }

    /// Returns all the `Snippet`s of the reference library, optionally of
    /// a single kind.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "snippets",
            kind = ?kind,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn snippets(
        kind: Option<api::snippet::Kind>,
        ctx: &Context,
    ) -> Result<Vec<api::Snippet>, Error> {
        ctx.service()
            .execute(query::snippets::All::by(kind.map(Into::into)))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|snippets| snippets.into_iter().map(Into::into).collect())
    }

    /// Encodes the filtered `Case` list as a CSV sheet.
    ///
    /// The produced sheet can be fed back through the `importCases`
    /// mutation, which upserts every row by its number.
    #[tracing::instrument(
        skip_all,
        fields(
            city = ?city.as_ref().map(ToString::to_string),
            gql.name = "exportCases",
            search = ?search,
            status = ?status,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn export_cases(
        status: Option<api::case::Status>,
        city: Option<api::case::City>,
        search: Option<String>,
        ctx: &Context,
    ) -> Result<String, Error> {
        ctx.service()
            .execute(query::export::ExportCases {
                filter: read::case::list::Filter {
                    status: status.map(Into::into),
                    city: city.map(Into::into),
                    search,
                },
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

impl AsError for query::export::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Sheet(_) => None,
        }
    }
}

define_error! {
    enum CaseError {
        #[code = "CASE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Case` with the specified ID or number does not exist"]
        NotExists,
    }
}

define_error! {
    enum TodoError {
        #[code = "TODO_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Todo` with the specified ID does not exist"]
        NotExists,
    }
}
