//! [`Todo`]-related definitions.

use std::future;

use common::{Date, DateTime, Handler as _};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLObject, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// Item on the scheduling dashboard: either a manually entered task or a
/// system reminder derived from a milestone or deadline field.
#[derive(Clone, Debug, From)]
pub struct Todo {
    /// ID of this [`Todo`].
    id: Id,

    /// Underlying [`domain::Todo`].
    todo: OnceCell<domain::Todo>,
}

impl From<domain::Todo> for Todo {
    fn from(todo: domain::Todo) -> Self {
        Self {
            id: todo.id.into(),
            todo: OnceCell::new_with(Some(todo)),
        }
    }
}

impl Todo {
    /// Creates a new [`Todo`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Todo`] with the provided ID exists,
    /// otherwise accessing this [`Todo`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            todo: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Todo`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Todo`] doesn't exist.
    async fn todo(&self, ctx: &Context) -> Result<&domain::Todo, Error> {
        let id = self.id.into();
        self.todo
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::todo::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|t| {
                        future::ready(t.ok_or_else(|| {
                            api::query::TodoError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// Item on the scheduling dashboard.
#[graphql_object(context = Context)]
impl Todo {
    /// Unique identifier of this `Todo`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `Case` this `Todo` belongs to, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.case",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn case(&self, ctx: &Context) -> Result<Option<api::Case>, Error> {
        Ok(self.todo(ctx).await?.case_id.map(|id| {
            #[expect(
                unsafe_code,
                reason = "`case_id` references an existing `Case`"
            )]
            unsafe {
                api::Case::new_unchecked(id)
            }
        }))
    }

    /// Content of this `Todo`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.content",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn content(&self, ctx: &Context) -> Result<Content, Error> {
        Ok(self.todo(ctx).await?.content.clone().into())
    }

    /// `Date` this `Todo` is due on.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.dueDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn due_date(&self, ctx: &Context) -> Result<Option<Date>, Error> {
        Ok(self.todo(ctx).await?.due_date)
    }

    /// Priority of this `Todo`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.priority",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn priority(&self, ctx: &Context) -> Result<Priority, Error> {
        Ok(self.todo(ctx).await?.priority.into())
    }

    /// Origin of this `Todo`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.source",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn source(&self, ctx: &Context) -> Result<SourceKind, Error> {
        Ok(self.todo(ctx).await?.source.kind().into())
    }

    /// Milestone or deadline field this system `Todo` was derived from.
    ///
    /// `null` for manual `Todo`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.sourceKey",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn source_key(
        &self,
        ctx: &Context,
    ) -> Result<Option<String>, Error> {
        Ok(self
            .todo(ctx)
            .await?
            .source
            .key()
            .map(|key| key.to_string()))
    }

    /// Indicator whether this `Todo` is completed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.isCompleted",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn is_completed(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.todo(ctx).await?.is_completed())
    }

    /// `DateTime` when this `Todo` was completed, if it was.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.completedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn completed_at(
        &self,
        ctx: &Context,
    ) -> Result<Option<DateTime>, Error> {
        Ok(self.todo(ctx).await?.completed_at.map(|at| at.coerce()))
    }

    /// `DateTime` when this `Todo` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Todo.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.todo(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Todo`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::todo::Id)]
#[into(domain::todo::Id)]
#[graphql(name = "TodoId", transparent)]
pub struct Id(Uuid);

/// Content of a `Todo`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TodoContent",
    with = scalar::Via::<domain::todo::Content>,
)]
pub struct Content(domain::todo::Content);

/// Priority of a `Todo`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "TodoPriority")]
pub enum Priority {
    /// Can wait.
    Low,

    /// Regular work item.
    Normal,

    /// Due soon or overdue.
    High,
}

impl From<domain::todo::Priority> for Priority {
    fn from(priority: domain::todo::Priority) -> Self {
        use domain::todo::Priority as P;
        match priority {
            P::Low => Self::Low,
            P::Normal => Self::Normal,
            P::High => Self::High,
        }
    }
}

impl From<Priority> for domain::todo::Priority {
    fn from(priority: Priority) -> Self {
        use Priority as P;
        match priority {
            P::Low => Self::Low,
            P::Normal => Self::Normal,
            P::High => Self::High,
        }
    }
}

/// Origin of a `Todo`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "TodoSource")]
pub enum SourceKind {
    /// Entered by an operator.
    Manual,

    /// Derived from a milestone or deadline field by the reminder
    /// synchronizer.
    System,
}

impl From<domain::todo::SourceKind> for SourceKind {
    fn from(kind: domain::todo::SourceKind) -> Self {
        use domain::todo::SourceKind as K;
        match kind {
            K::Manual => Self::Manual,
            K::System => Self::System,
        }
    }
}

/// Outcome of a reminder reconciliation run.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "ReminderSyncResult", context = Context)]
pub struct SyncResult {
    /// Number of reminders inserted.
    pub inserted: i32,

    /// Number of reminders rewritten in place.
    pub updated: i32,

    /// Number of reminders deleted.
    pub deleted: i32,
}

pub mod list {
    //! Definitions related to the [`Todo`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use super::{Id, Todo};
    use crate::{api::scalar, AsError, Context, Error};

    /// Cursor for the `Todo` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::todo::list::Cursor)]
    #[graphql(
        name = "TodoListCursor",
        with = scalar::Via::<read::todo::list::Cursor>,
    )]
    pub struct Cursor(pub read::todo::list::Cursor);

    /// Edge in the [`Todo`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::todo::list::Edge);

    /// Edge in the `Todo` list.
    #[graphql_object(name = "TodoListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `TodoListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `TodoListEdge`.
        #[must_use]
        pub fn node(&self) -> Todo {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees `Todo` \
                          existence"
            )]
            unsafe {
                Todo::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Todo`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::todo::list::Connection);

    /// Connection of the `Todo` list.
    #[graphql_object(name = "TodoListConnection", context = Context)]
    impl Connection {
        /// Edges of this `TodoListConnection`.
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
        /// Underlying [`read::todo::list::PageInfo`].
        info: read::todo::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,
    }

    /// Information about a `TodoListConnection` page.
    #[graphql_object(name = "TodoListPageInfo", context = Context)]
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

        /// Total `Todo` count.
        pub async fn total_count(&self, ctx: &Context) -> Result<i32, Error> {
            ctx.service()
                .execute(query::todos::TotalCount::by(()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}
