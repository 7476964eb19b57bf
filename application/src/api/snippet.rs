//! [`Snippet`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// Reference-library entry: a reusable contract clause or an internal
/// process guideline.
#[derive(Clone, Debug, From, Into)]
pub struct Snippet(domain::Snippet);

/// Reference-library entry.
#[graphql_object(context = Context)]
impl Snippet {
    /// Unique identifier of this `Snippet`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Snippet.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Kind of this `Snippet`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Snippet.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Title of this `Snippet`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Snippet.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Body text of this `Snippet`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Snippet.body",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn body(&self) -> Body {
        self.0.body.clone().into()
    }

    /// `DateTime` when this `Snippet` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Snippet.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Snippet`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::snippet::Id)]
#[into(domain::snippet::Id)]
#[graphql(name = "SnippetId", transparent)]
pub struct Id(Uuid);

/// Kind of a `Snippet`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "SnippetKind")]
pub enum Kind {
    /// A reusable contract clause.
    Clause,

    /// An internal process guideline.
    Guideline,
}

impl From<domain::snippet::Kind> for Kind {
    fn from(kind: domain::snippet::Kind) -> Self {
        use domain::snippet::Kind as K;
        match kind {
            K::Clause => Self::Clause,
            K::Guideline => Self::Guideline,
        }
    }
}

impl From<Kind> for domain::snippet::Kind {
    fn from(kind: Kind) -> Self {
        use Kind as K;
        match kind {
            K::Clause => Self::Clause,
            K::Guideline => Self::Guideline,
        }
    }
}

/// Title of a `Snippet`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "SnippetTitle",
    with = scalar::Via::<domain::snippet::Title>,
)]
pub struct Title(domain::snippet::Title);

/// Body text of a `Snippet`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "SnippetBody",
    with = scalar::Via::<domain::snippet::Body>,
)]
pub struct Body(domain::snippet::Body);
