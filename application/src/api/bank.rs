//! [`BankContact`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// Address-book entry for a loan or escrow bank.
#[derive(Clone, Debug, From, Into)]
pub struct BankContact(domain::BankContact);

/// Address-book entry for a loan or escrow bank.
#[graphql_object(context = Context)]
impl BankContact {
    /// Unique identifier of this `BankContact`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BankContact.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of the bank.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BankContact.bank",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn bank(&self) -> Name {
        self.0.bank.clone().into()
    }

    /// Branch of the bank.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BankContact.branch",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn branch(&self) -> Option<Branch> {
        self.0.branch.clone().map(Into::into)
    }

    /// Contact person at the bank.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BankContact.person",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn person(&self) -> Option<Person> {
        self.0.person.clone().map(Into::into)
    }

    /// Phone number of the contact.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BankContact.phone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn phone(&self) -> Option<api::case::Phone> {
        self.0.phone.clone().map(Into::into)
    }

    /// Free-form notes about the contact.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BankContact.notes",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn notes(&self) -> Option<api::case::Notes> {
        self.0.notes.clone().map(Into::into)
    }

    /// `DateTime` when this `BankContact` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BankContact.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `BankContact`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::bank::Id)]
#[into(domain::bank::Id)]
#[graphql(name = "BankContactId", transparent)]
pub struct Id(Uuid);

/// Name of a bank.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BankName",
    with = scalar::Via::<domain::bank::Name>,
)]
pub struct Name(domain::bank::Name);

/// Branch of a bank.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BankBranch",
    with = scalar::Via::<domain::bank::Branch>,
)]
pub struct Branch(domain::bank::Branch);

/// Contact person at a bank.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BankPerson",
    with = scalar::Via::<domain::bank::Person>,
)]
pub struct Person(domain::bank::Person);
