//! [`BankContact`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::case;

/// Address-book entry for a loan or escrow bank contact.
#[derive(Clone, Debug)]
pub struct BankContact {
    /// ID of this [`BankContact`].
    pub id: Id,

    /// [`Name`] of the bank.
    pub bank: Name,

    /// [`Branch`] of the bank.
    pub branch: Option<Branch>,

    /// Name of the contact [`Person`] at the bank.
    pub person: Option<Person>,

    /// [`case::Phone`] of the contact.
    pub phone: Option<case::Phone>,

    /// Free-form [`case::Notes`] about this contact.
    pub notes: Option<case::Notes>,

    /// [`DateTime`] when this [`BankContact`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`BankContact`] was deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

/// ID of a [`BankContact`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a bank.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Branch of a bank.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Branch(String);

impl Branch {
    /// Creates a new [`Branch`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `branch` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(branch: impl Into<String>) -> Self {
        Self(branch.into())
    }

    /// Creates a new [`Branch`] if the given `branch` is valid.
    #[must_use]
    pub fn new(branch: impl Into<String>) -> Option<Self> {
        let branch = branch.into();
        Self::check(&branch).then_some(Self(branch))
    }

    /// Checks whether the given `branch` is a valid [`Branch`].
    fn check(branch: impl AsRef<str>) -> bool {
        let branch = branch.as_ref();
        branch.trim() == branch && !branch.is_empty() && branch.len() <= 128
    }
}

impl FromStr for Branch {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Branch`")
    }
}

/// Contact person at a bank.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Person(String);

impl Person {
    /// Creates a new [`Person`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `person` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(person: impl Into<String>) -> Self {
        Self(person.into())
    }

    /// Creates a new [`Person`] if the given `person` is valid.
    #[must_use]
    pub fn new(person: impl Into<String>) -> Option<Self> {
        let person = person.into();
        Self::check(&person).then_some(Self(person))
    }

    /// Checks whether the given `person` is a valid [`Person`].
    fn check(person: impl AsRef<str>) -> bool {
        let person = person.as_ref();
        person.trim() == person && !person.is_empty() && person.len() <= 128
    }
}

impl FromStr for Person {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Person`")
    }
}

/// [`DateTime`] when a [`BankContact`] was created.
pub type CreationDateTime = DateTimeOf<(BankContact, unit::Creation)>;

/// [`DateTime`] when a [`BankContact`] was deleted.
pub type DeletionDateTime = DateTimeOf<(BankContact, unit::Deletion)>;
