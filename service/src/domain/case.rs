//! [`Case`] definitions.

use std::{collections::BTreeMap, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conveyancing case tracking one property transaction from signing to
/// handover.
#[derive(Clone, Debug)]
pub struct Case {
    /// ID of this [`Case`].
    pub id: Id,

    /// Unique human-assigned [`Number`] of this [`Case`].
    pub number: Number,

    /// Buying [`Party`] of this [`Case`].
    pub buyer: Party,

    /// Selling [`Party`] of this [`Case`].
    pub seller: Party,

    /// [`City`] the property of this [`Case`] is located in.
    pub city: Option<City>,

    /// Current [`Status`] of this [`Case`].
    pub status: Status,

    /// [`TaxKind`] ruling the tax deadlines of this [`Case`].
    pub tax_kind: TaxKind,

    /// Reason this [`Case`] was cancelled, if it was.
    pub cancellation: Option<Cancellation>,

    /// Free-form [`Notes`] of this [`Case`].
    pub notes: Option<Notes>,

    /// Task [`Checklist`] of this [`Case`].
    pub checklist: Checklist,

    /// Identity of the operator who created this [`Case`], if known.
    pub owner: Option<OwnerId>,

    /// [`DateTime`] when this [`Case`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Case`] was last updated.
    pub updated_at: UpdateDateTime,
}

/// Party of a [`Case`] (a buyer or a seller).
#[derive(Clone, Debug)]
pub struct Party {
    /// [`PartyName`] of this [`Party`].
    pub name: PartyName,

    /// [`Phone`] of this [`Party`].
    pub phone: Option<Phone>,
}

/// ID of a [`Case`].
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

/// Human-assigned case number of a [`Case`].
///
/// Unique across all [`Case`]s; spreadsheet import upserts by it.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`Number`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Number`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.trim() == number && !number.is_empty() && number.len() <= 64
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Number`")
    }
}

/// Name of a [`Party`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct PartyName(String);

impl PartyName {
    /// Creates a new [`PartyName`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`PartyName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`PartyName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for PartyName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PartyName`")
    }
}

/// Phone number of a [`Party`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format: an optional
        /// country prefix followed by 7..15 digits with optional
        /// separators.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?\d[\d\-\s()#]{5,18}\d$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// City the property of a [`Case`] is located in.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct City(String);

impl City {
    /// Creates a new [`City`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `city` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(city: impl Into<String>) -> Self {
        Self(city.into())
    }

    /// Creates a new [`City`] if the given `city` is valid.
    #[must_use]
    pub fn new(city: impl Into<String>) -> Option<Self> {
        let city = city.into();
        Self::check(&city).then_some(Self(city))
    }

    /// Checks whether the given `city` is a valid [`City`].
    fn check(city: impl AsRef<str>) -> bool {
        let city = city.as_ref();
        city.trim() == city && !city.is_empty() && city.len() <= 64
    }
}

impl FromStr for City {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `City`")
    }
}

/// Free-form notes of a [`Case`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Notes(String);

impl Notes {
    /// Creates a new [`Notes`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `notes` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(notes: impl Into<String>) -> Self {
        Self(notes.into())
    }

    /// Creates a new [`Notes`] if the given `notes` is valid.
    #[must_use]
    pub fn new(notes: impl Into<String>) -> Option<Self> {
        let notes = notes.into();
        Self::check(&notes).then_some(Self(notes))
    }

    /// Checks whether the given `notes` is a valid [`Notes`].
    fn check(notes: impl AsRef<str>) -> bool {
        let notes = notes.as_ref();
        !notes.is_empty() && notes.len() <= 4096
    }
}

impl FromStr for Notes {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Notes`")
    }
}

/// Per-[`Case`] task checklist mapping a task label to its done flag.
#[derive(
    Clone, Debug, Default, Deserialize, Eq, From, Into, PartialEq, Serialize,
)]
#[serde(transparent)]
pub struct Checklist(BTreeMap<String, bool>);

impl Checklist {
    /// Indicates whether this [`Checklist`] has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the tasks of this [`Checklist`].
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(label, done)| (label.as_str(), *done))
    }

    /// Sets the done flag of the given task, adding it if absent.
    pub fn set(&mut self, label: impl Into<String>, done: bool) {
        _ = self.0.insert(label.into(), done);
    }
}

/// Identity stamp of the operator who created a [`Case`].
///
/// Issued by the external authentication provider; opaque to this service.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub struct OwnerId(Uuid);

define_kind! {
    #[doc = "Status of a [`Case`]."]
    enum Status {
        #[doc = "The transaction is in progress."]
        Processing = 1,

        #[doc = "The transaction completed and the property was handed \
                 over."]
        Closed = 2,

        #[doc = "The transaction was cancelled before completion."]
        Cancelled = 3,
    }
}

define_kind! {
    #[doc = "Land-tax ruling applied to a [`Case`]."]
    enum TaxKind {
        #[doc = "General land value increment tax rate."]
        General = 1,

        #[doc = "Self-use dwelling preferential rate."]
        SelfUse = 2,
    }
}

define_kind! {
    #[doc = "Reason a [`Case`] was cancelled."]
    enum Cancellation {
        #[doc = "Both parties agreed to rescind."]
        Mutual = 1,

        #[doc = "The buyer breached the contract."]
        BuyerBreach = 2,

        #[doc = "The seller breached the contract."]
        SellerBreach = 3,
    }
}

/// [`DateTime`] when a [`Case`] was created.
pub type CreationDateTime = DateTimeOf<(Case, unit::Creation)>;

/// [`DateTime`] when a [`Case`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Case, unit::Update)>;
