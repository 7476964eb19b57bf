//! [`Snippet`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference-library entry: a reusable contract clause or an internal
/// process guideline.
#[derive(Clone, Debug)]
pub struct Snippet {
    /// ID of this [`Snippet`].
    pub id: Id,

    /// [`Kind`] of this [`Snippet`].
    pub kind: Kind,

    /// [`Title`] of this [`Snippet`].
    pub title: Title,

    /// [`Body`] text of this [`Snippet`].
    pub body: Body,

    /// [`DateTime`] when this [`Snippet`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Snippet`] was deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

/// ID of a [`Snippet`].
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

define_kind! {
    #[doc = "Kind of a [`Snippet`]."]
    enum Kind {
        #[doc = "A reusable contract clause."]
        Clause = 1,

        #[doc = "An internal process guideline."]
        Guideline = 2,
    }
}

/// Title of a [`Snippet`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 256
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Body text of a [`Snippet`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Body(String);

impl Body {
    /// Creates a new [`Body`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `body` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    /// Creates a new [`Body`] if the given `body` is valid.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Option<Self> {
        let body = body.into();
        Self::check(&body).then_some(Self(body))
    }

    /// Checks whether the given `body` is a valid [`Body`].
    fn check(body: impl AsRef<str>) -> bool {
        let body = body.as_ref();
        !body.is_empty() && body.len() <= 16_384
    }
}

impl FromStr for Body {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Body`")
    }
}

/// [`DateTime`] when a [`Snippet`] was created.
pub type CreationDateTime = DateTimeOf<(Snippet, unit::Creation)>;

/// [`DateTime`] when a [`Snippet`] was deleted.
pub type DeletionDateTime = DateTimeOf<(Snippet, unit::Deletion)>;
