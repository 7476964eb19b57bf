//! [`Todo`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr as DeriveFromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use super::case;

/// Item on the scheduling dashboard: either a manually entered task or a
/// system reminder derived from a milestone or deadline field.
#[derive(Clone, Debug)]
pub struct Todo {
    /// ID of this [`Todo`].
    pub id: Id,

    /// ID of the [`Case`] this [`Todo`] belongs to, if any.
    ///
    /// [`Case`]: super::Case
    pub case_id: Option<case::Id>,

    /// [`Content`] of this [`Todo`].
    pub content: Content,

    /// [`Date`] this [`Todo`] is due on.
    pub due_date: Option<Date>,

    /// [`Priority`] of this [`Todo`].
    pub priority: Priority,

    /// [`Source`] this [`Todo`] originates from.
    pub source: Source,

    /// [`DateTime`] when this [`Todo`] was completed, if it was.
    pub completed_at: Option<CompletionDateTime>,

    /// [`DateTime`] when this [`Todo`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Todo`] was deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

impl Todo {
    /// Indicates whether this [`Todo`] is completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Indicates whether this [`Todo`] is deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// ID of a [`Todo`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    DeriveFromStr,
    Display,
    Eq,
    From,
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

/// Content of a [`Todo`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Content(String);

impl Content {
    /// Creates a new [`Content`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `content` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// Creates a new [`Content`] if the given `content` is valid.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        Self::check(&content).then_some(Self(content))
    }

    /// Checks whether the given `content` is a valid [`Content`].
    fn check(content: impl AsRef<str>) -> bool {
        let content = content.as_ref();
        content.trim() == content
            && !content.is_empty()
            && content.len() <= 512
    }
}

impl FromStr for Content {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Content`")
    }
}

define_kind! {
    #[doc = "Priority of a [`Todo`]."]
    enum Priority {
        #[doc = "Can wait."]
        Low = 1,

        #[doc = "Regular work item."]
        Normal = 2,

        #[doc = "Due soon or overdue."]
        High = 3,
    }
}

/// Origin of a [`Todo`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source {
    /// Entered by an operator.
    Manual,

    /// Derived from a milestone or deadline field.
    ///
    /// [`None`] key marks a legacy reminder written before keys existed;
    /// the synchronizer removes such rows.
    System(Option<SourceKey>),
}

impl Source {
    /// Returns [`SourceKind`] of this [`Source`].
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Manual => SourceKind::Manual,
            Self::System(_) => SourceKind::System,
        }
    }

    /// Returns the [`SourceKey`] of this [`Source`], if it carries one.
    #[must_use]
    pub fn key(&self) -> Option<SourceKey> {
        match self {
            Self::Manual | Self::System(None) => None,
            Self::System(Some(key)) => Some(*key),
        }
    }
}

define_kind! {
    #[doc = "Kind of a [`Todo`] [`Source`]."]
    enum SourceKind {
        #[doc = "Entered by an operator."]
        Manual = 1,

        #[doc = "Derived from a milestone or deadline field."]
        System = 2,
    }
}

/// Milestone or deadline field a system [`Todo`] was derived from.
///
/// Together with the case ID it forms the deduplication key of system
/// reminders.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum SourceKey {
    /// Sealing date of the milestone record.
    SealDate,

    /// Tax payment date of the milestone record.
    TaxPaymentDate,

    /// Title transfer date of the milestone record.
    TransferDate,

    /// Balance payment date of the milestone record.
    BalanceDate,

    /// Handover date of the milestone record.
    HandoverDate,

    /// Land value increment tax deadline of the financial record.
    LandTaxDue,

    /// Deed tax deadline of the financial record.
    DeedTaxDue,
}

impl SourceKey {
    /// Indicates whether this [`SourceKey`] is a tax deadline rather than a
    /// legal-process date.
    #[must_use]
    pub fn is_tax_deadline(self) -> bool {
        matches!(self, Self::LandTaxDue | Self::DeedTaxDue)
    }

    /// Returns the reminder lead window of this [`SourceKey`]: a reminder
    /// becomes urgent this many days before its due date.
    #[must_use]
    pub fn lead(self) -> Duration {
        if self.is_tax_deadline() {
            Duration::days(5)
        } else {
            Duration::days(3)
        }
    }

    /// Returns the human-readable label of the stage this [`SourceKey`]
    /// points at.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SealDate => "用印",
            Self::TaxPaymentDate => "完稅",
            Self::TransferDate => "過戶",
            Self::BalanceDate => "尾款",
            Self::HandoverDate => "交屋",
            Self::LandTaxDue => "土地增值稅繳納期限",
            Self::DeedTaxDue => "契稅繳納期限",
        }
    }
}

/// [`DateTime`] when a [`Todo`] was completed.
pub type CompletionDateTime = DateTimeOf<(Todo, unit::Completion)>;

/// [`DateTime`] when a [`Todo`] was created.
pub type CreationDateTime = DateTimeOf<(Todo, unit::Creation)>;

/// [`DateTime`] when a [`Todo`] was deleted.
pub type DeletionDateTime = DateTimeOf<(Todo, unit::Deletion)>;

#[cfg(test)]
mod spec {
    use super::SourceKey;

    #[test]
    fn source_key_round_trips_as_string() {
        for (key, s) in [
            (SourceKey::SealDate, "seal_date"),
            (SourceKey::TaxPaymentDate, "tax_payment_date"),
            (SourceKey::TransferDate, "transfer_date"),
            (SourceKey::BalanceDate, "balance_date"),
            (SourceKey::HandoverDate, "handover_date"),
            (SourceKey::LandTaxDue, "land_tax_due"),
            (SourceKey::DeedTaxDue, "deed_tax_due"),
        ] {
            assert_eq!(key.to_string(), s);
            assert_eq!(s.parse::<SourceKey>().unwrap(), key);
        }
    }

    #[test]
    fn lead_windows() {
        assert_eq!(SourceKey::SealDate.lead(), time::Duration::days(3));
        assert_eq!(SourceKey::HandoverDate.lead(), time::Duration::days(3));
        assert_eq!(SourceKey::LandTaxDue.lead(), time::Duration::days(5));
        assert_eq!(SourceKey::DeedTaxDue.lead(), time::Duration::days(5));
    }
}
