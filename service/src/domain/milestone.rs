//! [`Milestone`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateTimeOf, Money};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use time::Duration;

use super::case;

/// Milestone dates of a [`Case`], one record per case.
///
/// [`Case`]: super::Case
#[derive(Clone, Debug)]
pub struct Milestone {
    /// ID of the [`Case`] this [`Milestone`] belongs to.
    ///
    /// [`Case`]: super::Case
    pub case_id: case::Id,

    /// [`Date`] the sale contract was signed.
    pub contract_date: Option<Date>,

    /// Sign-difference [`Stage`] (remainder of the down payment).
    pub sign_diff: Stage,

    /// Sealing [`Stage`] (用印).
    pub seal: Stage,

    /// Tax payment [`Stage`] (完稅).
    pub tax_payment: Stage,

    /// [`Date`] the title transfer was registered.
    pub transfer_date: Option<Date>,

    /// Balance payment [`Stage`] (尾款).
    pub balance: Stage,

    /// Handover [`Stage`] (交屋).
    pub handover: Stage,

    /// [`Date`] the seller's mortgage redemption was cleared.
    pub redemption_date: Option<Date>,

    /// [`DateTime`] of the appointed sealing meeting.
    pub seal_meeting_at: Option<MeetingDateTime>,

    /// [`DateTime`] of the appointed handover meeting.
    pub handover_meeting_at: Option<MeetingDateTime>,

    /// [`DateTime`] when this [`Milestone`] was last updated.
    pub updated_at: UpdateDateTime,
}

impl Milestone {
    /// Creates an empty [`Milestone`] for the given [`Case`].
    ///
    /// [`Case`]: super::Case
    #[must_use]
    pub fn empty(case_id: case::Id) -> Self {
        Self {
            case_id,
            contract_date: None,
            sign_diff: Stage::default(),
            seal: Stage::default(),
            tax_payment: Stage::default(),
            transfer_date: None,
            balance: Stage::default(),
            handover: Stage::default(),
            redemption_date: None,
            seal_meeting_at: None,
            handover_meeting_at: None,
            updated_at: DateTimeOf::now(),
        }
    }

    /// Creates a [`Milestone`] for the given [`Case`] with stage dates
    /// pre-filled from the [`Schedule`] derived from the `contract_date`.
    ///
    /// [`Case`]: super::Case
    #[must_use]
    pub fn scheduled(
        case_id: case::Id,
        contract_date: Date,
        tax_kind: case::TaxKind,
    ) -> Self {
        let schedule = Schedule::derive(contract_date, tax_kind);
        Self {
            contract_date: Some(contract_date),
            sign_diff: Stage::on(schedule.sign_diff_date),
            seal: Stage::on(schedule.seal_date),
            tax_payment: Stage::on(schedule.tax_payment_date),
            handover: Stage::on(schedule.handover_date),
            ..Self::empty(case_id)
        }
    }
}

/// Single payment stage of a [`Milestone`]: an expected date, an agreed
/// amount and a payment method.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    /// [`Date`] this [`Stage`] is due on.
    pub date: Option<Date>,

    /// Agreed amount of this [`Stage`].
    pub amount: Option<Money>,

    /// Payment [`Method`] of this [`Stage`].
    pub method: Option<Method>,
}

impl Stage {
    /// Creates a new [`Stage`] due on the provided [`Date`] with no amount
    /// agreed yet.
    #[must_use]
    pub fn on(date: Date) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Indicates whether nothing is known about this [`Stage`] yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.amount.is_none() && self.method.is_none()
    }
}

/// Payment method of a [`Stage`] (轉帳, 現金, 支票, ...).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Method(String);

impl Method {
    /// Creates a new [`Method`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `method` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(method: impl Into<String>) -> Self {
        Self(method.into())
    }

    /// Creates a new [`Method`] if the given `method` is valid.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Option<Self> {
        let method = method.into();
        Self::check(&method).then_some(Self(method))
    }

    /// Checks whether the given `method` is a valid [`Method`].
    fn check(method: impl AsRef<str>) -> bool {
        let method = method.as_ref();
        method.trim() == method && !method.is_empty() && method.len() <= 32
    }
}

impl FromStr for Method {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Method`")
    }
}

/// Downstream [`Milestone`] dates derived from a contract date by fixed
/// offset rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Schedule {
    /// [`Date`] the sign-difference payment is due.
    pub sign_diff_date: Date,

    /// [`Date`] the sealing is expected on.
    pub seal_date: Date,

    /// [`Date`] the taxes are expected to be paid by.
    pub tax_payment_date: Date,

    /// [`Date`] the handover is expected on.
    pub handover_date: Date,
}

impl Schedule {
    /// Days between contract signing and the sign-difference payment.
    const SIGN_DIFF_DAYS: i64 = 3;

    /// Days between contract signing and sealing.
    const SEAL_DAYS: i64 = 10;

    /// Days between contract signing and tax payment under the general
    /// land-tax rate.
    const TAX_GENERAL_DAYS: i64 = 30;

    /// Days between contract signing and tax payment under the self-use
    /// dwelling rate, whose ruling takes longer to obtain.
    const TAX_SELF_USE_DAYS: i64 = 40;

    /// Days between tax payment and handover.
    const HANDOVER_DAYS: i64 = 15;

    /// Derives a [`Schedule`] from the provided contract [`Date`] and the
    /// case's [`TaxKind`].
    ///
    /// [`TaxKind`]: case::TaxKind
    #[must_use]
    pub fn derive(contract_date: Date, tax_kind: case::TaxKind) -> Self {
        let tax_days = match tax_kind {
            case::TaxKind::General => Self::TAX_GENERAL_DAYS,
            case::TaxKind::SelfUse => Self::TAX_SELF_USE_DAYS,
        };
        let tax_payment_date = contract_date + Duration::days(tax_days);

        Self {
            sign_diff_date: contract_date
                + Duration::days(Self::SIGN_DIFF_DAYS),
            seal_date: contract_date + Duration::days(Self::SEAL_DAYS),
            tax_payment_date,
            handover_date: tax_payment_date
                + Duration::days(Self::HANDOVER_DAYS),
        }
    }
}

/// [`DateTime`] of an appointed [`Milestone`] meeting.
pub type MeetingDateTime = DateTimeOf<(Milestone, unit::Creation)>;

/// [`DateTime`] when a [`Milestone`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Milestone, unit::Update)>;

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::domain::case::TaxKind;

    use super::Schedule;

    fn date(s: &str) -> Date {
        Date::from_iso(s).unwrap()
    }

    #[test]
    fn derives_general_schedule() {
        let schedule = Schedule::derive(date("2024-01-01"), TaxKind::General);

        assert_eq!(schedule.sign_diff_date, date("2024-01-04"));
        assert_eq!(schedule.seal_date, date("2024-01-11"));
        assert_eq!(schedule.tax_payment_date, date("2024-01-31"));
        assert_eq!(schedule.handover_date, date("2024-02-15"));
    }

    #[test]
    fn derives_self_use_schedule() {
        let schedule = Schedule::derive(date("2024-01-01"), TaxKind::SelfUse);

        assert_eq!(schedule.sign_diff_date, date("2024-01-04"));
        assert_eq!(schedule.seal_date, date("2024-01-11"));
        assert_eq!(schedule.tax_payment_date, date("2024-02-10"));
        assert_eq!(schedule.handover_date, date("2024-02-25"));
    }

    #[test]
    fn schedule_crosses_year_boundary() {
        let schedule = Schedule::derive(date("2024-12-20"), TaxKind::General);

        assert_eq!(schedule.tax_payment_date, date("2025-01-19"));
        assert_eq!(schedule.handover_date, date("2025-02-03"));
    }
}
