//! [`Command`] for writing the [`Milestone`] record of a [`Case`].

use common::{
    operations::{By, Select, Upsert},
    Date, DateTimeOf,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{case, milestone, Case, Milestone},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for writing the [`Milestone`] record of a [`Case`].
///
/// The record is inserted on the first write and fully rewritten on the
/// following ones, keeping one row per case.
#[derive(Clone, Debug)]
pub struct UpsertMilestone {
    /// ID of the [`Case`] the [`Milestone`] belongs to.
    pub case_id: case::Id,

    /// [`Date`] the sale contract was signed.
    pub contract_date: Option<Date>,

    /// Sign-difference [`milestone::Stage`].
    pub sign_diff: milestone::Stage,

    /// Sealing [`milestone::Stage`].
    pub seal: milestone::Stage,

    /// Tax payment [`milestone::Stage`].
    pub tax_payment: milestone::Stage,

    /// [`Date`] the title transfer was registered.
    pub transfer_date: Option<Date>,

    /// Balance payment [`milestone::Stage`].
    pub balance: milestone::Stage,

    /// Handover [`milestone::Stage`].
    pub handover: milestone::Stage,

    /// [`Date`] the seller's mortgage redemption was cleared.
    pub redemption_date: Option<Date>,

    /// [`DateTime`] of the appointed sealing meeting.
    ///
    /// [`DateTime`]: common::DateTime
    pub seal_meeting_at: Option<milestone::MeetingDateTime>,

    /// [`DateTime`] of the appointed handover meeting.
    ///
    /// [`DateTime`]: common::DateTime
    pub handover_meeting_at: Option<milestone::MeetingDateTime>,
}

impl<Db> Command<UpsertMilestone> for Service<Db>
where
    Db: Database<
            Select<By<Option<Case>, case::Id>>,
            Ok = Option<Case>,
            Err = Traced<database::Error>,
        > + Database<Upsert<Milestone>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Milestone;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpsertMilestone,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpsertMilestone {
            case_id,
            contract_date,
            sign_diff,
            seal,
            tax_payment,
            transfer_date,
            balance,
            handover,
            redemption_date,
            seal_meeting_at,
            handover_meeting_at,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<Case>, _>::new(case_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CaseNotExists(case_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let milestone = Milestone {
            case_id,
            contract_date,
            sign_diff,
            seal,
            tax_payment,
            transfer_date,
            balance,
            handover,
            redemption_date,
            seal_meeting_at,
            handover_meeting_at,
            updated_at: DateTimeOf::now(),
        };

        self.database()
            .execute(Upsert(milestone.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(milestone)
    }
}

/// Error of [`UpsertMilestone`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Case`] doesn't exist.
    #[display("`Case(id: {_0})` does not exist")]
    #[from(ignore)]
    CaseNotExists(#[error(not(source))] case::Id),
}
