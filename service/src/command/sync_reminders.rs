//! [`Command`] for reconciling system reminders.

use common::{
    operations::{
        By, Commit, Delete, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Date,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{todo, Todo},
    infra::{database, Database},
    read,
    task::sync_reminders::{plan, Action},
    Service,
};

use super::Command;

/// [`Command`] reconciling the stored system reminders against the
/// milestone and financial deadlines of the cases being processed.
///
/// The whole pass runs in a single transaction under a lock, so two
/// concurrent runs cannot double-insert a reminder.
#[derive(Clone, Copy, Debug)]
pub struct SyncReminders;

/// Outcome of a [`SyncReminders`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Outcome {
    /// Number of reminders inserted.
    pub inserted: usize,

    /// Number of reminders rewritten in place.
    pub updated: usize,

    /// Number of reminders deleted.
    pub deleted: usize,
}

impl<Db> Command<SyncReminders> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Todo, ()>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<read::todo::Deadline>, ()>>,
            Ok = Vec<read::todo::Deadline>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Todo>, todo::SourceKind>>,
            Ok = Vec<Todo>,
            Err = Traced<database::Error>,
        > + Database<Insert<Todo>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Todo>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Delete<By<Todo, todo::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Outcome;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: SyncReminders) -> Result<Self::Ok, Self::Err> {
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        // Serialize concurrent reconciliations.
        tx.execute(Lock(By::<Todo, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        let deadlines = tx
            .execute(Select(By::<Vec<read::todo::Deadline>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!())?;
        let stored = tx
            .execute(Select(By::<Vec<Todo>, _>::new(
                todo::SourceKind::System,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        let plan = plan(Date::today(), &deadlines, &stored);
        if plan.keyless > 0 {
            log::warn!(
                "removing {} legacy reminders lacking a source key",
                plan.keyless,
            );
        }
        if plan.duplicates > 0 {
            // Duplicates mean some writer bypassed the reconciliation
            // lock: a known data-integrity gap worth surfacing.
            log::warn!(
                "removing {} duplicate system reminders",
                plan.duplicates,
            );
        }

        let mut outcome = Outcome::default();
        for action in plan.actions {
            match action {
                Action::Insert(todo) => {
                    tx.execute(Insert(todo))
                        .await
                        .map_err(tracerr::map_from_and_wrap!())?;
                    outcome.inserted += 1;
                }
                Action::Update(todo) => {
                    tx.execute(Update(todo))
                        .await
                        .map_err(tracerr::map_from_and_wrap!())?;
                    outcome.updated += 1;
                }
                Action::Delete(id) => {
                    tx.execute(Delete(By::<Todo, _>::new(id)))
                        .await
                        .map_err(tracerr::map_from_and_wrap!())?;
                    outcome.deleted += 1;
                }
            }
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        Ok(outcome)
    }
}

/// Error of [`SyncReminders`] [`Command`] execution.
pub type ExecutionError = database::Error;
