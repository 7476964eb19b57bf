//! [`SyncReminders`] [`Task`].
//!
//! Reconciles system reminders against the milestone and financial
//! deadlines of the cases being processed. The reconciliation itself is
//! a pure [`plan`] over the harvested deadlines and the stored
//! reminders; the [`Task`] merely executes the [`command::SyncReminders`]
//! on an interval.

use std::{collections::HashMap, convert::Infallible, error::Error, time};

use common::{
    operations::{By, Perform, Start},
    Date, DateTimeOf,
};
use tokio::time::interval;
use tracing as log;

use crate::{
    command,
    domain::{case, todo, Todo},
    read,
    Service,
};

use super::Task;

/// Configuration for [`SyncReminders`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between reminder reconciliations.
    pub interval: time::Duration,
}

/// [`Task`] for reconciling system reminders on an interval.
#[derive(Clone, Copy, Debug)]
pub struct SyncReminders<S> {
    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<SyncReminders<Self>, Config>>> for Service<Db>
where
    SyncReminders<Service<Db>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<SyncReminders<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = SyncReminders {
            service: self.clone(),
        };

        let mut interval = interval(config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::SyncReminders` failed: {e}");
            });
        }
    }
}

impl<Db> Task<Perform<()>> for SyncReminders<Service<Db>>
where
    Service<Db>: command::Command<
        command::SyncReminders,
        Ok = command::sync_reminders::Outcome,
        Err: Error,
    >,
{
    type Ok = ();
    type Err = <Service<Db> as command::Command<command::SyncReminders>>::Err;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let outcome = self.service.execute(command::SyncReminders).await?;
        log::debug!(
            "reminders reconciled: {} inserted, {} updated, {} deleted",
            outcome.inserted,
            outcome.updated,
            outcome.deleted,
        );
        Ok(())
    }
}

/// Reconciliation plan of the stored system reminders against the
/// harvested [`read::todo::Deadline`]s.
#[derive(Clone, Debug, Default)]
pub struct Plan {
    /// [`Action`]s to perform, in order.
    pub actions: Vec<Action>,

    /// Number of legacy reminders lacking a source key found (and
    /// scheduled for deletion).
    pub keyless: usize,

    /// Number of duplicate keyed reminders found (and scheduled for
    /// deletion, keeping the first of every key).
    ///
    /// Duplicates mean some writer bypassed the reconciliation lock:
    /// a known data-integrity gap worth surfacing in the logs.
    pub duplicates: usize,
}

impl Plan {
    /// Indicates whether this [`Plan`] changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Single step of a [`Plan`].
#[derive(Clone, Debug)]
pub enum Action {
    /// Insert a new system reminder.
    Insert(Todo),

    /// Rewrite an existing system reminder (stale due date or
    /// priority).
    Update(Todo),

    /// Delete a stored reminder.
    Delete(todo::Id),
}

/// Builds a reconciliation [`Plan`] of the `stored` system reminders
/// against the source-of-truth `deadlines`, as of `today`.
///
/// The resulting [`Plan`] is idempotent: applying it and planning again
/// over the same `deadlines` yields an empty [`Plan`].
#[expect(clippy::missing_panics_doc, reason = "infallible")]
#[must_use]
pub fn plan(
    today: Date,
    deadlines: &[read::todo::Deadline],
    stored: &[Todo],
) -> Plan {
    let mut out = Plan::default();

    // First pass: index stored reminders by their key, scheduling
    // legacy keyless rows and duplicates for deletion.
    let mut kept = HashMap::<(case::Id, todo::SourceKey), &Todo>::new();
    for todo in stored {
        match (todo.source, todo.case_id) {
            // Manual todos are not reconciled.
            (todo::Source::Manual, _) => {}
            (todo::Source::System(Some(key)), Some(case_id)) => {
                if kept.contains_key(&(case_id, key)) {
                    out.duplicates += 1;
                    out.actions.push(Action::Delete(todo.id));
                } else {
                    _ = kept.insert((case_id, key), todo);
                }
            }
            // A reminder the key (or case) of which is lost cannot be
            // reconciled anymore.
            (todo::Source::System(None), _)
            | (todo::Source::System(Some(_)), None) => {
                out.keyless += 1;
                out.actions.push(Action::Delete(todo.id));
            }
        }
    }

    // Second pass: diff the deadlines against the kept reminders.
    for deadline in deadlines {
        let read::todo::Deadline {
            case_id,
            case_number,
            key,
            due,
        } = deadline;

        let desired = priority(today, *due, *key);
        match kept.remove(&(*case_id, *key)) {
            Some(todo) => {
                // Completed reminders keep occupying their key, but are
                // not rewritten.
                if todo.completed_at.is_none()
                    && (todo.due_date != Some(*due)
                        || todo.priority != desired)
                {
                    out.actions.push(Action::Update(Todo {
                        due_date: Some(*due),
                        priority: desired,
                        ..todo.clone()
                    }));
                }
            }
            None => {
                let content = todo::Content::new(format!(
                    "{case_number} {}",
                    key.label(),
                ))
                .expect("non-empty content");
                out.actions.push(Action::Insert(Todo {
                    id: todo::Id::new(),
                    case_id: Some(*case_id),
                    content,
                    due_date: Some(*due),
                    priority: desired,
                    source: todo::Source::System(Some(*key)),
                    completed_at: None,
                    created_at: DateTimeOf::now(),
                    deleted_at: None,
                }));
            }
        }
    }

    // Whatever is left points at an emptied field or a case that left
    // processing.
    for todo in kept.into_values() {
        out.actions.push(Action::Delete(todo.id));
    }

    out
}

/// Computes the [`todo::Priority`] of a reminder due on `due`, as of
/// `today`.
///
/// A reminder becomes [`High`] once `today` enters the lead window of
/// its [`todo::SourceKey`], and stays [`High`] past the due date.
///
/// [`High`]: todo::Priority::High
#[must_use]
pub fn priority(
    today: Date,
    due: Date,
    key: todo::SourceKey,
) -> todo::Priority {
    if today >= due - key.lead() {
        todo::Priority::High
    } else {
        todo::Priority::Normal
    }
}

#[cfg(test)]
mod spec {
    use common::{Date, DateTimeOf};

    use crate::{
        domain::{case, todo, Todo},
        read,
    };

    use super::{plan, priority, Action, Plan};

    fn date(s: &str) -> Date {
        Date::from_iso(s).unwrap()
    }

    fn deadline(
        case_id: case::Id,
        key: todo::SourceKey,
        due: &str,
    ) -> read::todo::Deadline {
        read::todo::Deadline {
            case_id,
            case_number: case::Number::new("114-0042").unwrap(),
            key,
            due: date(due),
        }
    }

    /// Applies a [`Plan`] to an in-memory reminder list, the way the
    /// command applies it to the database.
    fn apply(stored: &mut Vec<Todo>, plan: Plan) {
        for action in plan.actions {
            match action {
                Action::Insert(todo) => stored.push(todo),
                Action::Update(todo) => {
                    let found = stored
                        .iter_mut()
                        .find(|t| t.id == todo.id)
                        .expect("updated `Todo` exists");
                    *found = todo;
                }
                Action::Delete(id) => stored.retain(|t| t.id != id),
            }
        }
    }

    #[test]
    fn inserts_once_and_stays_idempotent() {
        let case_id = case::Id::new();
        let deadlines =
            [deadline(case_id, todo::SourceKey::SealDate, "2024-03-20")];
        let mut stored = vec![];

        let first = plan(date("2024-03-01"), &deadlines, &stored.clone());
        apply(&mut stored, first);

        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored[0].source.key(),
            Some(todo::SourceKey::SealDate),
        );
        assert_eq!(stored[0].due_date, Some(date("2024-03-20")));
        assert_eq!(stored[0].priority, todo::Priority::Normal);
        assert_eq!(
            AsRef::<str>::as_ref(&stored[0].content),
            "114-0042 用印",
        );

        // Second run changes nothing.
        let second = plan(date("2024-03-01"), &deadlines, &stored);
        assert!(second.is_empty());
    }

    #[test]
    fn moved_deadline_updates_in_place() {
        let case_id = case::Id::new();
        let mut stored = vec![];
        let first = plan(
            date("2024-03-01"),
            &[deadline(case_id, todo::SourceKey::SealDate, "2024-03-20")],
            &stored.clone(),
        );
        apply(&mut stored, first);
        let id = stored[0].id;

        let moved =
            [deadline(case_id, todo::SourceKey::SealDate, "2024-03-25")];
        let second = plan(date("2024-03-01"), &moved, &stored);

        assert_eq!(second.actions.len(), 1);
        assert!(
            matches!(&second.actions[0], Action::Update(t) if t.id == id),
        );
        apply(&mut stored, second);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].due_date, Some(date("2024-03-25")));
    }

    #[test]
    fn keyless_reminder_is_deleted() {
        let case_id = case::Id::new();
        let legacy = Todo {
            id: todo::Id::new(),
            case_id: Some(case_id),
            content: todo::Content::new("老資料").unwrap(),
            due_date: Some(date("2024-03-20")),
            priority: todo::Priority::Normal,
            source: todo::Source::System(None),
            completed_at: None,
            created_at: DateTimeOf::now(),
            deleted_at: None,
        };
        let mut stored = vec![legacy];

        let out = plan(date("2024-03-01"), &[], &stored);

        assert_eq!(out.keyless, 1);
        apply(&mut stored, out);
        assert!(stored.is_empty());
    }

    #[test]
    fn duplicates_are_deleted_keeping_the_first() {
        let case_id = case::Id::new();
        let deadlines =
            [deadline(case_id, todo::SourceKey::SealDate, "2024-03-20")];
        let mut stored = vec![];
        let first_plan = plan(date("2024-03-01"), &deadlines, &stored.clone());
        apply(&mut stored, first_plan);
        let first = stored[0].id;

        // A second writer raced in a duplicate.
        let mut rogue = stored[0].clone();
        rogue.id = todo::Id::new();
        stored.push(rogue);

        let out = plan(date("2024-03-01"), &deadlines, &stored);
        assert_eq!(out.duplicates, 1);
        apply(&mut stored, out);

        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, first);
    }

    #[test]
    fn emptied_field_deletes_its_reminder() {
        let case_id = case::Id::new();
        let mut stored = vec![];
        let first = plan(
            date("2024-03-01"),
            &[deadline(case_id, todo::SourceKey::SealDate, "2024-03-20")],
            &stored.clone(),
        );
        apply(&mut stored, first);

        // The operator cleared the seal date (or closed the case).
        let second = plan(date("2024-03-01"), &[], &stored.clone());
        apply(&mut stored, second);

        assert!(stored.is_empty());
    }

    #[test]
    fn urgency_honours_lead_windows() {
        let seal = todo::SourceKey::SealDate;
        let tax = todo::SourceKey::LandTaxDue;
        let due = date("2024-03-20");

        // Legal-process dates: 3 days of lead.
        assert_eq!(
            priority(date("2024-03-16"), due, seal),
            todo::Priority::Normal,
        );
        assert_eq!(
            priority(date("2024-03-17"), due, seal),
            todo::Priority::High,
        );

        // Tax deadlines: 5 days of lead.
        assert_eq!(
            priority(date("2024-03-14"), due, tax),
            todo::Priority::Normal,
        );
        assert_eq!(
            priority(date("2024-03-15"), due, tax),
            todo::Priority::High,
        );

        // Overdue stays urgent.
        assert_eq!(
            priority(date("2024-04-01"), due, seal),
            todo::Priority::High,
        );
    }

    #[test]
    fn approaching_deadline_escalates_priority() {
        let case_id = case::Id::new();
        let deadlines =
            [deadline(case_id, todo::SourceKey::SealDate, "2024-03-20")];
        let mut stored = vec![];
        let first = plan(date("2024-03-01"), &deadlines, &stored.clone());
        apply(&mut stored, first);
        assert_eq!(stored[0].priority, todo::Priority::Normal);

        // Same deadline, later day: the reminder turns urgent.
        let out = plan(date("2024-03-18"), &deadlines, &stored);
        assert_eq!(out.actions.len(), 1);
        apply(&mut stored, out);
        assert_eq!(stored[0].priority, todo::Priority::High);
    }

    #[test]
    fn completed_reminder_is_left_untouched() {
        let case_id = case::Id::new();
        let deadlines =
            [deadline(case_id, todo::SourceKey::SealDate, "2024-03-20")];
        let mut stored = vec![];
        let first = plan(date("2024-03-01"), &deadlines, &stored.clone());
        apply(&mut stored, first);
        stored[0].completed_at = Some(DateTimeOf::now());

        // Neither urgency escalation nor a moved date rewrites it, and
        // no second reminder appears for the occupied key.
        let moved =
            [deadline(case_id, todo::SourceKey::SealDate, "2024-03-25")];
        assert!(plan(date("2024-03-18"), &moved, &stored).is_empty());
    }
}
