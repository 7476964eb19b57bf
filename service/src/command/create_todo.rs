//! [`Command`] for creating a new manual [`Todo`].

use common::{
    operations::{By, Insert, Select},
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{case, todo, Case, Todo},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new manual [`Todo`].
///
/// System reminders are never created through this [`Command`]: they are
/// owned by the reminder synchronizer.
#[derive(Clone, Debug)]
pub struct CreateTodo {
    /// ID of the [`Case`] the [`Todo`] belongs to, if any.
    pub case_id: Option<case::Id>,

    /// [`todo::Content`] of a new [`Todo`].
    pub content: todo::Content,

    /// [`Date`] the [`Todo`] is due on.
    pub due_date: Option<Date>,

    /// [`todo::Priority`] of a new [`Todo`].
    pub priority: todo::Priority,
}

impl<Db> Command<CreateTodo> for Service<Db>
where
    Db: Database<
            Select<By<Option<Case>, case::Id>>,
            Ok = Option<Case>,
            Err = Traced<database::Error>,
        > + Database<Insert<Todo>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Todo;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateTodo) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateTodo {
            case_id,
            content,
            due_date,
            priority,
        } = cmd;

        if let Some(case_id) = case_id {
            self.database()
                .execute(Select(By::<Option<Case>, _>::new(case_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::CaseNotExists(case_id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        let todo = Todo {
            id: todo::Id::new(),
            case_id,
            content,
            due_date,
            priority,
            source: todo::Source::Manual,
            completed_at: None,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        self.database()
            .execute(Insert(todo.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(todo)
    }
}

/// Error of [`CreateTodo`] [`Command`] execution.
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
