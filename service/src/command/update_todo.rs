//! [`Command`] for updating a [`Todo`].

use common::{
    operations::{By, Select, Update},
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{todo, Todo},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Todo`].
///
/// Carries the full new state of the editable fields. For a system
/// reminder only the completion flag is applied: its content, due date
/// and priority are owned by the reminder synchronizer.
#[derive(Clone, Debug)]
pub struct UpdateTodo {
    /// ID of the [`Todo`] to update.
    pub id: todo::Id,

    /// New [`todo::Content`] of the [`Todo`].
    pub content: todo::Content,

    /// New due [`Date`] of the [`Todo`].
    pub due_date: Option<Date>,

    /// New [`todo::Priority`] of the [`Todo`].
    pub priority: todo::Priority,

    /// Indicator whether the [`Todo`] is completed.
    pub completed: bool,
}

impl<Db> Command<UpdateTodo> for Service<Db>
where
    Db: Database<
            Select<By<Option<Todo>, todo::Id>>,
            Ok = Option<Todo>,
            Err = Traced<database::Error>,
        > + Database<Update<Todo>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Todo;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateTodo) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTodo {
            id,
            content,
            due_date,
            priority,
            completed,
        } = cmd;

        let mut todo = self
            .database()
            .execute(Select(By::<Option<Todo>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TodoNotExists(id))
            .map_err(tracerr::wrap!())?;

        if todo.source.kind() == todo::SourceKind::Manual {
            todo.content = content;
            todo.due_date = due_date;
            todo.priority = priority;
        }
        todo.completed_at = match (todo.completed_at, completed) {
            (Some(at), true) => Some(at),
            (None, true) => Some(DateTime::now().coerce()),
            (_, false) => None,
        };

        self.database()
            .execute(Update(todo.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(todo)
    }
}

/// Error of [`UpdateTodo`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Todo`] doesn't exist.
    #[display("`Todo(id: {_0})` does not exist")]
    #[from(ignore)]
    TodoNotExists(#[error(not(source))] todo::Id),
}
