//! [`Command`] for deleting a [`Todo`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{todo, Todo},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Todo`].
///
/// The row is soft-deleted. Deleting a system reminder the source field
/// of which is still set only lasts until the next reconciliation run
/// re-derives it.
#[derive(Clone, Copy, Debug)]
pub struct DeleteTodo {
    /// ID of the [`Todo`] to delete.
    pub id: todo::Id,
}

impl<Db> Command<DeleteTodo> for Service<Db>
where
    Db: Database<
            Select<By<Option<Todo>, todo::Id>>,
            Ok = Option<Todo>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Todo, todo::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = Todo;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteTodo) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteTodo { id } = cmd;

        let todo = self
            .database()
            .execute(Select(By::<Option<Todo>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TodoNotExists(id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Delete(By::<Todo, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(todo)
    }
}

/// Error of [`DeleteTodo`] [`Command`] execution.
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
