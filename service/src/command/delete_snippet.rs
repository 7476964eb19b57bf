//! [`Command`] for deleting a [`Snippet`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{snippet, Snippet},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Snippet`].
///
/// The row is soft-deleted.
#[derive(Clone, Copy, Debug)]
pub struct DeleteSnippet {
    /// ID of the [`Snippet`] to delete.
    pub id: snippet::Id,
}

impl<Db> Command<DeleteSnippet> for Service<Db>
where
    Db: Database<
            Select<By<Option<Snippet>, snippet::Id>>,
            Ok = Option<Snippet>,
            Err = Traced<database::Error>,
        > + Database<Update<Snippet>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Snippet;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteSnippet) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteSnippet { id } = cmd;

        let mut snippet = self
            .database()
            .execute(Select(By::<Option<Snippet>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SnippetNotExists(id))
            .map_err(tracerr::wrap!())?;

        snippet.deleted_at = Some(DateTime::now().coerce());

        self.database()
            .execute(Update(snippet.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(snippet)
    }
}

/// Error of [`DeleteSnippet`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Snippet`] doesn't exist.
    #[display("`Snippet(id: {_0})` does not exist")]
    #[from(ignore)]
    SnippetNotExists(#[error(not(source))] snippet::Id),
}
