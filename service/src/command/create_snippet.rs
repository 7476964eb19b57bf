//! [`Command`] for creating a new [`Snippet`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

use crate::{
    domain::{snippet, Snippet},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Snippet`].
#[derive(Clone, Debug)]
pub struct CreateSnippet {
    /// [`snippet::Kind`] of a new [`Snippet`].
    pub kind: snippet::Kind,

    /// [`snippet::Title`] of a new [`Snippet`].
    pub title: snippet::Title,

    /// [`snippet::Body`] of a new [`Snippet`].
    pub body: snippet::Body,
}

impl<Db> Command<CreateSnippet> for Service<Db>
where
    Db: Database<Insert<Snippet>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Snippet;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateSnippet) -> Result<Self::Ok, Self::Err> {
        let CreateSnippet { kind, title, body } = cmd;

        let snippet = Snippet {
            id: snippet::Id::new(),
            kind,
            title,
            body,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        self.database()
            .execute(Insert(snippet.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!())
            .map(drop)?;

        Ok(snippet)
    }
}

/// Error of [`CreateSnippet`] [`Command`] execution.
pub type ExecutionError = database::Error;
