//! [`Command`] for deleting a [`BankContact`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{bank, BankContact},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`BankContact`].
///
/// The row is soft-deleted.
#[derive(Clone, Copy, Debug)]
pub struct DeleteBankContact {
    /// ID of the [`BankContact`] to delete.
    pub id: bank::Id,
}

impl<Db> Command<DeleteBankContact> for Service<Db>
where
    Db: Database<
            Select<By<Option<BankContact>, bank::Id>>,
            Ok = Option<BankContact>,
            Err = Traced<database::Error>,
        > + Database<Update<BankContact>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = BankContact;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteBankContact,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteBankContact { id } = cmd;

        let mut contact = self
            .database()
            .execute(Select(By::<Option<BankContact>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BankContactNotExists(id))
            .map_err(tracerr::wrap!())?;

        contact.deleted_at = Some(DateTime::now().coerce());

        self.database()
            .execute(Update(contact.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(contact)
    }
}

/// Error of [`DeleteBankContact`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`BankContact`] doesn't exist.
    #[display("`BankContact(id: {_0})` does not exist")]
    #[from(ignore)]
    BankContactNotExists(#[error(not(source))] bank::Id),
}
