//! [`Command`] for updating a [`BankContact`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{bank, case, BankContact},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`BankContact`].
///
/// Carries the full new state of the editable fields.
#[derive(Clone, Debug)]
pub struct UpdateBankContact {
    /// ID of the [`BankContact`] to update.
    pub id: bank::Id,

    /// New [`bank::Name`] of the [`BankContact`].
    pub bank: bank::Name,

    /// New [`bank::Branch`] of the [`BankContact`].
    pub branch: Option<bank::Branch>,

    /// New contact [`bank::Person`] of the [`BankContact`].
    pub person: Option<bank::Person>,

    /// New [`case::Phone`] of the [`BankContact`].
    pub phone: Option<case::Phone>,

    /// New free-form [`case::Notes`] of the [`BankContact`].
    pub notes: Option<case::Notes>,
}

impl<Db> Command<UpdateBankContact> for Service<Db>
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
        cmd: UpdateBankContact,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateBankContact {
            id,
            bank,
            branch,
            person,
            phone,
            notes,
        } = cmd;

        let mut contact = self
            .database()
            .execute(Select(By::<Option<BankContact>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BankContactNotExists(id))
            .map_err(tracerr::wrap!())?;

        contact.bank = bank;
        contact.branch = branch;
        contact.person = person;
        contact.phone = phone;
        contact.notes = notes;

        self.database()
            .execute(Update(contact.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(contact)
    }
}

/// Error of [`UpdateBankContact`] [`Command`] execution.
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
