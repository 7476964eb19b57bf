//! [`Command`] for creating a new [`BankContact`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

use crate::{
    domain::{bank, case, BankContact},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`BankContact`].
#[derive(Clone, Debug)]
pub struct CreateBankContact {
    /// [`bank::Name`] of a new [`BankContact`].
    pub bank: bank::Name,

    /// [`bank::Branch`] of a new [`BankContact`].
    pub branch: Option<bank::Branch>,

    /// Contact [`bank::Person`] of a new [`BankContact`].
    pub person: Option<bank::Person>,

    /// [`case::Phone`] of a new [`BankContact`].
    pub phone: Option<case::Phone>,

    /// Free-form [`case::Notes`] of a new [`BankContact`].
    pub notes: Option<case::Notes>,
}

impl<Db> Command<CreateBankContact> for Service<Db>
where
    Db: Database<Insert<BankContact>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = BankContact;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateBankContact,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateBankContact {
            bank,
            branch,
            person,
            phone,
            notes,
        } = cmd;

        let contact = BankContact {
            id: bank::Id::new(),
            bank,
            branch,
            person,
            phone,
            notes,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        self.database()
            .execute(Insert(contact.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!())
            .map(drop)?;

        Ok(contact)
    }
}

/// Error of [`CreateBankContact`] [`Command`] execution.
pub type ExecutionError = database::Error;
