//! [`Command`] for updating a [`Case`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{case, Case},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Case`].
///
/// Carries the full new state of the editable fields, the way the case
/// form submits them. The number, the owner stamp and the creation time
/// are not editable.
#[derive(Clone, Debug)]
pub struct UpdateCase {
    /// ID of the [`Case`] to update.
    pub id: case::Id,

    /// New buying [`case::Party`] of the [`Case`].
    pub buyer: case::Party,

    /// New selling [`case::Party`] of the [`Case`].
    pub seller: case::Party,

    /// New [`case::City`] of the [`Case`].
    pub city: Option<case::City>,

    /// New [`case::Status`] of the [`Case`].
    pub status: case::Status,

    /// New [`case::TaxKind`] of the [`Case`].
    pub tax_kind: case::TaxKind,

    /// New [`case::Cancellation`] reason of the [`Case`].
    ///
    /// Only meaningful when the `status` is [`Cancelled`]; dropped
    /// otherwise.
    ///
    /// [`Cancelled`]: case::Status::Cancelled
    pub cancellation: Option<case::Cancellation>,

    /// New free-form [`case::Notes`] of the [`Case`].
    pub notes: Option<case::Notes>,

    /// New task [`case::Checklist`] of the [`Case`].
    pub checklist: case::Checklist,
}

impl<Db> Command<UpdateCase> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Case>, case::Id>>,
            Ok = Option<Case>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Case, case::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Case>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Case;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateCase) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateCase {
            id,
            buyer,
            seller,
            city,
            status,
            tax_kind,
            cancellation,
            notes,
            checklist,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Case`.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut case = tx
            .execute(Select(By::<Option<Case>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CaseNotExists(id))
            .map_err(tracerr::wrap!())?;

        case.buyer = buyer;
        case.seller = seller;
        case.city = city;
        case.status = status;
        case.tax_kind = tax_kind;
        case.cancellation = (status == case::Status::Cancelled)
            .then_some(cancellation)
            .flatten();
        case.notes = notes;
        case.checklist = checklist;
        case.updated_at = DateTime::now().coerce();

        tx.execute(Update(case.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(case)
    }
}

/// Error of [`UpdateCase`] [`Command`] execution.
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
